//! Binance USD-M futures REST client
//!
//! Blocking, signed requests against the futures testnet (or production when
//! explicitly selected). Implements [`crate::exchange::FuturesApi`].

pub mod auth;
pub mod client;

pub use auth::{sign_query, Credentials};
pub use client::{ClientConfig, FuturesClient, MAINNET_BASE_URL, TESTNET_BASE_URL};
