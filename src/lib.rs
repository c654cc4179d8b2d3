//! Futures Testnet Trading Bot
//!
//! An interactive operator console for a USDⓈ-M futures account, testnet by
//! default. Market, limit, stop-limit and emulated OCO orders; balance,
//! position and order views; cancellation. All matching and risk logic
//! stays on the exchange.

pub mod binance;
pub mod config;
pub mod console;
pub mod error;
pub mod exchange;
pub mod gateway;
pub mod types;

pub use config::Config;
pub use error::{ApiError, BotError, BotResult};
pub use exchange::FuturesApi;
pub use gateway::ExchangeGateway;
pub use types::*;
