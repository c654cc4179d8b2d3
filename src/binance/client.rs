//! Blocking client for the USD-M futures REST API
//!
//! Every call is a single request: no retries, no rate limiting. A failed
//! call surfaces once as an [`ApiError`] and the operator decides what to do.
//!
//! # Example
//!
//! ```no_run
//! use futures_testnet_bot::binance::{Credentials, FuturesClient, TESTNET_BASE_URL};
//! use futures_testnet_bot::exchange::FuturesApi;
//!
//! let client = FuturesClient::new(
//!     Credentials::new("api_key", "api_secret"),
//!     TESTNET_BASE_URL,
//!     Default::default(),
//! )?;
//! let price = client.ticker_price("BTCUSDT")?;
//! println!("BTCUSDT: {}", price);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use chrono::Utc;
use reqwest::blocking::{Client, Response};
use reqwest::{Method, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::auth::{Credentials, API_KEY_HEADER};
use crate::error::ApiError;
use crate::exchange::{ApiResult, FuturesApi};
use crate::types::{Balance, Order, OrderId, OrderRequest, Position};

/// Futures testnet REST endpoint
pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// Production futures REST endpoint
pub const MAINNET_BASE_URL: &str = "https://fapi.binance.com";

const PING_PATH: &str = "/fapi/v1/ping";
const BALANCE_PATH: &str = "/fapi/v2/balance";
const TICKER_PRICE_PATH: &str = "/fapi/v1/ticker/price";
const ORDER_PATH: &str = "/fapi/v1/order";
const OPEN_ORDERS_PATH: &str = "/fapi/v1/openOrders";
const POSITION_RISK_PATH: &str = "/fapi/v2/positionRisk";

/// Transport settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Validity window the exchange applies to signed requests
    pub recv_window_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            recv_window_ms: 5000,
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_recv_window(mut self, recv_window_ms: u64) -> Self {
        self.recv_window_ms = recv_window_ms;
        self
    }
}

#[derive(Debug, Deserialize)]
struct TickerPrice {
    price: Decimal,
}

/// Authenticated session against one futures REST endpoint
pub struct FuturesClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
    recv_window_ms: u64,
}

impl FuturesClient {
    pub fn new(
        credentials: Credentials,
        base_url: impl Into<String>,
        config: ClientConfig,
    ) -> ApiResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            recv_window_ms: config.recv_window_ms,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> ApiResult<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let url = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        };
        url.map_err(|e| ApiError::new(None, format!("invalid URL {}: {}", raw, e)))
    }

    /// Unauthenticated request
    fn send_public<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> ApiResult<T> {
        let url = self.endpoint(path, params)?;
        debug!("GET {}", url);
        let response = self.http.get(url).send()?;
        Self::decode(response)
    }

    /// Signed request: `recvWindow` and `timestamp` are appended, the query
    /// string is signed, and the signature goes last.
    fn send_signed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        mut params: Vec<(&str, String)>,
    ) -> ApiResult<T> {
        params.push(("recvWindow", self.recv_window_ms.to_string()));
        params.push(("timestamp", Utc::now().timestamp_millis().to_string()));

        let mut url = self.endpoint(path, &params)?;
        let signature = self.credentials.sign(url.query().unwrap_or_default());
        url.query_pairs_mut().append_pair("signature", &signature);

        debug!("{} {}{}", method, self.base_url, path);
        let response = self
            .http
            .request(method, url)
            .header(API_KEY_HEADER, self.credentials.api_key())
            .send()?;
        Self::decode(response)
    }

    fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            return Err(ApiError::from_response(status, &text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

impl FuturesApi for FuturesClient {
    fn ping(&self) -> ApiResult<()> {
        let _: serde_json::Value = self.send_public(PING_PATH, &[])?;
        Ok(())
    }

    fn account_balances(&self) -> ApiResult<Vec<Balance>> {
        self.send_signed(Method::GET, BALANCE_PATH, Vec::new())
    }

    fn ticker_price(&self, symbol: &str) -> ApiResult<Decimal> {
        let ticker: TickerPrice =
            self.send_public(TICKER_PRICE_PATH, &[("symbol", symbol.to_string())])?;
        Ok(ticker.price)
    }

    fn create_order(&self, request: &OrderRequest) -> ApiResult<Order> {
        self.send_signed(Method::POST, ORDER_PATH, request.to_params())
    }

    fn query_order(&self, symbol: &str, order_id: OrderId) -> ApiResult<Order> {
        let params = vec![
            ("symbol", symbol.to_string()),
            ("orderId", order_id.to_string()),
        ];
        self.send_signed(Method::GET, ORDER_PATH, params)
    }

    fn cancel_order(&self, symbol: &str, order_id: OrderId) -> ApiResult<Order> {
        let params = vec![
            ("symbol", symbol.to_string()),
            ("orderId", order_id.to_string()),
        ];
        self.send_signed(Method::DELETE, ORDER_PATH, params)
    }

    fn open_orders(&self, symbol: Option<&str>) -> ApiResult<Vec<Order>> {
        let params = symbol
            .map(|s| vec![("symbol", s.to_string())])
            .unwrap_or_default();
        self.send_signed(Method::GET, OPEN_ORDERS_PATH, params)
    }

    fn position_risk(&self, symbol: Option<&str>) -> ApiResult<Vec<Position>> {
        let params = symbol
            .map(|s| vec![("symbol", s.to_string())])
            .unwrap_or_default();
        self.send_signed(Method::GET, POSITION_RISK_PATH, params)
    }
}
