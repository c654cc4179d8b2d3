//! Exchange API abstraction
//!
//! `FuturesApi` is the remote REST surface the gateway drives. The real
//! implementation is [`crate::binance::FuturesClient`]; tests substitute a
//! recording double.

use rust_decimal::Decimal;

use crate::error::ApiError;
use crate::types::{Balance, Order, OrderId, OrderRequest, Position};

pub type ApiResult<T> = Result<T, ApiError>;

/// Blocking request/response calls against a futures exchange account
pub trait FuturesApi {
    /// Connectivity check
    fn ping(&self) -> ApiResult<()>;

    /// Futures wallet balances, one entry per asset
    fn account_balances(&self) -> ApiResult<Vec<Balance>>;

    /// Latest traded price for a symbol
    fn ticker_price(&self, symbol: &str) -> ApiResult<Decimal>;

    /// Submit a new order
    fn create_order(&self, request: &OrderRequest) -> ApiResult<Order>;

    fn query_order(&self, symbol: &str, order_id: OrderId) -> ApiResult<Order>;

    fn cancel_order(&self, symbol: &str, order_id: OrderId) -> ApiResult<Order>;

    /// Open orders for one symbol, or for every symbol when `None`
    fn open_orders(&self, symbol: Option<&str>) -> ApiResult<Vec<Order>>;

    /// Position snapshot for one symbol, or for every symbol when `None`.
    /// Flat positions are included.
    fn position_risk(&self, symbol: Option<&str>) -> ApiResult<Vec<Position>>;
}

impl<T: FuturesApi + ?Sized> FuturesApi for &T {
    fn ping(&self) -> ApiResult<()> {
        (**self).ping()
    }

    fn account_balances(&self) -> ApiResult<Vec<Balance>> {
        (**self).account_balances()
    }

    fn ticker_price(&self, symbol: &str) -> ApiResult<Decimal> {
        (**self).ticker_price(symbol)
    }

    fn create_order(&self, request: &OrderRequest) -> ApiResult<Order> {
        (**self).create_order(request)
    }

    fn query_order(&self, symbol: &str, order_id: OrderId) -> ApiResult<Order> {
        (**self).query_order(symbol, order_id)
    }

    fn cancel_order(&self, symbol: &str, order_id: OrderId) -> ApiResult<Order> {
        (**self).cancel_order(symbol, order_id)
    }

    fn open_orders(&self, symbol: Option<&str>) -> ApiResult<Vec<Order>> {
        (**self).open_orders(symbol)
    }

    fn position_risk(&self, symbol: Option<&str>) -> ApiResult<Vec<Position>> {
        (**self).position_risk(symbol)
    }
}
