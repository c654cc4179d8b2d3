//! Recording `FuturesApi` double shared by the integration tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use futures_testnet_bot::exchange::{ApiResult, FuturesApi};
use futures_testnet_bot::{
    ApiError, Balance, Order, OrderId, OrderRequest, OrderStatus, OrderType, Position, Side,
};

/// One recorded call against the double
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Ping,
    Balances,
    Ticker(String),
    CreateOrder(OrderRequest),
    QueryOrder(String, OrderId),
    CancelOrder(String, OrderId),
    OpenOrders(Option<String>),
    Positions(Option<String>),
}

pub struct MockApi {
    calls: RefCell<Vec<Call>>,
    placed: RefCell<Vec<Order>>,
    next_id: Cell<OrderId>,
    fail_ping: bool,
    reject_credentials: bool,
    /// 1-based index of the create_order call that fails
    fail_create_at: Option<usize>,
    price: Decimal,
    balances: Vec<Balance>,
    positions: Vec<Position>,
    open_orders: Vec<Order>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            placed: RefCell::new(Vec::new()),
            next_id: Cell::new(1001),
            fail_ping: false,
            reject_credentials: false,
            fail_create_at: None,
            price: dec!(64000.50),
            balances: vec![balance("USDT", dec!(15000), dec!(14250.5))],
            positions: Vec::new(),
            open_orders: Vec::new(),
        }
    }

    pub fn failing_ping(mut self) -> Self {
        self.fail_ping = true;
        self
    }

    pub fn rejecting_credentials(mut self) -> Self {
        self.reject_credentials = true;
        self
    }

    pub fn failing_create_at(mut self, nth: usize) -> Self {
        self.fail_create_at = Some(nth);
        self
    }

    pub fn with_balances(mut self, balances: Vec<Balance>) -> Self {
        self.balances = balances;
        self
    }

    pub fn with_positions(mut self, positions: Vec<Position>) -> Self {
        self.positions = positions;
        self
    }

    pub fn with_open_orders(mut self, orders: Vec<Order>) -> Self {
        self.open_orders = orders;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Forget the connect handshake so tests only see what they triggered
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn created(&self) -> Vec<OrderRequest> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::CreateOrder(req) => Some(req.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn cancels(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::CancelOrder(..)))
            .count()
    }

    /// Calls that change exchange state
    pub fn submissions(&self) -> usize {
        self.created().len() + self.cancels()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn find_placed(&self, symbol: &str, order_id: OrderId) -> ApiResult<Order> {
        self.placed
            .borrow()
            .iter()
            .chain(self.open_orders.iter())
            .find(|o| o.order_id == order_id && o.symbol == symbol)
            .cloned()
            .ok_or_else(|| ApiError::new(Some(-2013), "Order does not exist."))
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl FuturesApi for MockApi {
    fn ping(&self) -> ApiResult<()> {
        self.record(Call::Ping);
        if self.fail_ping {
            return Err(ApiError::new(None, "request failed: connection refused"));
        }
        Ok(())
    }

    fn account_balances(&self) -> ApiResult<Vec<Balance>> {
        self.record(Call::Balances);
        if self.reject_credentials {
            return Err(ApiError::new(
                Some(-2015),
                "Invalid API-key, IP, or permissions for action.",
            ));
        }
        Ok(self.balances.clone())
    }

    fn ticker_price(&self, symbol: &str) -> ApiResult<Decimal> {
        self.record(Call::Ticker(symbol.to_string()));
        if symbol == "NOPEUSDT" {
            return Err(ApiError::new(Some(-1121), "Invalid symbol."));
        }
        Ok(self.price)
    }

    fn create_order(&self, request: &OrderRequest) -> ApiResult<Order> {
        self.record(Call::CreateOrder(request.clone()));
        if Some(self.created().len()) == self.fail_create_at {
            return Err(ApiError::new(Some(-2021), "Order would immediately trigger."));
        }

        let order_id = self.next_id.get();
        self.next_id.set(order_id + 1);
        let mut placed = order(order_id, &request.symbol, request.side, request.order_type);
        placed.orig_qty = request.quantity;
        placed.price = request.price.unwrap_or(Decimal::ZERO);
        placed.stop_price = request.stop_price.unwrap_or(Decimal::ZERO);
        placed.time_in_force = request.time_in_force;
        self.placed.borrow_mut().push(placed.clone());
        Ok(placed)
    }

    fn query_order(&self, symbol: &str, order_id: OrderId) -> ApiResult<Order> {
        self.record(Call::QueryOrder(symbol.to_string(), order_id));
        self.find_placed(symbol, order_id)
    }

    fn cancel_order(&self, symbol: &str, order_id: OrderId) -> ApiResult<Order> {
        self.record(Call::CancelOrder(symbol.to_string(), order_id));
        let mut order = self.find_placed(symbol, order_id)?;
        order.status = OrderStatus::Canceled;
        Ok(order)
    }

    fn open_orders(&self, symbol: Option<&str>) -> ApiResult<Vec<Order>> {
        self.record(Call::OpenOrders(symbol.map(str::to_string)));
        Ok(self
            .open_orders
            .iter()
            .filter(|o| symbol.map_or(true, |s| o.symbol == s))
            .cloned()
            .collect())
    }

    fn position_risk(&self, symbol: Option<&str>) -> ApiResult<Vec<Position>> {
        self.record(Call::Positions(symbol.map(str::to_string)));
        Ok(self
            .positions
            .iter()
            .filter(|p| symbol.map_or(true, |s| p.symbol == s))
            .cloned()
            .collect())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn order(order_id: OrderId, symbol: &str, side: Side, order_type: OrderType) -> Order {
    Order {
        order_id,
        symbol: symbol.to_string(),
        status: OrderStatus::New,
        client_order_id: None,
        side,
        order_type,
        orig_qty: Decimal::ZERO,
        executed_qty: Decimal::ZERO,
        price: Decimal::ZERO,
        avg_price: Decimal::ZERO,
        stop_price: Decimal::ZERO,
        time_in_force: None,
        update_time: None,
    }
}

pub fn balance(asset: &str, total: Decimal, available: Decimal) -> Balance {
    Balance {
        asset: asset.to_string(),
        balance: total,
        available_balance: available,
    }
}

pub fn position(symbol: &str, amount: Decimal) -> Position {
    Position {
        symbol: symbol.to_string(),
        amount,
        entry_price: dec!(3100.5),
        unrealized_pnl: dec!(21.4),
        leverage: dec!(20),
    }
}
