//! Core data types shared by the gateway, the REST client and the console
//!
//! Field names follow the exchange's JSON so that responses deserialize
//! straight into these types. Every price and quantity is a `Decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BotError;

/// Exchange-assigned order identifier
pub type OrderId = i64;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = BotError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            _ => Err(BotError::Validation(format!(
                "Side must be 'BUY' or 'SELL', got '{}'",
                s.trim()
            ))),
        }
    }
}

/// Order type as understood by the futures order endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Market,
    Limit,
    /// Stop-limit: rests as a limit order once `stopPrice` trades
    Stop,
    StopMarket,
    TakeProfit,
    TakeProfitMarket,
    TrailingStopMarket,
    #[serde(other)]
    Other,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::Stop => "STOP",
            OrderType::StopMarket => "STOP_MARKET",
            OrderType::TakeProfit => "TAKE_PROFIT",
            OrderType::TakeProfitMarket => "TAKE_PROFIT_MARKET",
            OrderType::TrailingStopMarket => "TRAILING_STOP_MARKET",
            OrderType::Other => "OTHER",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-in-force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good till cancelled
    #[default]
    GTC,
    /// Immediate or cancel
    IOC,
    /// Fill or kill
    FOK,
    /// Post only
    GTX,
    /// Good till date
    GTD,
    /// Reported on close-position conditional orders
    #[serde(rename = "GTE_GTC")]
    GteGtc,
    #[serde(other)]
    Other,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::GTC => "GTC",
            TimeInForce::IOC => "IOC",
            TimeInForce::FOK => "FOK",
            TimeInForce::GTX => "GTX",
            TimeInForce::GTD => "GTD",
            TimeInForce::GteGtc => "GTE_GTC",
            TimeInForce::Other => "OTHER",
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order status reported by the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    Rejected,
    Expired,
    ExpiredInMatch,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::PartiallyFilled => "PARTIALLY_FILLED",
            OrderStatus::Filled => "FILLED",
            OrderStatus::Canceled => "CANCELED",
            OrderStatus::Rejected => "REJECTED",
            OrderStatus::Expired => "EXPIRED",
            OrderStatus::ExpiredInMatch => "EXPIRED_IN_MATCH",
            OrderStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to create a new order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Decimal,
    /// Limit price (LIMIT and STOP orders)
    pub price: Option<Decimal>,
    /// Trigger price (STOP and STOP_MARKET orders)
    pub stop_price: Option<Decimal>,
    pub time_in_force: Option<TimeInForce>,
}

impl OrderRequest {
    pub fn market(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            stop_price: None,
            time_in_force: None,
        }
    }

    pub fn limit(
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        time_in_force: TimeInForce,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
            stop_price: None,
            time_in_force: Some(time_in_force),
        }
    }

    pub fn stop_limit(
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
        limit_price: Decimal,
        time_in_force: TimeInForce,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Stop,
            quantity,
            price: Some(limit_price),
            stop_price: Some(stop_price),
            time_in_force: Some(time_in_force),
        }
    }

    pub fn stop_market(
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::StopMarket,
            quantity,
            price: None,
            stop_price: Some(stop_price),
            time_in_force: None,
        }
    }

    /// Query parameters in the order the order endpoint documents them.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("symbol", self.symbol.clone()),
            ("side", self.side.to_string()),
            ("type", self.order_type.to_string()),
            ("quantity", self.quantity.normalize().to_string()),
        ];
        if let Some(price) = self.price {
            params.push(("price", price.normalize().to_string()));
        }
        if let Some(stop_price) = self.stop_price {
            params.push(("stopPrice", stop_price.normalize().to_string()));
        }
        if let Some(tif) = self.time_in_force {
            params.push(("timeInForce", tif.to_string()));
        }
        params
    }
}

/// Order record as returned by the exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub symbol: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub client_order_id: Option<String>,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default)]
    pub orig_qty: Decimal,
    #[serde(default)]
    pub executed_qty: Decimal,
    /// Zero for market orders
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub avg_price: Decimal,
    /// Zero unless the order has a trigger
    #[serde(default)]
    pub stop_price: Decimal,
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default)]
    pub update_time: Option<i64>,
}

impl Order {
    /// Limit price, `None` for market-style orders that carry a zero price.
    pub fn limit_price(&self) -> Option<Decimal> {
        (!self.price.is_zero()).then_some(self.price)
    }
}

/// Futures wallet balance for one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub asset: String,
    pub balance: Decimal,
    pub available_balance: Decimal,
}

/// Open position snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    /// Signed: positive is long, negative is short
    #[serde(rename = "positionAmt")]
    pub amount: Decimal,
    pub entry_price: Decimal,
    #[serde(rename = "unRealizedProfit")]
    pub unrealized_pnl: Decimal,
    pub leverage: Decimal,
}

impl Position {
    pub fn is_flat(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn direction(&self) -> &'static str {
        if self.amount.is_sign_negative() {
            "SHORT"
        } else {
            "LONG"
        }
    }
}

/// The two independently placed legs of an emulated one-cancels-other order.
///
/// The exchange does not link these orders. Filling one leaves the other live.
#[derive(Debug, Clone, PartialEq)]
pub struct OcoOrder {
    pub take_profit_order: Order,
    pub stop_loss_order: Order,
    /// Supplied or defaulted stop-limit price. Reported only; the stop-loss
    /// leg is a stop-market order and does not carry it.
    pub stop_limit_price: Decimal,
}

/// Default stop-limit price for the OCO emulation: one percent beyond the
/// stop trigger, below it when closing with a sell and above it when
/// closing with a buy.
///
/// Fails with `BotError::Validation` when the result does not fit a `Decimal`.
pub fn default_stop_limit_price(
    side: Side,
    stop_loss_price: Decimal,
) -> Result<Decimal, BotError> {
    let factor = match side {
        Side::Sell => dec!(0.99),
        Side::Buy => dec!(1.01),
    };
    stop_loss_price.checked_mul(factor).ok_or_else(|| {
        BotError::Validation(format!("Stop-loss price {} is out of range", stop_loss_price))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parse_is_case_insensitive() {
        assert_eq!("buy".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!("BuY".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!(" sell ".parse::<Side>().unwrap(), Side::Sell);
        assert_eq!("SELL".parse::<Side>().unwrap(), Side::Sell);
    }

    #[test]
    fn test_side_parse_rejects_other_values() {
        for bad in ["", "long", "short", "b", "BUYY", "SELL SELL"] {
            let err = bad.parse::<Side>().unwrap_err();
            assert!(matches!(err, BotError::Validation(_)), "{bad:?} gave {err:?}");
        }
    }

    #[test]
    fn test_default_stop_limit_price() {
        assert_eq!(default_stop_limit_price(Side::Sell, dec!(100)).unwrap(), dec!(99.0));
        assert_eq!(default_stop_limit_price(Side::Buy, dec!(100)).unwrap(), dec!(101.0));
        assert_eq!(
            default_stop_limit_price(Side::Sell, dec!(62500.5)).unwrap(),
            dec!(61875.495)
        );
    }

    #[test]
    fn test_default_stop_limit_price_overflow_is_validation_error() {
        let err = default_stop_limit_price(Side::Buy, Decimal::MAX).unwrap_err();
        assert!(matches!(err, BotError::Validation(_)), "{err:?}");
    }

    #[test]
    fn test_market_request_params() {
        let request = OrderRequest::market("BTCUSDT", Side::Buy, dec!(0.010));
        assert_eq!(
            request.to_params(),
            vec![
                ("symbol", "BTCUSDT".to_string()),
                ("side", "BUY".to_string()),
                ("type", "MARKET".to_string()),
                ("quantity", "0.01".to_string()),
            ]
        );
    }

    #[test]
    fn test_stop_limit_request_params() {
        let request = OrderRequest::stop_limit(
            "ETHUSDT",
            Side::Sell,
            dec!(1),
            dec!(3000),
            dec!(2990.5),
            TimeInForce::GTC,
        );
        let params = request.to_params();
        assert!(params.contains(&("type", "STOP".to_string())));
        assert!(params.contains(&("price", "2990.5".to_string())));
        assert!(params.contains(&("stopPrice", "3000".to_string())));
        assert!(params.contains(&("timeInForce", "GTC".to_string())));
    }

    #[test]
    fn test_stop_market_has_no_limit_price() {
        let request = OrderRequest::stop_market("BTCUSDT", Side::Sell, dec!(0.5), dec!(58000));
        let params = request.to_params();
        assert!(params.iter().all(|(k, _)| *k != "price" && *k != "timeInForce"));
        assert!(params.contains(&("type", "STOP_MARKET".to_string())));
    }

    #[test]
    fn test_order_deserializes_exchange_payload() {
        let json = r#"{
            "orderId": 4057523481,
            "symbol": "BTCUSDT",
            "status": "NEW",
            "clientOrderId": "x-abc",
            "price": "0.00",
            "avgPrice": "0.00",
            "origQty": "0.010",
            "executedQty": "0.000",
            "cumQuote": "0.00",
            "timeInForce": "GTC",
            "type": "MARKET",
            "reduceOnly": false,
            "side": "BUY",
            "stopPrice": "0.00",
            "workingType": "CONTRACT_PRICE",
            "updateTime": 1700000000000
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_id, 4057523481);
        assert_eq!(order.order_type, OrderType::Market);
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.orig_qty, dec!(0.01));
        assert_eq!(order.limit_price(), None);
    }

    #[test]
    fn test_unknown_status_and_type_do_not_fail() {
        let json =
            r#"{"orderId":1,"symbol":"X","status":"NEW_ADL","side":"SELL","type":"LIQUIDATION"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Unknown);
        assert_eq!(order.order_type, OrderType::Other);
    }

    #[test]
    fn test_close_position_time_in_force_decodes() {
        let json = r#"[
            {"orderId":21,"symbol":"BTCUSDT","status":"NEW","side":"SELL",
             "type":"STOP_MARKET","timeInForce":"GTE_GTC","stopPrice":"58000",
             "closePosition":true},
            {"orderId":22,"symbol":"BTCUSDT","status":"NEW","side":"SELL",
             "type":"LIMIT","timeInForce":"RPI","price":"70000"}
        ]"#;
        let orders: Vec<Order> = serde_json::from_str(json).unwrap();
        assert_eq!(orders[0].time_in_force, Some(TimeInForce::GteGtc));
        assert_eq!(orders[0].stop_price, dec!(58000));
        assert_eq!(orders[1].time_in_force, Some(TimeInForce::Other));
    }

    #[test]
    fn test_position_deserializes_and_reports_direction() {
        let json = r#"{
            "symbol": "ETHUSDT",
            "positionAmt": "-2.000",
            "entryPrice": "3100.5",
            "markPrice": "3090.0",
            "unRealizedProfit": "21.00000000",
            "liquidationPrice": "0",
            "leverage": "20",
            "marginType": "cross"
        }"#;
        let position: Position = serde_json::from_str(json).unwrap();
        assert_eq!(position.amount, dec!(-2));
        assert_eq!(position.leverage, dec!(20));
        assert_eq!(position.direction(), "SHORT");
        assert!(!position.is_flat());
    }
}
