//! Exchange gateway
//!
//! Translates operator intents into exchange calls and normalizes failures
//! into [`BotError`]. Side validation is the only rule enforced locally;
//! price sanity, quantity precision and margin checks belong to the exchange.
//!
//! Every call logs its attempt, its outcome (order id or item count) and, on
//! failure, the exchange's message.

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::binance::{Credentials, FuturesClient};
use crate::config::ExchangeConfig;
use crate::error::{ApiError, BotError, BotResult};
use crate::exchange::FuturesApi;
use crate::types::{
    default_stop_limit_price, Balance, OcoOrder, Order, OrderId, OrderRequest, Position, Side,
    TimeInForce,
};

/// Authenticated session plus the operations the console offers
pub struct ExchangeGateway<A> {
    api: A,
}

impl ExchangeGateway<FuturesClient> {
    /// Open a session against the configured endpoint and verify it.
    pub fn connect(credentials: Credentials, config: &ExchangeConfig) -> BotResult<Self> {
        if !credentials.is_complete() {
            return Err(BotError::Connection(
                "API key and secret are required".to_string(),
            ));
        }

        let base_url = config.base_url();
        if config.testnet {
            info!("Initialized gateway with TESTNET configuration ({})", base_url);
        } else {
            warn!("Initialized gateway with LIVE trading ({}) - USE WITH CAUTION!", base_url);
        }

        let client = FuturesClient::new(credentials, base_url, config.client_config())
            .map_err(|e| BotError::Connection(e.to_string()))?;
        Self::connect_with(client)
    }
}

impl<A: FuturesApi> ExchangeGateway<A> {
    /// Wrap an API handle after a liveness ping and a signed credential check.
    pub fn connect_with(api: A) -> BotResult<Self> {
        api.ping().map_err(|e| {
            error!("Failed to connect to API: {}", e);
            BotError::Connection(format!("ping failed: {}", e))
        })?;

        api.account_balances().map_err(|e| {
            error!("Credentials rejected: {}", e);
            BotError::Connection(format!("credentials rejected: {}", e))
        })?;

        info!("Successfully connected to futures API");
        Ok(Self { api })
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn get_balances(&self) -> BotResult<Vec<Balance>> {
        let balances = self
            .api
            .account_balances()
            .map_err(|e| api_failure("getting balance", e))?;
        info!("Retrieved account balance ({} assets)", balances.len());
        Ok(balances)
    }

    pub fn get_price(&self, symbol: &str) -> BotResult<Decimal> {
        let price = self
            .api
            .ticker_price(symbol)
            .map_err(|e| api_failure("getting price", e))?;
        info!("{} price: {}", symbol, price);
        Ok(price)
    }

    pub fn place_market_order(
        &self,
        symbol: &str,
        side: &str,
        quantity: Decimal,
    ) -> BotResult<Order> {
        let side: Side = side.parse()?;
        info!("Placing MARKET {} order: {} {}", side, quantity, symbol);

        let order = self
            .api
            .create_order(&OrderRequest::market(symbol, side, quantity))
            .map_err(|e| api_failure("placing market order", e))?;
        info!("Market order placed successfully: OrderID={}", order.order_id);
        Ok(order)
    }

    pub fn place_limit_order(
        &self,
        symbol: &str,
        side: &str,
        quantity: Decimal,
        price: Decimal,
        time_in_force: TimeInForce,
    ) -> BotResult<Order> {
        let side: Side = side.parse()?;
        info!("Placing LIMIT {} order: {} {} @ {}", side, quantity, symbol, price);

        let request = OrderRequest::limit(symbol, side, quantity, price, time_in_force);
        let order = self
            .api
            .create_order(&request)
            .map_err(|e| api_failure("placing limit order", e))?;
        info!("Limit order placed successfully: OrderID={}", order.order_id);
        Ok(order)
    }

    pub fn place_stop_limit_order(
        &self,
        symbol: &str,
        side: &str,
        quantity: Decimal,
        stop_price: Decimal,
        limit_price: Decimal,
        time_in_force: TimeInForce,
    ) -> BotResult<Order> {
        let side: Side = side.parse()?;
        info!(
            "Placing STOP_LIMIT {} order: {} {}, stop @ {}, limit @ {}",
            side, quantity, symbol, stop_price, limit_price
        );

        let request = OrderRequest::stop_limit(
            symbol,
            side,
            quantity,
            stop_price,
            limit_price,
            time_in_force,
        );
        let order = self
            .api
            .create_order(&request)
            .map_err(|e| api_failure("placing stop-limit order", e))?;
        info!("Stop-limit order placed successfully: OrderID={}", order.order_id);
        Ok(order)
    }

    /// Emulated one-cancels-other: a take-profit LIMIT order followed by a
    /// stop-loss STOP_MARKET order, both on `side` (the side that closes the
    /// position).
    ///
    /// The two submissions are independent. If the take-profit fails the
    /// stop-loss is never sent. If the stop-loss fails the take-profit stays
    /// live and is returned inside the error as `ApiError::left_open`; no
    /// compensating cancel is issued. Once both are placed, nothing cancels
    /// one leg when the other fills.
    pub fn place_oco_emulated(
        &self,
        symbol: &str,
        side: &str,
        quantity: Decimal,
        take_profit_price: Decimal,
        stop_loss_price: Decimal,
        stop_limit_price: Option<Decimal>,
    ) -> BotResult<OcoOrder> {
        let side: Side = side.parse()?;
        let stop_limit_price = match stop_limit_price {
            Some(price) => price,
            None => default_stop_limit_price(side, stop_loss_price)?,
        };

        info!(
            "Placing OCO {} order: {} {}, TP @ {}, SL @ {} (stop-limit reference {})",
            side, quantity, symbol, take_profit_price, stop_loss_price, stop_limit_price
        );

        let take_profit =
            OrderRequest::limit(symbol, side, quantity, take_profit_price, TimeInForce::GTC);
        let take_profit_order = self
            .api
            .create_order(&take_profit)
            .map_err(|e| api_failure("placing OCO take-profit leg", e))?;
        info!("Take-profit order placed: OrderID={}", take_profit_order.order_id);

        let stop_loss = OrderRequest::stop_market(symbol, side, quantity, stop_loss_price);
        let stop_loss_order = match self.api.create_order(&stop_loss) {
            Ok(order) => order,
            Err(e) => {
                error!(
                    "OCO stop-loss leg failed: {}. Take-profit order {} on {} REMAINS OPEN \
                     without a stop-loss",
                    e, take_profit_order.order_id, symbol
                );
                return Err(BotError::Api(e.with_left_open(take_profit_order)));
            }
        };
        info!("Stop-loss order placed: OrderID={}", stop_loss_order.order_id);
        warn!(
            "OCO legs {} and {} are not linked on the exchange; \
             cancel the survivor manually when one fills",
            take_profit_order.order_id, stop_loss_order.order_id
        );

        Ok(OcoOrder {
            take_profit_order,
            stop_loss_order,
            stop_limit_price,
        })
    }

    pub fn get_order_status(&self, symbol: &str, order_id: OrderId) -> BotResult<Order> {
        let order = self
            .api
            .query_order(symbol, order_id)
            .map_err(|e| api_failure("getting order status", e))?;
        info!("Order {} status: {}", order_id, order.status);
        Ok(order)
    }

    pub fn cancel_order(&self, symbol: &str, order_id: OrderId) -> BotResult<Order> {
        info!("Cancelling order {} on {}", order_id, symbol);
        let order = self
            .api
            .cancel_order(symbol, order_id)
            .map_err(|e| api_failure("cancelling order", e))?;
        info!("Order {} cancelled successfully", order_id);
        Ok(order)
    }

    pub fn get_open_orders(&self, symbol: Option<&str>) -> BotResult<Vec<Order>> {
        let orders = self
            .api
            .open_orders(symbol)
            .map_err(|e| api_failure("getting open orders", e))?;
        info!("Retrieved {} open orders", orders.len());
        Ok(orders)
    }

    /// Positions with a non-zero amount, for one symbol or all of them
    pub fn get_positions(&self, symbol: Option<&str>) -> BotResult<Vec<Position>> {
        let positions: Vec<Position> = self
            .api
            .position_risk(symbol)
            .map_err(|e| api_failure("getting positions", e))?
            .into_iter()
            .filter(|p| !p.is_flat())
            .collect();
        info!("Retrieved {} active positions", positions.len());
        Ok(positions)
    }
}

fn api_failure(action: &str, err: ApiError) -> BotError {
    error!("API error {}: {}", action, err);
    BotError::Api(err)
}
