//! Operator console
//!
//! A numbered menu loop. Each cycle collects the fields for one action,
//! asks for confirmation where the action changes exchange state, calls the
//! gateway and renders the result. A failed action is rendered and the loop
//! continues; only `0` (or closed input) ends it.

pub mod prompt;
pub mod theme;

use console::Style;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

use crate::binance::Credentials;
use crate::error::BotError;
use crate::exchange::FuturesApi;
use crate::gateway::ExchangeGateway;
use crate::types::{Order, OrderId, OrderStatus, Side, TimeInForce};

pub use prompt::{Confirmation, ConsoleError};
pub use theme::Theme;

const WIDE: usize = 70;
const EXTRA_WIDE: usize = 90;

/// Console behavior switches
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    /// Fetch and show the current price after the symbol is entered. Off by
    /// default: with it on, a declined order still costs one ticker call.
    pub price_preview: bool,
    /// Drives the header banner only
    pub testnet: bool,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            price_preview: false,
            testnet: true,
        }
    }
}

/// Menu entries, numbered as shown to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    MarketOrder,
    LimitOrder,
    StopLimitOrder,
    OcoOrder,
    Balance,
    OpenOrders,
    Positions,
    CancelOrder,
    OrderStatus,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 10] = [
        MenuChoice::MarketOrder,
        MenuChoice::LimitOrder,
        MenuChoice::StopLimitOrder,
        MenuChoice::OcoOrder,
        MenuChoice::Balance,
        MenuChoice::OpenOrders,
        MenuChoice::Positions,
        MenuChoice::CancelOrder,
        MenuChoice::OrderStatus,
        MenuChoice::Exit,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(MenuChoice::MarketOrder),
            "2" => Some(MenuChoice::LimitOrder),
            "3" => Some(MenuChoice::StopLimitOrder),
            "4" => Some(MenuChoice::OcoOrder),
            "5" => Some(MenuChoice::Balance),
            "6" => Some(MenuChoice::OpenOrders),
            "7" => Some(MenuChoice::Positions),
            "8" => Some(MenuChoice::CancelOrder),
            "9" => Some(MenuChoice::OrderStatus),
            "0" => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    pub fn key(&self) -> char {
        match self {
            MenuChoice::MarketOrder => '1',
            MenuChoice::LimitOrder => '2',
            MenuChoice::StopLimitOrder => '3',
            MenuChoice::OcoOrder => '4',
            MenuChoice::Balance => '5',
            MenuChoice::OpenOrders => '6',
            MenuChoice::Positions => '7',
            MenuChoice::CancelOrder => '8',
            MenuChoice::OrderStatus => '9',
            MenuChoice::Exit => '0',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::MarketOrder => "Place Market Order",
            MenuChoice::LimitOrder => "Place Limit Order",
            MenuChoice::StopLimitOrder => "Place Stop-Limit Order",
            MenuChoice::OcoOrder => "Place OCO Order (Take-Profit + Stop-Loss)",
            MenuChoice::Balance => "Check Account Balance",
            MenuChoice::OpenOrders => "View Open Orders",
            MenuChoice::Positions => "View Open Positions",
            MenuChoice::CancelOrder => "Cancel Order",
            MenuChoice::OrderStatus => "Check Order Status",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// How a menu action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The gateway was called and the result rendered
    Completed,
    /// The operator declined confirmation; nothing was submitted
    Aborted,
}

pub struct OperatorConsole<A, R, W> {
    gateway: ExchangeGateway<A>,
    input: R,
    output: W,
    theme: Theme,
    options: ConsoleOptions,
}

impl<A, R, W> OperatorConsole<A, R, W>
where
    A: FuturesApi,
    R: BufRead,
    W: Write,
{
    pub fn new(
        gateway: ExchangeGateway<A>,
        input: R,
        output: W,
        theme: Theme,
        options: ConsoleOptions,
    ) -> Self {
        Self {
            gateway,
            input,
            output,
            theme,
            options,
        }
    }

    pub fn gateway(&self) -> &ExchangeGateway<A> {
        &self.gateway
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Menu loop. Returns when the operator exits or input closes; an error
    /// only for terminal I/O failure.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        loop {
            self.print_header()?;
            self.print_menu()?;

            let raw = match self.ask("\nSelect option (0-9): ") {
                Ok(raw) => raw,
                Err(ConsoleError::EndOfInput) => return Ok(()),
                Err(e) => return Err(e),
            };

            match MenuChoice::parse(&raw) {
                Some(MenuChoice::Exit) => {
                    writeln!(
                        self.output,
                        "\n{}\n",
                        self.theme.success.apply_to("Thanks for trading! Stay profitable!")
                    )?;
                    return Ok(());
                }
                Some(choice) => match self.execute(choice) {
                    Ok(_) => {}
                    Err(ConsoleError::Bot(e)) => self.render_error(&e)?,
                    Err(ConsoleError::EndOfInput) => return Ok(()),
                    Err(e) => return Err(e),
                },
                None => {
                    writeln!(
                        self.output,
                        "\n{}",
                        self.theme.failure.apply_to("Invalid option. Please try again.")
                    )?;
                }
            }

            match self.ask("\nPress Enter to continue...") {
                Ok(_) => {}
                Err(ConsoleError::EndOfInput) => return Ok(()),
                Err(e) => return Err(e),
            }
        }
    }

    /// Run one menu action
    pub fn execute(&mut self, choice: MenuChoice) -> Result<Outcome, ConsoleError> {
        match choice {
            MenuChoice::MarketOrder => self.market_order(),
            MenuChoice::LimitOrder => self.limit_order(),
            MenuChoice::StopLimitOrder => self.stop_limit_order(),
            MenuChoice::OcoOrder => self.oco_order(),
            MenuChoice::Balance => self.show_balance(),
            MenuChoice::OpenOrders => self.show_open_orders(),
            MenuChoice::Positions => self.show_positions(),
            MenuChoice::CancelOrder => self.cancel_order(),
            MenuChoice::OrderStatus => self.show_order_status(),
            MenuChoice::Exit => Ok(Outcome::Completed),
        }
    }

    // ==================== ORDER ENTRY ====================

    fn market_order(&mut self) -> Result<Outcome, ConsoleError> {
        let title = self.theme.success.clone();
        self.title(&title, "MARKET ORDER")?;

        let symbol = self.ask_symbol()?;
        self.preview_price(&symbol)?;
        let side = self.ask_side("Side (BUY/SELL): ")?;
        let quantity = self.ask_decimal("Quantity")?;

        writeln!(
            self.output,
            "\n{} {} {} {}",
            self.theme.emphasis.apply_to("Confirm:"),
            self.theme.side(side.as_str()).apply_to(format!("MARKET {}", side)),
            quantity,
            symbol
        )?;
        if self.confirm("Proceed? (y/n): ")? == Confirmation::Declined {
            return self.aborted("Order not submitted.");
        }

        let order = self
            .gateway
            .place_market_order(&symbol, side.as_str(), quantity)?;
        self.order_placed(&order)
    }

    fn limit_order(&mut self) -> Result<Outcome, ConsoleError> {
        let title = self.theme.info.clone();
        self.title(&title, "LIMIT ORDER")?;

        let symbol = self.ask_symbol()?;
        self.preview_price(&symbol)?;
        let side = self.ask_side("Side (BUY/SELL): ")?;
        let quantity = self.ask_decimal("Quantity")?;
        let price = self.ask_decimal("Limit Price")?;

        writeln!(
            self.output,
            "\n{} {} {} {} @ {}",
            self.theme.emphasis.apply_to("Confirm:"),
            self.theme.side(side.as_str()).apply_to(format!("LIMIT {}", side)),
            quantity,
            symbol,
            price
        )?;
        if self.confirm("Proceed? (y/n): ")? == Confirmation::Declined {
            return self.aborted("Order not submitted.");
        }

        let order = self.gateway.place_limit_order(
            &symbol,
            side.as_str(),
            quantity,
            price,
            TimeInForce::GTC,
        )?;
        self.order_placed(&order)
    }

    fn stop_limit_order(&mut self) -> Result<Outcome, ConsoleError> {
        let title = self.theme.warning.clone();
        self.title(&title, "STOP-LIMIT ORDER")?;

        let symbol = self.ask_symbol()?;
        self.preview_price(&symbol)?;
        let side = self.ask_side("Side (BUY/SELL): ")?;
        let quantity = self.ask_decimal("Quantity")?;
        let stop_price = self.ask_decimal("Stop Price")?;
        let limit_price = self.ask_decimal("Limit Price")?;

        writeln!(
            self.output,
            "\n{} {} {} {}",
            self.theme.emphasis.apply_to("Confirm:"),
            self.theme.side(side.as_str()).apply_to(format!("STOP-LIMIT {}", side)),
            quantity,
            symbol
        )?;
        writeln!(self.output, "Stop @ {}, Limit @ {}", stop_price, limit_price)?;
        if self.confirm("Proceed? (y/n): ")? == Confirmation::Declined {
            return self.aborted("Order not submitted.");
        }

        let order = self.gateway.place_stop_limit_order(
            &symbol,
            side.as_str(),
            quantity,
            stop_price,
            limit_price,
            TimeInForce::GTC,
        )?;
        self.order_placed(&order)
    }

    fn oco_order(&mut self) -> Result<Outcome, ConsoleError> {
        let title = self.theme.accent.clone();
        self.title(&title, "OCO ORDER (One-Cancels-Other)")?;
        writeln!(
            self.output,
            "{}",
            self.theme
                .warning
                .apply_to("Places a take-profit limit order and a stop-loss stop-market order.")
        )?;
        writeln!(
            self.output,
            "{}\n",
            self.theme.warning.apply_to(
                "The legs are NOT linked: cancel the remaining one yourself when the other fills."
            )
        )?;

        let symbol = self.ask_symbol()?;
        self.preview_price(&symbol)?;
        let side = self.ask_side("Side to CLOSE position (BUY/SELL): ")?;
        let quantity = self.ask_decimal("Quantity")?;
        let take_profit = self.ask_decimal("Take-Profit Price")?;
        let stop_loss = self.ask_decimal("Stop-Loss Price")?;

        writeln!(self.output, "\n{}", self.theme.emphasis.apply_to("Confirm OCO Order:"))?;
        writeln!(
            self.output,
            "  {} {} {}",
            self.theme.side(side.as_str()).apply_to(side),
            quantity,
            symbol
        )?;
        writeln!(
            self.output,
            "  {}",
            self.theme.success.apply_to(format!("Take-Profit: {}", take_profit))
        )?;
        writeln!(
            self.output,
            "  {}",
            self.theme.failure.apply_to(format!("Stop-Loss: {}", stop_loss))
        )?;
        if self.confirm("\nProceed? (y/n): ")? == Confirmation::Declined {
            return self.aborted("Order not submitted.");
        }

        let oco = self.gateway.place_oco_emulated(
            &symbol,
            side.as_str(),
            quantity,
            take_profit,
            stop_loss,
            None,
        )?;

        writeln!(
            self.output,
            "\n{}",
            self.theme.success.apply_to("OCO Order placed successfully!")
        )?;
        writeln!(self.output, "Take-Profit Order ID: {}", oco.take_profit_order.order_id)?;
        writeln!(self.output, "Stop-Loss Order ID: {}", oco.stop_loss_order.order_id)?;
        writeln!(self.output, "Stop-limit reference: {}", oco.stop_limit_price)?;
        Ok(Outcome::Completed)
    }

    fn cancel_order(&mut self) -> Result<Outcome, ConsoleError> {
        let title = self.theme.failure.clone();
        self.title(&title, "CANCEL ORDER")?;

        let symbol = self.ask_symbol_plain()?;
        let order_id = self.ask_order_id()?;

        let question = format!("\nConfirm cancel order {}? (y/n): ", order_id);
        if self.confirm(&question)? == Confirmation::Declined {
            return self.aborted("Cancellation aborted.");
        }

        let order = self.gateway.cancel_order(&symbol, order_id)?;
        writeln!(
            self.output,
            "\n{}",
            self.theme.success.apply_to("Order cancelled successfully!")
        )?;
        writeln!(self.output, "Order ID: {} | Status: {}", order.order_id, order.status)?;
        Ok(Outcome::Completed)
    }

    // ==================== VIEWS ====================

    fn show_balance(&mut self) -> Result<Outcome, ConsoleError> {
        let balances = self.gateway.get_balances()?;

        let title = self.theme.success.clone();
        self.banner(&title, "ACCOUNT BALANCE", WIDE)?;
        writeln!(self.output, "  {:<10} {:<20} {:<20}", "Asset", "Balance", "Available")?;
        writeln!(self.output, "  {}", "-".repeat(50))?;

        for asset in balances.iter().filter(|b| b.balance > Decimal::ZERO) {
            writeln!(
                self.output,
                "  {:<10} {:<20} {:<20}",
                asset.asset,
                format!("{:.8}", asset.balance),
                format!("{:.8}", asset.available_balance)
            )?;
        }

        self.rule(WIDE)?;
        Ok(Outcome::Completed)
    }

    fn show_open_orders(&mut self) -> Result<Outcome, ConsoleError> {
        let raw = self.ask("\nSymbol (leave blank for all): ")?;
        let symbol = prompt::normalize_symbol(&raw);
        let filter = (!symbol.is_empty()).then_some(symbol.as_str());

        let orders = self.gateway.get_open_orders(filter)?;
        if orders.is_empty() {
            writeln!(
                self.output,
                "\n{}",
                self.theme.warning.apply_to("No open orders found.")
            )?;
            return Ok(Outcome::Completed);
        }

        let title = self.theme.info.clone();
        self.banner(&title, "OPEN ORDERS", EXTRA_WIDE)?;
        for order in &orders {
            let style = self.theme.side(order.side.as_str()).clone();
            writeln!(self.output, "  {} {}", style.apply_to("Order ID:"), order.order_id)?;
            writeln!(
                self.output,
                "  Symbol: {} | Side: {} | Type: {}",
                order.symbol,
                style.apply_to(order.side),
                order.order_type
            )?;
            writeln!(
                self.output,
                "  Quantity: {} | Price: {}",
                order.orig_qty,
                price_label(order)
            )?;
            writeln!(self.output, "  Status: {}", order.status)?;
            writeln!(self.output, "  {}", "-".repeat(EXTRA_WIDE - 4))?;
        }
        self.rule(EXTRA_WIDE)?;
        Ok(Outcome::Completed)
    }

    fn show_positions(&mut self) -> Result<Outcome, ConsoleError> {
        let positions = self.gateway.get_positions(None)?;
        if positions.is_empty() {
            writeln!(self.output, "\n{}", self.theme.warning.apply_to("No open positions."))?;
            return Ok(Outcome::Completed);
        }

        let title = self.theme.accent.clone();
        self.banner(&title, "OPEN POSITIONS", EXTRA_WIDE)?;
        for position in &positions {
            let style = if position.amount.is_sign_negative() {
                self.theme.failure.clone()
            } else {
                self.theme.success.clone()
            };
            writeln!(
                self.output,
                "  {} {} | {}",
                style.apply_to("Symbol:"),
                position.symbol,
                style.apply_to(position.direction())
            )?;
            writeln!(
                self.output,
                "  Amount: {} | Entry Price: {}",
                position.amount.abs(),
                position.entry_price
            )?;
            writeln!(self.output, "  Unrealized PnL: {:.2} USDT", position.unrealized_pnl)?;
            writeln!(self.output, "  Leverage: {}x", position.leverage)?;
            writeln!(self.output, "  {}", "-".repeat(EXTRA_WIDE - 4))?;
        }
        self.rule(EXTRA_WIDE)?;
        Ok(Outcome::Completed)
    }

    fn show_order_status(&mut self) -> Result<Outcome, ConsoleError> {
        let title = self.theme.info.clone();
        self.title(&title, "CHECK ORDER STATUS")?;

        let symbol = self.ask_symbol_plain()?;
        let order_id = self.ask_order_id()?;
        let order = self.gateway.get_order_status(&symbol, order_id)?;

        let title = self.theme.emphasis.clone();
        self.banner(&title, "ORDER STATUS", WIDE)?;
        let status_style = if order.status == OrderStatus::Filled {
            &self.theme.success
        } else {
            &self.theme.warning
        };
        writeln!(self.output, "  Status: {}", status_style.apply_to(order.status))?;
        writeln!(self.output, "  Order ID: {}", order.order_id)?;
        writeln!(self.output, "  Symbol: {}", order.symbol)?;
        writeln!(self.output, "  Side: {} {}", order.side, order.order_type)?;
        writeln!(self.output, "  Executed: {}/{}", order.executed_qty, order.orig_qty)?;
        writeln!(self.output, "  Price: {}", price_label(&order))?;
        self.rule(WIDE)?;
        Ok(Outcome::Completed)
    }

    // ==================== RENDERING ====================

    fn print_header(&mut self) -> Result<(), ConsoleError> {
        let rule = "=".repeat(WIDE);
        writeln!(self.output, "\n{}", self.theme.accent.apply_to(&rule))?;
        writeln!(
            self.output,
            "{}",
            self.theme
                .accent
                .apply_to("           BINANCE FUTURES TESTNET TRADING BOT")
        )?;
        writeln!(self.output, "{}\n", self.theme.accent.apply_to(&rule))?;
        if self.options.testnet {
            writeln!(
                self.output,
                "{}",
                self.theme.warning.apply_to("TESTNET MODE - No real money involved")
            )?;
        } else {
            writeln!(
                self.output,
                "{}",
                self.theme.failure.apply_to("LIVE MODE - REAL MONEY AT RISK")
            )?;
        }
        writeln!(
            self.output,
            "{}",
            self.theme
                .info
                .apply_to(chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
        )?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<(), ConsoleError> {
        let title = self.theme.header.clone();
        self.banner(&title, "MAIN MENU", WIDE)?;
        for choice in MenuChoice::ALL {
            let style = match choice {
                MenuChoice::MarketOrder | MenuChoice::Balance => &self.theme.success,
                MenuChoice::LimitOrder | MenuChoice::OpenOrders | MenuChoice::OrderStatus => {
                    &self.theme.info
                }
                MenuChoice::StopLimitOrder => &self.theme.warning,
                MenuChoice::OcoOrder | MenuChoice::Positions => &self.theme.accent,
                MenuChoice::CancelOrder | MenuChoice::Exit => &self.theme.failure,
            };
            writeln!(
                self.output,
                "  {} {}",
                style.apply_to(format!("{}.", choice.key())),
                choice.label()
            )?;
        }
        self.rule(WIDE)
    }

    fn render_error(&mut self, err: &BotError) -> Result<(), ConsoleError> {
        writeln!(
            self.output,
            "{}",
            self.theme.failure.apply_to(format!("Error: {}", err))
        )?;
        if let Some(order) = err.as_api().and_then(|api| api.left_open.as_deref()) {
            writeln!(
                self.output,
                "{}",
                self.theme.warning.apply_to(format!(
                    "Order {} ({} {} @ {}) was placed and is still open. \
                     Cancel it if it is no longer wanted.",
                    order.order_id,
                    order.order_type,
                    order.symbol,
                    price_label(order)
                ))
            )?;
        }
        Ok(())
    }

    fn order_placed(&mut self, order: &Order) -> Result<Outcome, ConsoleError> {
        writeln!(
            self.output,
            "\n{}",
            self.theme.success.apply_to("Order placed successfully!")
        )?;
        writeln!(self.output, "Order ID: {}", order.order_id)?;
        writeln!(self.output, "Status: {}", order.status)?;
        Ok(Outcome::Completed)
    }

    fn aborted(&mut self, message: &str) -> Result<Outcome, ConsoleError> {
        writeln!(self.output, "{}", self.theme.warning.apply_to(message))?;
        Ok(Outcome::Aborted)
    }

    fn title(&mut self, style: &Style, text: &str) -> Result<(), ConsoleError> {
        writeln!(self.output, "\n{}\n", style.clone().bold().apply_to(text))?;
        Ok(())
    }

    fn banner(&mut self, style: &Style, text: &str, width: usize) -> Result<(), ConsoleError> {
        let rule = "=".repeat(width);
        let style = style.clone().bold();
        writeln!(self.output, "\n{}", style.apply_to(&rule))?;
        writeln!(self.output, "{}", style.apply_to(format!("{:^width$}", text)))?;
        writeln!(self.output, "{}\n", style.apply_to(&rule))?;
        Ok(())
    }

    fn rule(&mut self, width: usize) -> Result<(), ConsoleError> {
        writeln!(
            self.output,
            "\n{}",
            self.theme.emphasis.apply_to("=".repeat(width))
        )?;
        Ok(())
    }

    // ==================== INPUT ====================

    fn ask(&mut self, question: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{}", self.theme.accent.apply_to(question))?;
        self.output.flush()?;
        prompt::read_line(&mut self.input)
    }

    /// Symbol prompt used by the order-entry flows
    fn ask_symbol(&mut self) -> Result<String, ConsoleError> {
        let raw = self.ask("Symbol (e.g., BTCUSDT): ")?;
        Ok(prompt::parse_symbol(&raw)?)
    }

    fn ask_symbol_plain(&mut self) -> Result<String, ConsoleError> {
        let raw = self.ask("Symbol: ")?;
        Ok(prompt::parse_symbol(&raw)?)
    }

    fn ask_side(&mut self, question: &str) -> Result<Side, ConsoleError> {
        let raw = self.ask(question)?;
        Ok(raw.parse::<Side>()?)
    }

    fn ask_decimal(&mut self, field: &str) -> Result<Decimal, ConsoleError> {
        let raw = self.ask(&format!("{}: ", field))?;
        Ok(prompt::parse_decimal(field, &raw)?)
    }

    fn ask_order_id(&mut self) -> Result<OrderId, ConsoleError> {
        let raw = self.ask("Order ID: ")?;
        Ok(prompt::parse_order_id(&raw)?)
    }

    fn confirm(&mut self, question: &str) -> Result<Confirmation, ConsoleError> {
        write!(self.output, "{}", self.theme.warning.apply_to(question))?;
        self.output.flush()?;
        let answer = prompt::read_line(&mut self.input)?;
        Ok(Confirmation::parse(&answer))
    }

    fn preview_price(&mut self, symbol: &str) -> Result<(), ConsoleError> {
        if !self.options.price_preview {
            return Ok(());
        }
        let price = self.gateway.get_price(symbol)?;
        writeln!(
            self.output,
            "{}",
            self.theme.info.apply_to(format!("Current Price: {}", price))
        )?;
        Ok(())
    }
}

/// Limit price, or `MARKET` for orders without one
fn price_label(order: &Order) -> String {
    order
        .limit_price()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "MARKET".to_string())
}

/// Login screen: ask for the API key and secret
pub fn prompt_credentials<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    theme: &Theme,
) -> Result<Credentials, ConsoleError> {
    let rule = "=".repeat(WIDE);
    writeln!(output, "{}", theme.accent.clone().bold().apply_to(&rule))?;
    writeln!(
        output,
        "{}",
        theme
            .accent
            .clone()
            .bold()
            .apply_to("    BINANCE FUTURES TESTNET TRADING BOT - LOGIN")
    )?;
    writeln!(output, "{}\n", theme.accent.clone().bold().apply_to(&rule))?;

    write!(output, "{}", theme.accent.apply_to("Enter API Key: "))?;
    output.flush()?;
    let api_key = prompt::read_line(input)?;

    write!(output, "{}", theme.accent.apply_to("Enter API Secret: "))?;
    output.flush()?;
    let api_secret = prompt::read_line(input)?;

    Ok(Credentials::new(api_key, api_secret))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_round_trip_keys() {
        for choice in MenuChoice::ALL {
            assert_eq!(MenuChoice::parse(&choice.key().to_string()), Some(choice));
        }
    }

    #[test]
    fn test_menu_choice_rejects_unknown() {
        assert_eq!(MenuChoice::parse("10"), None);
        assert_eq!(MenuChoice::parse("x"), None);
        assert_eq!(MenuChoice::parse(""), None);
        assert_eq!(MenuChoice::parse(" 5 "), Some(MenuChoice::Balance));
    }

    #[test]
    fn test_prompt_credentials() {
        let mut input = std::io::Cursor::new("  my_key \nmy_secret\n");
        let mut output = Vec::new();
        let creds = prompt_credentials(&mut input, &mut output, &Theme::plain()).unwrap();
        assert_eq!(creds.api_key(), "my_key");
        assert_eq!(creds.api_secret(), "my_secret");
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Enter API Key: "));
        assert!(!shown.contains("my_secret"));
    }

    #[test]
    fn test_prompt_credentials_eof() {
        let mut input = std::io::Cursor::new("only_key\n");
        let mut output = Vec::new();
        let result = prompt_credentials(&mut input, &mut output, &Theme::plain());
        assert!(matches!(result, Err(ConsoleError::EndOfInput)));
    }
}
