//! Line-oriented input parsing for the operator console

use rust_decimal::Decimal;
use std::io::{self, BufRead};
use std::str::FromStr;
use thiserror::Error;

use crate::error::BotError;
use crate::types::OrderId;

/// Errors that end or interrupt a console interaction
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Recoverable: rendered and the menu continues
    #[error(transparent)]
    Bot(#[from] BotError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Input stream closed
    #[error("input closed")]
    EndOfInput,
}

/// Operator's answer to a y/n prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    /// `y` or `yes` in any case confirms; anything else declines.
    pub fn parse(answer: &str) -> Self {
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Confirmation::Confirmed,
            _ => Confirmation::Declined,
        }
    }
}

/// Read one line, without its line terminator
pub fn read_line<R: BufRead>(input: &mut R) -> Result<String, ConsoleError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ConsoleError::EndOfInput);
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

pub fn parse_symbol(raw: &str) -> Result<String, BotError> {
    let symbol = normalize_symbol(raw);
    if symbol.is_empty() {
        return Err(BotError::Input("symbol is required".to_string()));
    }
    Ok(symbol)
}

pub fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, BotError> {
    let raw = raw.trim();
    Decimal::from_str(raw).map_err(|_| {
        BotError::Input(format!("{} must be a decimal number, got '{}'", field, raw))
    })
}

pub fn parse_order_id(raw: &str) -> Result<OrderId, BotError> {
    let raw = raw.trim();
    raw.parse::<OrderId>()
        .map_err(|_| BotError::Input(format!("order ID must be an integer, got '{}'", raw)))
}
