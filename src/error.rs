//! Error taxonomy for the bot

use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use crate::types::Order;

/// Top-level error for every gateway and console operation
#[derive(Debug, Error)]
pub enum BotError {
    /// Startup failure: unreachable endpoint or rejected credentials.
    /// Fatal for the process.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Local precondition violation (e.g. an invalid side)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Failure reported by the exchange or its transport
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Malformed operator input
    #[error("Input error: {0}")]
    Input(String),
}

impl BotError {
    pub fn is_api(&self) -> bool {
        matches!(self, BotError::Api(_))
    }

    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            BotError::Api(e) => Some(e),
            _ => None,
        }
    }
}

pub type BotResult<T> = Result<T, BotError>;

/// Exchange-reported failure
#[derive(Debug)]
pub struct ApiError {
    /// Exchange error code, `None` for transport and decode failures
    pub code: Option<i64>,
    pub message: String,
    /// Order that was placed before the failing call and remains live on the
    /// exchange (the take-profit leg of a half-placed OCO pair).
    pub left_open: Option<Box<Order>>,
}

/// Error body returned by the futures API: `{"code": -1121, "msg": "Invalid symbol."}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: i64,
    msg: String,
}

impl ApiError {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            left_open: None,
        }
    }

    /// Build from a non-success HTTP response body
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(err) => Self::new(Some(err.code), err.msg),
            Err(_) => Self::new(None, format!("HTTP {}: {}", status, body.trim())),
        }
    }

    pub fn with_left_open(mut self, order: Order) -> Self {
        self.left_open = Some(Box::new(order));
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "API error ({}): {}", code, self.message)?,
            None => write!(f, "API error: {}", self.message)?,
        }
        if let Some(order) = &self.left_open {
            write!(
                f,
                " [order {} on {} was already placed and remains open]",
                order.order_id, order.symbol
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(None, format!("request failed: {}", err))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(None, format!("failed to parse response: {}", err))
    }
}
