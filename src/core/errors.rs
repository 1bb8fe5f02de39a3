use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the billing engine and storage layers.
///
/// Every variant is recoverable; the engine never aborts the process.
/// Validation failures are detected before any mutation is applied, and
/// [`BillingError::Persistence`] is reported after the in-memory mutation
/// already took effect (the ledger is not rolled back).
#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Invalid amount: `{0}` is not a valid bill value")]
    InvalidAmount(String),
    #[error("Invalid count: `{0}` is not a valid occupant count")]
    InvalidCount(String),
    #[error("No students registered, nothing to bill")]
    NoStudents,
    #[error("Room not found: {0}")]
    RoomNotFound(String),
    #[error("Payment amount must be greater than zero")]
    NonPositiveAmount,
    #[error("Payment of {amount:.2} exceeds the accumulated balance of {balance:.2}")]
    OverpaymentRejected { amount: f64, balance: f64 },
    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type Result<T> = StdResult<T, BillingError>;

impl From<std::io::Error> for BillingError {
    fn from(err: std::io::Error) -> Self {
        BillingError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for BillingError {
    fn from(err: serde_json::Error) -> Self {
        BillingError::Persistence(err.to_string())
    }
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BillingError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}
