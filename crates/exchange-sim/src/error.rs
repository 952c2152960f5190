use thiserror::Error;

/// Internal simulator faults; always converted to an `EXCHANGE_ERROR`
/// rejection before they reach the coordinator
#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Price conversion failed: {0}")]
    PriceConversion(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, SimulatorError>;
