//! Coordinator errors

use thiserror::Error;
use vela_core::OrderId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("approved candidate {order_id} lost required fields")]
    MalformedApproval { order_id: OrderId },

    #[error("execution worker for {symbol} is gone")]
    WorkerGone { symbol: String },
}

pub type Result<T> = std::result::Result<T, Error>;
