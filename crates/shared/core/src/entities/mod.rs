mod candidate;
mod fill;
mod market;
mod order;
mod order_status;
mod order_type;
mod side;

pub use candidate::OrderCandidate;
pub use fill::{Fill, FillId};
pub use market::{BookSnapshot, Tick};
pub use order::{Order, OrderId};
pub use order_status::OrderStatus;
pub use order_type::OrderType;
pub use side::Side;
