pub mod admission;
pub mod model;

pub use admission::Admission;
pub use model::{COINBASE_SENDER, CURRENCY, Transaction};
