pub mod types;

pub use types::{Money, ProductId};
