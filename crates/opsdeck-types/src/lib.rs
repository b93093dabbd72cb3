pub mod infra;
pub mod units;
pub mod value;

pub use infra::*;
pub use units::*;
pub use value::{Row, Value};
