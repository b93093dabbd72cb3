// NOTE: Read posture
//
// Every store file is owned by some other producer process; this crate is a
// pure consumer. Connections are opened read-only over an immutable URI and
// live for exactly one query call. A missing store file is a normal state
// (the producer has not run yet), never an error. Nothing here can write,
// lock, or create a store.

mod catalog;
mod error;
mod freshness;
mod reader;

pub use catalog::{Store, StoreCatalog};
pub use error::{Error, Result};
pub use freshness::minutes_since_newest;
pub use reader::{Param, StoreReader};
