//! Error types produced while composing and flattening search sources.

mod constructors;
mod conversions;
mod types;

pub use types::{BoxError, CourierError};
