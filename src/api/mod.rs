//! HTTP framework glue.

mod types;

pub use types::ErrorResponse;

#[cfg(feature = "actix")]
pub mod actix;
