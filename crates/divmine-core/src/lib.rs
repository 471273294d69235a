//! # divmine-core
//!
//! Shared foundation for the divmine diversity engine: configuration,
//! error enums, tracing setup, cancellation, constants and collection types.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::DivmineConfig;
pub use traits::{Cancellable, CancellationToken};
