//! Traits shared across divmine crates.

pub mod cancellation;

pub use cancellation::{Cancellable, CancellationToken};
