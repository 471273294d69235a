//! Transactional dataset and itemset pattern model.

pub mod types;

pub use types::{Dataset, Pattern, Transaction};
