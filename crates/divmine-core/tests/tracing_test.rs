//! Tests for the divmine tracing setup.

use std::sync::Mutex;

use divmine_core::tracing::init_tracing;

/// Global mutex to serialize tracing tests (env var manipulation).
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_divmine_log_filter_accepted() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("DIVMINE_LOG", "divmine_analysis=debug,divmine_core=warn");
    init_tracing();
    tracing::info!("tracing initialised");
    std::env::remove_var("DIVMINE_LOG");
}

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    init_tracing();
}

#[test]
fn test_invalid_filter_falls_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("DIVMINE_LOG", "=[garbage");
    init_tracing();
    std::env::remove_var("DIVMINE_LOG");
}
