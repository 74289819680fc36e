//! Shared test utilities

use std::path::Path;
use std::sync::Arc;

use barista_gateway::order::UnixTimestamps;
use barista_gateway::{FsOrderStore, Order, OrderRecorder};

/// Second every pinned-clock recorder reports
pub const FIXED_SECOND: i64 = 1_700_000_000;

/// Recorder writing into `dir` with the clock pinned to [`FIXED_SECOND`]
#[must_use]
pub fn pinned_recorder(dir: &Path) -> OrderRecorder {
    OrderRecorder::new(
        Arc::new(FsOrderStore::new(dir)),
        Arc::new(UnixTimestamps::with_clock(|| FIXED_SECOND)),
    )
}

/// Scenario A: small mocha with whipped cream
#[must_use]
pub fn alice_mocha() -> Order {
    Order::new(
        "Mocha",
        "Small",
        "Whole",
        vec!["Whipped Cream".to_string(), "Chocolate Syrup".to_string()],
        "Alice",
    )
}

/// Scenario B: large oat latte with sugar
#[must_use]
pub fn bob_latte() -> Order {
    Order::new("Latte", "Large", "Oat", vec!["Sugar".to_string()], "Bob")
}

/// Names of regular files in `dir`, sorted
#[must_use]
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("failed to read orders dir")
        .map(|entry| entry.expect("bad dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
