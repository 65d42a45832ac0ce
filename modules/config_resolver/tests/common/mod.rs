//! Common test utilities: sources and recording hooks
#![allow(dead_code)]

use config_resolver::domain::keys;
use config_resolver::infra::MapSource;
use config_resolver::{ActionHook, ResolvedConfig};
use parking_lot::Mutex;

pub const TEST_DB_URL: &str = "jdbc:postgresql://localhost:5432/orders";

/// Source with exactly the given pairs
pub fn source(pairs: &[(&str, &str)]) -> MapSource {
    MapSource::from_pairs("test", pairs.iter().copied())
}

/// Source with the required datasource url plus the given pairs
pub fn source_with_url(pairs: &[(&str, &str)]) -> MapSource {
    let mut src = source(pairs);
    if pairs.iter().all(|(k, _)| *k != keys::DATASOURCE_URL) {
        src.insert(keys::DATASOURCE_URL, TEST_DB_URL);
    }
    src
}

/// Hook that records the server port of every config it was applied to
#[derive(Default)]
pub struct RecordingHook {
    calls: Mutex<Vec<i64>>,
}

impl RecordingHook {
    pub fn calls(&self) -> Vec<i64> {
        self.calls.lock().clone()
    }
}

impl ActionHook for RecordingHook {
    fn apply(&self, config: &ResolvedConfig) -> anyhow::Result<()> {
        self.calls.lock().push(config.get_integer(keys::SERVER_PORT)?);
        Ok(())
    }
}

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\nTEST: {}", test_name);
    println!("PURPOSE: {}", purpose);
}
