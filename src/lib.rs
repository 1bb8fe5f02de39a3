#![doc(test(attr(deny(warnings))))]

//! Room Ledger tracks shared-utility cost allocation across a fixed set of
//! rooms: a weighted two-part bill split, running per-room balances, and
//! partial payments against those balances, persisted across restarts.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with sensible defaults.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("room_ledger=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
