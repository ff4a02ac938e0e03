#![doc(test(attr(deny(warnings))))]

//! MoniFlow Core offers the expense aggregation, limit tracking, category
//! registry, and currency normalization primitives behind the MoniFlow
//! personal-finance front end. State lives in an external key-value store;
//! every operation here is synchronous and runs over an explicit session
//! book.

pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;

pub use errors::{MoniError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("moniflow_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("MoniFlow core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
