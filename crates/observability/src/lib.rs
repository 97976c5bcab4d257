//! Observability: tracing/logging initialization.

pub mod tracing;

/// Initialize tracing/logging for the process.
pub fn init() {
    tracing::init();
}
