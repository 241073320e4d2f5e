//! Logging configuration using tracing
//!
//! Structured logging to stderr, filtered by the RUST_LOG environment variable.
//! The library only emits events; binaries call [`init`] to see them.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber
///
/// Filters with RUST_LOG and falls back to "warn" so the CLI stays quiet by
/// default.
///
/// # Example RUST_LOG values
/// - `RUST_LOG=info` - Show info and above
/// - `RUST_LOG=bugjira=debug` - Show every dispatched call and plugin load
/// - `RUST_LOG=bugjira=debug,reqwest=info` - Different levels per crate
///
/// # Errors
/// Returns an error if a subscriber has already been installed
pub fn init() -> crate::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .map_err(|e| crate::BugjiraError::Other(format!("Failed to initialize tracing: {}", e)))?;

    Ok(())
}

/// Initialize logging for tests (no-op if already initialized)
pub fn init_test() {
    let _ = init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_reports_error() {
        init_test();
        // A subscriber is installed by now, so a second install must fail
        assert!(init().is_err());
    }

    #[test]
    fn test_structured_events() {
        init_test();

        tracing::debug!(key = "FOO-1", backend = "jira", "Dispatching lookup");
        tracing::warn!(key = "123", error = "not found", "Bugzilla lookup failed");
    }
}
