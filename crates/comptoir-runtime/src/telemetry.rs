//! # Telemetry
//!
//! Structured logging setup shared by the Comptoir binaries.
//!
//! Logs go to stderr so that report output on stdout stays clean when piped.
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show debug messages
//! - `RUST_LOG=comptoir_store=trace` - Trace the cache and rate limiter only
//! - Default: `info,comptoir=debug`

use std::io;

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info,comptoir=debug";

/// Initializes the tracing subscriber, writing to stderr.
///
/// Returns `false` if a global subscriber was already installed, which
/// happens when several tests or binaries share a process.
pub fn init_tracing() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing::subscriber::set_global_default(subscriber(filter, io::stderr)).is_ok()
}

fn subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(writer)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_events_go_to_the_given_writer() {
        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = subscriber(EnvFilter::new("info"), move || sink.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Sales loaded");
            tracing::debug!("filtered out");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Sales loaded"));
        assert!(!output.contains("filtered out"));
    }

    #[test]
    fn test_second_init_is_refused() {
        init_tracing();
        assert!(!init_tracing());
    }
}
