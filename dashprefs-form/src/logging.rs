//! Tracing setup for the CLI host
//!
//! The subscriber is installed before configuration is resolved so that
//! resolution warnings reach stderr. Once the configured level is known it is
//! swapped in through a reload handle, unless `RUST_LOG` was given.

use tracing::Subscriber;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

const STARTUP_LEVEL: &str = "info";

/// Handle for replacing the startup filter with the configured level
pub struct LogLevelHandle {
    handle: reload::Handle<EnvFilter, Registry>,
    pinned: bool,
}

impl LogLevelHandle {
    /// Apply the configured level; a no-op when explicit directives were given
    pub fn apply_configured_level(&self, level: &str) -> Result<(), reload::Error> {
        if self.pinned {
            return Ok(());
        }
        self.handle.reload(EnvFilter::new(level))
    }
}

/// Build the stderr subscriber
///
/// `directives` are explicit filter directives (normally `RUST_LOG`); when
/// present they win over the configured level.
pub fn build_subscriber(directives: Option<&str>) -> (impl Subscriber + Send + Sync, LogLevelHandle) {
    let filter = EnvFilter::new(directives.unwrap_or(STARTUP_LEVEL));
    let (filter, handle) = reload::Layer::new(filter);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    (
        subscriber,
        LogLevelHandle {
            handle,
            pinned: directives.is_some(),
        },
    )
}

/// Install the global subscriber using `RUST_LOG` when set
pub fn init() -> LogLevelHandle {
    let directives = std::env::var("RUST_LOG").ok().filter(|d| !d.trim().is_empty());
    let (subscriber, handle) = build_subscriber(directives.as_deref());
    subscriber.init();
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_configured_level_replaces_startup_level() {
        let (subscriber, handle) = build_subscriber(None);

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(Level::INFO));
            assert!(!tracing::enabled!(Level::DEBUG));

            handle.apply_configured_level("debug").unwrap();
            assert!(tracing::enabled!(Level::DEBUG));
        });
    }

    #[test]
    fn test_explicit_directives_win_over_configured_level() {
        let (subscriber, handle) = build_subscriber(Some("warn"));

        tracing::subscriber::with_default(subscriber, || {
            handle.apply_configured_level("trace").unwrap();
            assert!(tracing::enabled!(Level::WARN));
            assert!(!tracing::enabled!(Level::INFO));
        });
    }
}
