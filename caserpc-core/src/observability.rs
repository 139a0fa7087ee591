//! Logging setup for applications using caserpc
//!
//! Every client call runs inside a `tracing` span named after the remote
//! method, with debug events for the request and response and error events
//! for faults. Libraries never install a subscriber themselves; applications
//! call [`init_observability`] once at startup (or bring their own
//! subscriber).
//!
//! Metrics go through the OpenTelemetry global meter provider instead, see
//! `caserpc_client::ClientMetrics`.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: default for `ObservabilityConfig::log_level` (e.g. "info",
//!   "caserpc_client=debug"). An explicit `with_log_level` replaces it.
//!
//! ```rust,no_run
//! use caserpc_core::ObservabilityConfig;
//!
//! let config = ObservabilityConfig::new("kanboard-sync")
//!     .with_log_level("caserpc_client=debug,info")
//!     .with_json(true);
//!
//! caserpc_core::init_observability(config).expect("Failed to init logging");
//! tracing::info!("Application started");
//! ```

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
///
/// # Defaults
///
/// - Service name: "caserpc"
/// - Log level: `$RUST_LOG` or "info"
/// - Output: human-readable lines (JSON disabled)
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name, attached to the startup event
    pub service_name: String,

    /// Log level filter directive
    ///
    /// Accepts anything `EnvFilter` understands: "debug",
    /// "caserpc_client=trace,warn", and so on.
    pub log_level: String,

    /// Emit one JSON object per event instead of text lines
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "caserpc".to_string(),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json: false,
        }
    }
}

impl ObservabilityConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

/// Install a global `tracing` subscriber
///
/// Layers: an `EnvFilter` built from `config.log_level` and a fmt layer,
/// JSON or text. `RUST_LOG` is only consulted by
/// [`ObservabilityConfig::default`].
///
/// Calling this again after a subscriber is installed is not an error;
/// the first subscriber stays in place.
///
/// # Errors
///
/// Returns an error if `config.log_level` is not a valid filter directive.
pub fn init_observability(
    config: ObservabilityConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = log_filter(&config)?;

    let installed = if config.json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .json();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .is_ok()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .is_ok()
    };

    if installed {
        tracing::info!(service_name = %config.service_name, json = config.json, "Logging initialized");
    } else {
        tracing::debug!("Global subscriber already set, keeping it");
    }

    Ok(())
}

fn log_filter(config: &ObservabilityConfig) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(&config.log_level)
}
