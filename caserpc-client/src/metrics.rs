//! Client metrics definitions
//!
//! OpenTelemetry instruments recorded around every call when metrics are
//! attached with [`ClientBuilder::with_metrics`](crate::ClientBuilder::with_metrics).
//! They are created from the global meter provider, so nothing is exported
//! until the application installs one; until then recording is a no-op.
//!
//! # Metrics Collected
//!
//! - **caserpc.client.requests.total**: calls issued, by method and status
//! - **caserpc.client.request.duration**: call latency in seconds
//! - **caserpc.client.errors.total**: failed calls, by fault kind
//!
//! ```rust,no_run
//! use caserpc_client::{ClientBuilder, ClientMetrics};
//!
//! # fn example() -> caserpc_core::Result<()> {
//! let client = ClientBuilder::new("https://kanboard.example.com/jsonrpc.php")
//!     .token("api-token")
//!     .with_metrics(ClientMetrics::new("kanboard-sync"))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use caserpc_core::FaultKind;
use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    InstrumentationScope, KeyValue,
};

/// Client metrics for monitoring
pub struct ClientMetrics {
    /// Total number of calls issued
    pub requests_total: Counter<u64>,
    /// Call duration in seconds
    pub request_duration: Histogram<f64>,
    /// Total number of failed calls
    pub errors_total: Counter<u64>,
}

impl ClientMetrics {
    /// Create metrics from a meter scoped to `service_name`
    pub fn new(service_name: impl Into<String>) -> Self {
        let scope = InstrumentationScope::builder(service_name.into()).build();
        let meter = global::meter_with_scope(scope);
        Self::new_with_meter(&meter)
    }

    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("caserpc.client.requests.total")
                .with_description("Total number of JSON-RPC calls issued")
                .build(),
            request_duration: meter
                .f64_histogram("caserpc.client.request.duration")
                .with_description("JSON-RPC call duration in seconds")
                .with_unit("s")
                .build(),
            errors_total: meter
                .u64_counter("caserpc.client.errors.total")
                .with_description("Total number of failed JSON-RPC calls")
                .build(),
        }
    }

    /// Record a finished call, `status` being "success" or "error"
    pub fn record_request(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    pub fn record_error(&self, method: &str, kind: FaultKind) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("fault", kind.as_str()),
        ];
        self.errors_total.add(1, attributes);
    }
}

impl std::fmt::Debug for ClientMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientMetrics").finish_non_exhaustive()
    }
}
