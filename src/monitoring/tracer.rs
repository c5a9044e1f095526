/*!
 * Request Tracing
 * Structured tracing for HTTP requests using the tracing crate
 *
 * Features:
 * - Trace ID generation for request correlation
 * - JSON-formatted logs for structured parsing
 * - Slow request detection
 */

use crate::core::limits::SLOW_REQUEST_THRESHOLD;
use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - GC_CHECK_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("GC_CHECK_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_names(true)
                    .compact(),
            )
            .init();
        info!("Structured tracing initialized");
    }
}

/// Generate a unique trace ID for request correlation
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one HTTP request from head parse to response write
pub struct RequestSpan {
    span: tracing::Span,
    start: Instant,
    trace_id: String,
}

impl RequestSpan {
    pub fn new(method: &str, path: &str) -> Self {
        let trace_id = generate_trace_id();

        let span = span!(
            Level::INFO,
            "http_request",
            trace_id = %trace_id,
            method = method,
            path = path,
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );

        let _entered = span.enter();
        debug!(method = method, path = path, "request started");
        drop(_entered);

        Self {
            span,
            start: Instant::now(),
            trace_id,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    pub fn record_status(&self, status: u16) {
        self.span.record("status", status);
    }
}

impl Drop for RequestSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self.span.record("duration_ms", duration.as_millis() as u64);
        let _entered = self.span.enter();

        if duration > SLOW_REQUEST_THRESHOLD {
            warn!(
                trace_id = %self.trace_id,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow request"
            );
        } else {
            debug!(
                trace_id = %self.trace_id,
                duration_us = duration.as_micros() as u64,
                "request completed"
            );
        }
    }
}

/// Helper to create a request span
#[inline]
pub fn span_request(method: &str, path: &str) -> RequestSpan {
    RequestSpan::new(method, path)
}
