/*!
 * API Types
 * Errors, status codes and server configuration for the HTTP layer
 */

use crate::core::limits::{DEFAULT_GC_THRESHOLD, DEFAULT_LISTEN_ADDR, DEFAULT_READ_TIMEOUT};
use crate::core::types::Size;
use miette::Diagnostic;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// API operation result
pub type ApiResult<T> = Result<T, ApiError>;

/// Client-visible request errors
///
/// The display text is the exact response body (without trailing newline).
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ApiError {
    #[error("Invalid or missing 'N' parameter")]
    #[diagnostic(
        code(api::invalid_size),
        help("Pass a positive integer byte count, e.g. ?N=1000")
    )]
    InvalidSize,

    #[error("Invalid 'gc' parameter, must be 'manual' or 'auto'")]
    #[diagnostic(code(api::invalid_strategy), help("Matching is case-insensitive."))]
    InvalidStrategy,

    #[error("404 page not found")]
    #[diagnostic(code(api::not_found), help("Available routes: /allocate, /heap"))]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidSize | ApiError::InvalidStrategy => StatusCode::BadRequest,
            ApiError::NotFound => StatusCode::NotFound,
        }
    }
}

/// Response status codes used by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl StatusCode {
    pub fn code(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

impl From<StatusCode> for hyper::StatusCode {
    fn from(status: StatusCode) -> Self {
        match status {
            StatusCode::Ok => hyper::StatusCode::OK,
            StatusCode::BadRequest => hyper::StatusCode::BAD_REQUEST,
            StatusCode::NotFound => hyper::StatusCode::NOT_FOUND,
            StatusCode::InternalServerError => hyper::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Startup configuration errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid listen address '{value}' in {key}")]
    #[diagnostic(code(config::invalid_address), help("Use host:port, e.g. 0.0.0.0:8080"))]
    InvalidAddress {
        key: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("Invalid value '{value}' in {key}: expected a positive integer")]
    #[diagnostic(code(config::invalid_number))]
    InvalidNumber { key: &'static str, value: String },
}

/// Server lifecycle errors
#[derive(Error, Debug, Diagnostic)]
pub enum ServerError {
    #[error("Failed to bind {address}")]
    #[diagnostic(code(server::bind_failed), help("Is another process using this port?"))]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Allocation workload aborted")]
    #[diagnostic(code(server::workload_aborted))]
    WorkloadAborted,

    #[error("I/O error: {0}")]
    #[diagnostic(code(server::io))]
    Io(#[from] std::io::Error),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: SocketAddr,
    /// Retired bytes before the managed heap collects on its own
    pub gc_threshold: Size,
    /// Time allowed for a client to send its request headers
    pub read_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_LISTEN_ADDR,
            gc_threshold: DEFAULT_GC_THRESHOLD,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

impl ServerConfig {
    pub const ADDR_KEY: &'static str = "GC_CHECK_ADDR";
    pub const GC_THRESHOLD_KEY: &'static str = "GC_CHECK_GC_THRESHOLD";
    pub const READ_TIMEOUT_KEY: &'static str = "GC_CHECK_READ_TIMEOUT_SECS";

    pub fn new(address: SocketAddr) -> Self {
        Self {
            address,
            ..Default::default()
        }
    }

    pub fn with_gc_threshold(mut self, threshold: Size) -> Self {
        self.gc_threshold = threshold;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value source; unset keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(Self::ADDR_KEY) {
            config.address = value
                .trim()
                .parse::<SocketAddr>()
                .map_err(|source| ConfigError::InvalidAddress {
                    key: Self::ADDR_KEY,
                    value: value.clone(),
                    source,
                })?;
        }

        if let Some(value) = lookup(Self::GC_THRESHOLD_KEY) {
            config.gc_threshold = parse_positive(Self::GC_THRESHOLD_KEY, &value)? as Size;
        }

        if let Some(value) = lookup(Self::READ_TIMEOUT_KEY) {
            config.read_timeout =
                Duration::from_secs(parse_positive(Self::READ_TIMEOUT_KEY, &value)?);
        }

        Ok(config)
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        }),
    }
}
