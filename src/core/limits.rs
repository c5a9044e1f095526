/*!
 * Service Limits and Constants
 *
 * Centralized location for workload constants, thresholds and defaults.
 * Organized by domain for discoverability.
 */

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

// =============================================================================
// WORKLOAD
// =============================================================================

/// Allocate/fill/release rounds per request
/// Fixed for both strategies and independent of the requested size
pub const CYCLE_COUNT: usize = 3;

/// Bytes in one reported megabyte
pub const BYTES_PER_MB: usize = 1024 * 1024;

// =============================================================================
// COLLECTOR
// =============================================================================

/// Retired bytes that trigger an unforced collection (64MB)
pub const DEFAULT_GC_THRESHOLD: usize = 64 * 1024 * 1024;

// =============================================================================
// TRANSPORT
// =============================================================================

/// Default listen address (all interfaces, port 8080)
pub const DEFAULT_LISTEN_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));

/// Default time allowed for a client to send its request headers
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Requests slower than this are logged at WARN
pub const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_millis(500);
