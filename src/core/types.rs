/*!
 * Core Types
 * Common types used across the service
 */

/// Size type for memory operations
pub type Size = usize;

/// Monotonic count of collection passes
pub type CollectionCount = u64;

/// Convert a byte count to whole megabytes, truncating the remainder
#[inline]
pub const fn bytes_to_mb(bytes: Size) -> Size {
    bytes / super::limits::BYTES_PER_MB
}
