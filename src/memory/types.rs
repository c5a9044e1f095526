/*!
 * Memory Types
 * Blocks, heap snapshots and collection statistics
 */

use crate::core::types::{bytes_to_mb, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contiguous byte region handed out by a collector
///
/// `reserved` is the capacity the collector accounted for at allocation time;
/// the region is only ever filled incrementally through [`Block::push`].
#[derive(Debug)]
pub struct Block {
    data: Vec<u8>,
    reserved: Size,
}

impl Block {
    /// Create an empty block with room for `capacity` bytes
    pub fn with_capacity(capacity: Size) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            reserved: capacity,
        }
    }

    /// Append a single byte
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.data.push(byte);
    }

    pub fn len(&self) -> Size {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes the owning collector accounts for
    pub fn reserved(&self) -> Size {
        self.reserved
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

/// Point-in-time read of allocator and collector counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HeapSnapshot {
    /// Cumulative bytes allocated over the process lifetime
    pub total_allocated_bytes: Size,
    /// Bytes currently allocated and not yet freed
    pub current_live_bytes: Size,
    /// Bytes held by the collector (outstanding plus not yet reclaimed)
    pub collector_managed_bytes: Size,
}

/// Heap snapshot at megabyte granularity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HeapReport {
    pub alloc_mb: Size,
    pub total_alloc_mb: Size,
    pub heap_alloc_mb: Size,
}

impl From<HeapSnapshot> for HeapReport {
    fn from(snapshot: HeapSnapshot) -> Self {
        Self {
            alloc_mb: bytes_to_mb(snapshot.current_live_bytes),
            total_alloc_mb: bytes_to_mb(snapshot.total_allocated_bytes),
            heap_alloc_mb: bytes_to_mb(snapshot.collector_managed_bytes),
        }
    }
}

impl fmt::Display for HeapReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Alloc = {} MB, TotalAlloc = {} MB, HeapAlloc = {} MB",
            self.alloc_mb, self.total_alloc_mb, self.heap_alloc_mb
        )
    }
}

/// What started a collection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionTrigger {
    /// Requested synchronously by a caller
    Forced,
    /// Retired bytes crossed the collector's threshold
    Threshold,
}

impl fmt::Display for CollectionTrigger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CollectionTrigger::Forced => write!(f, "forced"),
            CollectionTrigger::Threshold => write!(f, "threshold"),
        }
    }
}

/// Garbage collection statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GcStats {
    pub trigger: CollectionTrigger,
    pub freed_bytes: Size,
    pub freed_blocks: usize,
    pub duration_ms: u64,
}

impl GcStats {
    /// Stats for a pass that has not reclaimed anything yet
    pub fn new(trigger: CollectionTrigger) -> Self {
        Self {
            trigger,
            freed_bytes: 0,
            freed_blocks: 0,
            duration_ms: 0,
        }
    }

    /// Check if any memory was freed
    pub fn freed_any(&self) -> bool {
        self.freed_bytes > 0 || self.freed_blocks > 0
    }
}
