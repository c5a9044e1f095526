/*!
 * Managed Heap
 * Deferred-release collector over the global allocator
 *
 * Released blocks are not freed on the spot. They sit in a retired set until a
 * collection pass drops them, either because a caller forced one or because the
 * retired set grew past the threshold. This gives Rust's deterministic
 * ownership the same two timings a tracing collector exposes: eager
 * reclamation on request, or reclamation on the collector's own schedule.
 */

use super::super::counting;
use super::super::traits::Collector;
use super::super::types::{Block, CollectionTrigger, GcStats, HeapSnapshot};
use crate::core::limits::DEFAULT_GC_THRESHOLD;
use crate::core::types::{CollectionCount, Size};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Production collector
pub struct ManagedHeap {
    /// Released blocks awaiting reclamation
    retired: Arc<Mutex<Vec<Block>>>,
    /// Reserved bytes of the retired set
    retired_bytes: Arc<AtomicUsize>,
    /// Reserved bytes of blocks currently owned by callers
    outstanding_bytes: Arc<AtomicUsize>,
    /// Retired bytes that trigger an unforced pass
    threshold: Size,
    collections: Arc<AtomicU64>,
    forced_collections: Arc<AtomicU64>,
}

impl ManagedHeap {
    /// Create a heap with the default threshold
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_GC_THRESHOLD)
    }

    /// Create a heap that collects on its own once `threshold` retired bytes accumulate
    pub fn with_threshold(threshold: Size) -> Self {
        info!(threshold_bytes = threshold, "Managed heap initialized");

        Self {
            retired: Arc::new(Mutex::new(Vec::new())),
            retired_bytes: Arc::new(AtomicUsize::new(0)),
            outstanding_bytes: Arc::new(AtomicUsize::new(0)),
            threshold,
            collections: Arc::new(AtomicU64::new(0)),
            forced_collections: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Run one collection pass
    pub fn collect(&self, trigger: CollectionTrigger) -> GcStats {
        let start = Instant::now();
        let mut stats = GcStats::new(trigger);

        // Swap the set out so blocks are dropped without holding the lock
        let reclaimed = {
            let mut retired = self.retired.lock();
            let reclaimed = std::mem::take(&mut *retired);
            let freed: Size = reclaimed.iter().map(Block::reserved).sum();
            self.retired_bytes.fetch_sub(freed, Ordering::SeqCst);
            stats.freed_bytes = freed;
            reclaimed
        };
        stats.freed_blocks = reclaimed.len();
        drop(reclaimed);

        self.collections.fetch_add(1, Ordering::Relaxed);
        if trigger == CollectionTrigger::Forced {
            self.forced_collections.fetch_add(1, Ordering::Relaxed);
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        debug!(
            trigger = %stats.trigger,
            freed_bytes = stats.freed_bytes,
            freed_blocks = stats.freed_blocks,
            duration_ms = stats.duration_ms,
            "Collection pass complete"
        );

        stats
    }

    /// Check if the retired set has crossed the threshold
    pub fn should_collect(&self) -> bool {
        self.retired_bytes.load(Ordering::SeqCst) >= self.threshold
    }

    pub fn threshold(&self) -> Size {
        self.threshold
    }

    /// Total collection passes, forced or not
    pub fn collections(&self) -> CollectionCount {
        self.collections.load(Ordering::Relaxed)
    }

    /// Collection passes requested through `force_collect`
    pub fn forced_collections(&self) -> CollectionCount {
        self.forced_collections.load(Ordering::Relaxed)
    }

    /// Reserved bytes released but not reclaimed yet
    pub fn retired_bytes(&self) -> Size {
        self.retired_bytes.load(Ordering::SeqCst)
    }

    /// Reserved bytes of blocks still owned by callers
    pub fn outstanding_bytes(&self) -> Size {
        self.outstanding_bytes.load(Ordering::SeqCst)
    }
}

impl Default for ManagedHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ManagedHeap {
    fn clone(&self) -> Self {
        Self {
            retired: Arc::clone(&self.retired),
            retired_bytes: Arc::clone(&self.retired_bytes),
            outstanding_bytes: Arc::clone(&self.outstanding_bytes),
            threshold: self.threshold,
            collections: Arc::clone(&self.collections),
            forced_collections: Arc::clone(&self.forced_collections),
        }
    }
}

impl Collector for ManagedHeap {
    fn allocate(&self, capacity: Size) -> Block {
        self.outstanding_bytes.fetch_add(capacity, Ordering::SeqCst);
        Block::with_capacity(capacity)
    }

    fn release(&self, block: Block) {
        let bytes = block.reserved();
        // Blocks this heap never handed out must not wrap the counter
        let _ = self
            .outstanding_bytes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |outstanding| {
                Some(outstanding.saturating_sub(bytes))
            });

        {
            let mut retired = self.retired.lock();
            retired.push(block);
            self.retired_bytes.fetch_add(bytes, Ordering::SeqCst);
        }

        if self.should_collect() {
            debug!(
                retired_bytes = self.retired_bytes(),
                threshold_bytes = self.threshold,
                "Retired set over threshold, collecting"
            );
            self.collect(CollectionTrigger::Threshold);
        }
    }

    fn force_collect(&self) -> GcStats {
        self.collect(CollectionTrigger::Forced)
    }

    fn sample(&self) -> HeapSnapshot {
        let counters = counting::counters();
        HeapSnapshot {
            total_allocated_bytes: counters.total_allocated,
            current_live_bytes: counters.live,
            collector_managed_bytes: self
                .outstanding_bytes()
                .saturating_add(self.retired_bytes()),
        }
    }
}
