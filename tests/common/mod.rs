/*!
 * Shared test doubles
 */

#![allow(dead_code)]

use gc_check::memory::{Block, Collector, CollectionTrigger, GcStats, HeapSnapshot};
use gc_check::workload::{Observation, Observer};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Observer that keeps every observation in order
#[derive(Default)]
pub struct RecordingObserver {
    observations: Mutex<Vec<Observation>>,
}

impl RecordingObserver {
    pub fn observations(&self) -> Vec<Observation> {
        self.observations.lock().clone()
    }

    pub fn cycle_count(&self) -> usize {
        self.observations
            .lock()
            .iter()
            .filter(|o| matches!(o, Observation::Cycle { .. }))
            .count()
    }

    pub fn report_count(&self) -> usize {
        self.observations
            .lock()
            .iter()
            .filter(|o| matches!(o, Observation::HeapReport(_)))
            .count()
    }
}

impl Observer for RecordingObserver {
    fn observe(&self, observation: &Observation) {
        self.observations.lock().push(observation.clone());
    }
}

/// What a released block looked like
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasedBlock {
    pub len: usize,
    pub reserved: usize,
    pub synthetic_content: bool,
}

/// Collector that counts calls and frees immediately
#[derive(Default)]
pub struct CountingCollector {
    allocations: AtomicUsize,
    forced: AtomicUsize,
    samples: AtomicUsize,
    released: Mutex<Vec<ReleasedBlock>>,
}

impl CountingCollector {
    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::SeqCst)
    }

    pub fn forced_collections(&self) -> usize {
        self.forced.load(Ordering::SeqCst)
    }

    pub fn samples(&self) -> usize {
        self.samples.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> Vec<ReleasedBlock> {
        self.released.lock().clone()
    }

    /// True if the workload never touched this collector
    pub fn untouched(&self) -> bool {
        self.allocations() == 0 && self.forced_collections() == 0 && self.samples() == 0
    }
}

impl Collector for CountingCollector {
    fn allocate(&self, capacity: usize) -> Block {
        self.allocations.fetch_add(1, Ordering::SeqCst);
        Block::with_capacity(capacity)
    }

    fn release(&self, block: Block) {
        let synthetic_content = block
            .as_slice()
            .iter()
            .enumerate()
            .all(|(j, &byte)| byte == (j % 256) as u8);
        self.released.lock().push(ReleasedBlock {
            len: block.len(),
            reserved: block.reserved(),
            synthetic_content,
        });
    }

    fn force_collect(&self) -> GcStats {
        self.forced.fetch_add(1, Ordering::SeqCst);
        GcStats::new(CollectionTrigger::Forced)
    }

    fn sample(&self) -> HeapSnapshot {
        self.samples.fetch_add(1, Ordering::SeqCst);
        HeapSnapshot {
            total_allocated_bytes: 3 * 1024 * 1024,
            current_live_bytes: 1024 * 1024 + 17,
            collector_managed_bytes: 0,
        }
    }
}
