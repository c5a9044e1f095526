/*!
 * Allocation Driver
 * Runs the fixed allocate/fill/release cycle sequence
 *
 * Both strategies run the exact same cycles; the only difference is the
 * forced collection after each release under `Manual`, so heap differences
 * between the two are attributable to that call alone.
 */

use super::reporter::HeapReporter;
use super::traits::Observer;
use super::types::{AllocationRequest, Observation};
use crate::core::limits::CYCLE_COUNT;
use crate::core::types::Size;
use crate::memory::{Block, Collector};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Executes allocation workloads against a collector
#[derive(Clone)]
pub struct AllocationDriver {
    collector: Arc<dyn Collector>,
    observer: Arc<dyn Observer>,
    reporter: HeapReporter,
}

impl AllocationDriver {
    pub fn new(collector: Arc<dyn Collector>, observer: Arc<dyn Observer>) -> Self {
        let reporter = HeapReporter::new(Arc::clone(&collector), Arc::clone(&observer));
        Self {
            collector,
            observer,
            reporter,
        }
    }

    pub fn reporter(&self) -> &HeapReporter {
        &self.reporter
    }

    /// Run every cycle to completion, then emit one heap report
    ///
    /// Blocks the calling thread, including for forced collections.
    #[instrument(skip_all, fields(size = request.size.get(), strategy = %request.strategy))]
    pub fn run(&self, request: AllocationRequest) {
        let size = request.size.get();
        self.observer.observe(&Observation::Started {
            strategy: request.strategy,
        });

        for index in 0..CYCLE_COUNT {
            let block = self.fill_block(size);
            self.observer.observe(&Observation::Cycle {
                index,
                units: block.len(),
            });
            self.collector.release(block);

            if request.strategy.forces_collection() {
                let stats = self.collector.force_collect();
                debug!(
                    cycle = index,
                    freed_bytes = stats.freed_bytes,
                    freed_blocks = stats.freed_blocks,
                    "Forced collection after cycle"
                );
            }
        }

        self.observer.observe(&Observation::Finished);
        self.reporter.report();
    }

    /// One byte at a time so the allocator sees incremental pressure
    fn fill_block(&self, size: Size) -> Block {
        let mut block = self.collector.allocate(size);
        for j in 0..size {
            block.push((j % 256) as u8);
        }
        block
    }
}
