/*!
 * Heap Reporter
 * Samples collector counters and emits them at megabyte granularity
 */

use super::traits::Observer;
use super::types::Observation;
use crate::memory::{Collector, HeapReport, HeapSnapshot};
use std::sync::Arc;

/// Produces heap reports on demand
#[derive(Clone)]
pub struct HeapReporter {
    collector: Arc<dyn Collector>,
    observer: Arc<dyn Observer>,
}

impl HeapReporter {
    pub fn new(collector: Arc<dyn Collector>, observer: Arc<dyn Observer>) -> Self {
        Self {
            collector,
            observer,
        }
    }

    /// Raw byte counters, not emitted
    pub fn snapshot(&self) -> HeapSnapshot {
        self.collector.sample()
    }

    /// Sample, emit exactly one report line and return it
    pub fn report(&self) -> HeapReport {
        let report = HeapReport::from(self.snapshot());
        self.observer.observe(&Observation::HeapReport(report));
        report
    }
}
