/*!
 * Managed Heap Tests
 * Heap reports from real allocations through the production collector
 */

use gc_check::memory::{Collector, ManagedHeap};
use gc_check::workload::{AllocationDriver, AllocationRequest, CollectionStrategy, Observation, Observer};
use parking_lot::Mutex;
use serial_test::serial;
use std::num::NonZeroUsize;
use std::sync::Arc;

const ONE_MB: usize = 1024 * 1024;

#[derive(Default)]
struct Reports(Mutex<Vec<Observation>>);

impl Observer for Reports {
    fn observe(&self, observation: &Observation) {
        if let Observation::HeapReport(_) = observation {
            self.0.lock().push(observation.clone());
        }
    }
}

fn run(heap: &ManagedHeap, size: usize, strategy: CollectionStrategy) -> Observation {
    let reports = Arc::new(Reports::default());
    let driver = AllocationDriver::new(Arc::new(heap.clone()), reports.clone());
    driver.run(AllocationRequest::new(NonZeroUsize::new(size).unwrap(), strategy));

    let mut reports = reports.0.lock();
    assert_eq!(reports.len(), 1);
    reports.remove(0)
}

#[test]
#[serial]
fn test_manual_report_reflects_cumulative_allocation() {
    let heap = ManagedHeap::with_threshold(usize::MAX);
    let before = heap.sample();

    let report = run(&heap, 2 * ONE_MB, CollectionStrategy::Manual);

    match report {
        Observation::HeapReport(report) => {
            assert!(report.total_alloc_mb >= before.total_allocated_bytes / ONE_MB + 6);
            assert_eq!(report.heap_alloc_mb, 0);
        }
        other => panic!("unexpected observation {:?}", other),
    }
    assert_eq!(heap.forced_collections(), 3);
}

#[test]
#[serial]
fn test_auto_keeps_blocks_managed_until_threshold() {
    let heap = ManagedHeap::with_threshold(usize::MAX);

    let report = run(&heap, 2 * ONE_MB, CollectionStrategy::Auto);

    match report {
        Observation::HeapReport(report) => {
            assert_eq!(report.heap_alloc_mb, 6);
            assert!(report.alloc_mb >= 6);
        }
        other => panic!("unexpected observation {:?}", other),
    }
    assert_eq!(heap.collections(), 0);

    heap.force_collect();
    assert_eq!(heap.sample().collector_managed_bytes, 0);
}

#[test]
#[serial]
fn test_auto_collects_on_threshold() {
    let heap = ManagedHeap::with_threshold(3 * ONE_MB);

    run(&heap, 2 * ONE_MB, CollectionStrategy::Auto);

    // Second release crosses 3MB and triggers one pass, the third block stays retired
    assert_eq!(heap.collections(), 1);
    assert_eq!(heap.forced_collections(), 0);
    assert_eq!(heap.retired_bytes(), 2 * ONE_MB);
}
