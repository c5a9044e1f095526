/*!
 * Allocation Driver Tests
 * Cycle sequencing and collection behaviour against mocked collectors
 */

use crate::common::{CountingCollector, RecordingObserver};
use gc_check::memory::{Block, Collector, CollectionTrigger, GcStats, HeapReport, HeapSnapshot};
use gc_check::workload::{AllocationDriver, AllocationRequest, CollectionStrategy, Observation};
use mockall::mock;
use mockall::predicate::eq;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::num::NonZeroUsize;
use std::sync::Arc;

mock! {
    pub Heap {}

    impl Collector for Heap {
        fn allocate(&self, capacity: usize) -> Block;
        fn release(&self, block: Block);
        fn force_collect(&self) -> GcStats;
        fn sample(&self) -> HeapSnapshot;
    }
}

fn request(size: usize, strategy: CollectionStrategy) -> AllocationRequest {
    AllocationRequest::new(NonZeroUsize::new(size).unwrap(), strategy)
}

/// Mock whose calls are appended to a shared log
fn logging_heap(size: usize, forced: usize, log: &Arc<Mutex<Vec<&'static str>>>) -> MockHeap {
    let mut heap = MockHeap::new();

    let l = Arc::clone(log);
    heap.expect_allocate()
        .with(eq(size))
        .times(3)
        .returning(move |capacity| {
            l.lock().push("allocate");
            Block::with_capacity(capacity)
        });

    let l = Arc::clone(log);
    heap.expect_release()
        .withf(move |block: &Block| block.len() == size)
        .times(3)
        .returning(move |_| l.lock().push("release"));

    let l = Arc::clone(log);
    heap.expect_force_collect().times(forced).returning(move || {
        l.lock().push("force_collect");
        GcStats::new(CollectionTrigger::Forced)
    });

    let l = Arc::clone(log);
    heap.expect_sample().times(1).returning(move || {
        l.lock().push("sample");
        HeapSnapshot::default()
    });

    heap
}

#[test]
fn test_manual_forces_collection_after_each_release() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let heap = logging_heap(1000, 3, &log);
    let driver = AllocationDriver::new(Arc::new(heap), Arc::new(RecordingObserver::default()));

    driver.run(request(1000, CollectionStrategy::Manual));

    let mut expected = Vec::new();
    for _ in 0..3 {
        expected.extend(["allocate", "release", "force_collect"]);
    }
    expected.push("sample");
    assert_eq!(*log.lock(), expected);
}

#[test]
fn test_auto_never_forces_collection() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let heap = logging_heap(1000, 0, &log);
    let driver = AllocationDriver::new(Arc::new(heap), Arc::new(RecordingObserver::default()));

    driver.run(request(1000, CollectionStrategy::Auto));

    let mut expected = Vec::new();
    for _ in 0..3 {
        expected.extend(["allocate", "release"]);
    }
    expected.push("sample");
    assert_eq!(*log.lock(), expected);
}

#[test]
fn test_observations_for_manual_run() {
    let collector = Arc::new(CountingCollector::default());
    let observer = Arc::new(RecordingObserver::default());
    let driver = AllocationDriver::new(collector.clone(), observer.clone());

    driver.run(request(1000, CollectionStrategy::Manual));

    assert_eq!(
        observer.observations(),
        vec![
            Observation::Started {
                strategy: CollectionStrategy::Manual
            },
            Observation::Cycle { index: 0, units: 1000 },
            Observation::Cycle { index: 1, units: 1000 },
            Observation::Cycle { index: 2, units: 1000 },
            Observation::Finished,
            Observation::HeapReport(HeapReport {
                alloc_mb: 1,
                total_alloc_mb: 3,
                heap_alloc_mb: 0,
            }),
        ]
    );
    assert_eq!(collector.forced_collections(), 3);
}

#[test]
fn test_blocks_hold_synthetic_content() {
    let collector = Arc::new(CountingCollector::default());
    let driver = AllocationDriver::new(collector.clone(), Arc::new(RecordingObserver::default()));

    driver.run(request(700, CollectionStrategy::Auto));

    let released = collector.released();
    assert_eq!(released.len(), 3);
    for block in released {
        assert_eq!(block.len, 700);
        assert_eq!(block.reserved, 700);
        assert!(block.synthetic_content);
    }
}

#[test]
fn test_repeated_runs_emit_same_kinds() {
    let collector = Arc::new(CountingCollector::default());
    let observer = Arc::new(RecordingObserver::default());
    let driver = AllocationDriver::new(collector.clone(), observer.clone());

    driver.run(request(64, CollectionStrategy::Auto));
    let first = observer.observations();
    driver.run(request(64, CollectionStrategy::Auto));
    let both = observer.observations();

    assert_eq!(both.len(), first.len() * 2);
    for (a, b) in first.iter().zip(&both[first.len()..]) {
        assert_eq!(std::mem::discriminant(a), std::mem::discriminant(b));
    }
    assert_eq!(collector.allocations(), 6);
    assert_eq!(collector.forced_collections(), 0);
}

#[test]
fn test_reporter_samples_once_per_run() {
    let collector = Arc::new(CountingCollector::default());
    let observer = Arc::new(RecordingObserver::default());
    let driver = AllocationDriver::new(collector.clone(), observer.clone());

    driver.run(request(1, CollectionStrategy::Manual));

    assert_eq!(collector.samples(), 1);
    assert_eq!(observer.report_count(), 1);
}
