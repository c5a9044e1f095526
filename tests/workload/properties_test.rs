/*!
 * Workload Property Tests
 * Cycle invariants for arbitrary sizes and both strategies
 */

use crate::common::{CountingCollector, RecordingObserver};
use gc_check::workload::{AllocationDriver, AllocationRequest, CollectionStrategy, Observation};
use proptest::prelude::*;
use std::num::NonZeroUsize;
use std::sync::Arc;

fn strategy() -> impl Strategy<Value = CollectionStrategy> {
    prop_oneof![Just(CollectionStrategy::Manual), Just(CollectionStrategy::Auto)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_three_cycles_of_n_units(size in 1usize..5000, gc in strategy()) {
        let collector = Arc::new(CountingCollector::default());
        let observer = Arc::new(RecordingObserver::default());
        let driver = AllocationDriver::new(collector.clone(), observer.clone());

        driver.run(AllocationRequest::new(NonZeroUsize::new(size).unwrap(), gc));

        prop_assert_eq!(collector.allocations(), 3);
        let released = collector.released();
        prop_assert_eq!(released.len(), 3);
        prop_assert!(released.iter().all(|b| b.len == size && b.synthetic_content));

        let expected_forced = if gc == CollectionStrategy::Manual { 3 } else { 0 };
        prop_assert_eq!(collector.forced_collections(), expected_forced);

        prop_assert_eq!(observer.cycle_count(), 3);
        prop_assert_eq!(observer.report_count(), 1);
        let observations = observer.observations();
        prop_assert!(matches!(observations.last(), Some(Observation::HeapReport(_))));
    }
}
