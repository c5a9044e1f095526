/*!
 * Memory Traits
 * Collector abstraction used by the allocation workload
 */

use super::types::*;
use crate::core::types::Size;

/// Process-wide allocator/collector capability
///
/// The workload only talks to the heap through this trait so it can run
/// against a fake in tests and against [`super::ManagedHeap`] in production.
pub trait Collector: Send + Sync {
    /// Hand out an empty block with room for `capacity` bytes
    fn allocate(&self, capacity: Size) -> Block;

    /// Return ownership of a block; it becomes eligible for reclamation
    fn release(&self, block: Block);

    /// Reclaim every released block now, blocking until done
    fn force_collect(&self) -> GcStats;

    /// Read current heap counters
    fn sample(&self) -> HeapSnapshot;
}
