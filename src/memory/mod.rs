/*!
 * Memory Module
 * Heap accounting, collector abstraction and the managed heap
 */

pub mod counting;
pub mod gc;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use counting::{AllocatorCounters, CountingAllocator};
pub use gc::ManagedHeap;
pub use traits::*;
pub use types::*;
