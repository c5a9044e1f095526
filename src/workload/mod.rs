/*!
 * Workload Module
 * Allocation driver, heap reporter and the observation side channel
 */

pub mod driver;
pub mod observer;
pub mod reporter;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use driver::AllocationDriver;
pub use observer::TracingObserver;
pub use reporter::HeapReporter;
pub use traits::*;
pub use types::*;
