/*!
 * gc-check Library
 * Memory-pressure workload, heap reporting and its HTTP transport
 */

pub mod api;
pub mod core;
pub mod memory;
pub mod monitoring;
pub mod workload;

// Re-exports
pub use api::{AllocationServer, ApiError, ConfigError, ServerConfig, ServerError};
pub use memory::{
    Block, Collector, CountingAllocator, GcStats, HeapReport, HeapSnapshot, ManagedHeap,
};
pub use monitoring::init_tracing;
pub use workload::{
    AllocationDriver, AllocationRequest, CollectionStrategy, HeapReporter, Observation, Observer,
    TracingObserver,
};
