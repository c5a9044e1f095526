/*!
 * API Module
 * HTTP transport for the allocation workload
 */

pub mod handlers;
pub mod http;
pub mod server;
pub mod types;
pub mod validation;

// Re-export for convenience
pub use server::AllocationServer;
pub use types::*;
