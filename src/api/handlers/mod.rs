/*!
 * Handler implementations for HTTP routes
 */

pub mod allocation_handlers;

pub use allocation_handlers::{route, ALLOCATE_PATH, HEAP_PATH};
