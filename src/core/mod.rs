/*!
 * Core Module
 * Shared types and limits for the allocation service
 */

pub mod limits;
pub mod types;

// Re-export for convenience
pub use limits::*;
pub use types::*;
