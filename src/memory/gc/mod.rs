/*!
 * Garbage Collection
 * Deferred-release heap used as the production collector
 */

pub mod collector;

pub use collector::ManagedHeap;
