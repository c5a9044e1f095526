/*!
 * Workload Traits
 * Observation sink abstraction
 */

use super::types::Observation;

/// Receives the workload's progress lines in order
pub trait Observer: Send + Sync {
    fn observe(&self, observation: &Observation);
}
