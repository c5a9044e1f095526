/*!
 * Tracing Observer
 * Emits workload observations as structured log lines
 */

use super::traits::Observer;
use super::types::Observation;
use tracing::info;

/// Observer that writes every observation at INFO
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&self, observation: &Observation) {
        match observation {
            Observation::Started { strategy } => {
                info!(strategy = %strategy, "{}", observation);
            }
            Observation::Cycle { index, units } => {
                info!(cycle = index, units = units, "{}", observation);
            }
            Observation::Finished => {
                info!("{}", observation);
            }
            Observation::HeapReport(report) => {
                info!(
                    alloc_mb = report.alloc_mb,
                    total_alloc_mb = report.total_alloc_mb,
                    heap_alloc_mb = report.heap_alloc_mb,
                    "{}",
                    observation
                );
            }
        }
    }
}
