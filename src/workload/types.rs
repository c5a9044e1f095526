/*!
 * Workload Types
 * Requests, strategies and observations
 */

use crate::core::types::Size;
use crate::memory::HeapReport;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use thiserror::Error;

/// Whether the collector is asked to run after every cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionStrategy {
    /// Force a collection pass after each cycle
    Manual,
    /// Leave reclamation to the collector's own schedule
    Auto,
}

impl CollectionStrategy {
    pub fn forces_collection(self) -> bool {
        matches!(self, CollectionStrategy::Manual)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CollectionStrategy::Manual => "manual",
            CollectionStrategy::Auto => "auto",
        }
    }
}

impl fmt::Display for CollectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy name that is neither `manual` nor `auto`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown collection strategy '{0}'")]
pub struct UnknownStrategy(pub String);

impl FromStr for CollectionStrategy {
    type Err = UnknownStrategy;

    /// Case-insensitive match on `manual` / `auto`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("manual") {
            Ok(CollectionStrategy::Manual)
        } else if s.eq_ignore_ascii_case("auto") {
            Ok(CollectionStrategy::Auto)
        } else {
            Err(UnknownStrategy(s.to_string()))
        }
    }
}

/// One validated workload invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationRequest {
    /// Bytes appended per cycle
    pub size: NonZeroUsize,
    pub strategy: CollectionStrategy,
}

impl AllocationRequest {
    pub fn new(size: NonZeroUsize, strategy: CollectionStrategy) -> Self {
        Self { size, strategy }
    }
}

/// Progress line emitted by the workload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    Started { strategy: CollectionStrategy },
    Cycle { index: usize, units: Size },
    Finished,
    HeapReport(HeapReport),
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Observation::Started {
                strategy: CollectionStrategy::Manual,
            } => write!(
                f,
                "Starting to allocate memory (with manual GC after each iteration)..."
            ),
            Observation::Started {
                strategy: CollectionStrategy::Auto,
            } => write!(
                f,
                "Starting to allocate memory (with auto GC after all iterations)..."
            ),
            Observation::Cycle { index, units } => {
                write!(f, "Iteration {}: Allocated {} bytes", index, units)
            }
            Observation::Finished => write!(f, "Finished all iterations."),
            Observation::HeapReport(report) => write!(f, "{}", report),
        }
    }
}
