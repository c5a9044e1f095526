/*!
 * Allocation route handlers
 */

use crate::api::http::{HttpRequest, QueryParams, Response};
use crate::api::types::{ApiError, StatusCode};
use crate::api::validation::parse_allocation_request;
use crate::memory::{HeapReport, HeapSnapshot};
use crate::workload::AllocationDriver;
use serde::Serialize;
use tracing::{error, info, warn};

pub const ALLOCATE_PATH: &str = "/allocate";
pub const HEAP_PATH: &str = "/heap";

const ALLOCATION_COMPLETED: &str = "Memory allocation completed\n";

/// Body of `/heap`
#[derive(Debug, Serialize)]
struct HeapStatus {
    report: HeapReport,
    snapshot: HeapSnapshot,
}

/// Dispatch a request by path
///
/// Returns `None` when the workload aborted; the connection is then closed
/// without a response.
pub async fn route(driver: &AllocationDriver, request: &HttpRequest) -> Option<Response> {
    match request.path.as_str() {
        ALLOCATE_PATH => handle_allocate(driver, &request.query).await,
        HEAP_PATH => Some(handle_heap(driver)),
        _ => Some(Response::from_error(&ApiError::NotFound)),
    }
}

/// Validate, then run the workload on the blocking pool
pub async fn handle_allocate(driver: &AllocationDriver, query: &QueryParams) -> Option<Response> {
    let allocation = match parse_allocation_request(query) {
        Ok(allocation) => allocation,
        Err(e) => {
            warn!(error = %e, "Rejected allocation request");
            return Some(Response::from_error(&e));
        }
    };

    info!(
        size = allocation.size.get(),
        strategy = %allocation.strategy,
        "Received request with N={} and GC type={}",
        allocation.size,
        allocation.strategy
    );
    info!(
        strategy = %allocation.strategy,
        "Running allocation with {} GC...",
        allocation.strategy
    );

    let driver = driver.clone();
    match tokio::task::spawn_blocking(move || driver.run(allocation)).await {
        Ok(()) => Some(Response::text(StatusCode::Ok, ALLOCATION_COMPLETED)),
        Err(e) => {
            error!(error = %e, "Allocation workload aborted");
            None
        }
    }
}

/// Current heap counters as JSON
pub fn handle_heap(driver: &AllocationDriver) -> Response {
    let snapshot = driver.reporter().snapshot();
    let status = HeapStatus {
        report: HeapReport::from(snapshot),
        snapshot,
    };

    match serde_json::to_string(&status) {
        Ok(body) => Response::json(StatusCode::Ok, body),
        Err(e) => {
            error!(error = %e, "Failed to serialize heap status");
            Response::text(StatusCode::InternalServerError, "Internal Server Error\n")
        }
    }
}
