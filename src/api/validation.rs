/*!
 * Request Validation
 * Boundary checks applied before the workload is ever invoked
 */

use super::http::QueryParams;
use super::types::{ApiError, ApiResult};
use crate::workload::{AllocationRequest, CollectionStrategy};
use std::num::NonZeroUsize;

/// Query key carrying the per-cycle size
pub const SIZE_PARAM: &str = "N";

/// Query key carrying the collection strategy
pub const STRATEGY_PARAM: &str = "gc";

/// Parse a strictly positive decimal size
pub fn parse_size(raw: Option<&str>) -> ApiResult<NonZeroUsize> {
    let value: i64 = raw
        .ok_or(ApiError::InvalidSize)?
        .parse()
        .map_err(|_| ApiError::InvalidSize)?;

    usize::try_from(value)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or(ApiError::InvalidSize)
}

/// Case-insensitive `manual` / `auto`; a missing value is invalid
pub fn parse_strategy(raw: Option<&str>) -> ApiResult<CollectionStrategy> {
    raw.unwrap_or_default()
        .parse()
        .map_err(|_| ApiError::InvalidStrategy)
}

/// Validate size first, then strategy
pub fn parse_allocation_request(query: &QueryParams) -> ApiResult<AllocationRequest> {
    let size = parse_size(query.get(SIZE_PARAM))?;
    let strategy = parse_strategy(query.get(STRATEGY_PARAM))?;
    Ok(AllocationRequest::new(size, strategy))
}
