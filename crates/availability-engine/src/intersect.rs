//! Intersection of normalized ranges.
//!
//! The common window of N intervals is bounded by the latest start and the
//! earliest end. An empty or zero-width result is not a slot.

use crate::error::{EngineError, Result, ValidationErrors};
use crate::range::NormalizedRange;
use crate::schema::EMPTY_INPUT;
use crate::slot::ResultSlot;

/// Compute the tightest window contained in every range.
///
/// Only the max of the starts and the min of the ends matter, so the result
/// does not depend on input order.
///
/// # Errors
/// Returns `EngineError::NoOverlap` when the latest start is at or after the
/// earliest end. An empty slice is a `EngineError::Validation`.
pub fn intersect(ranges: &[NormalizedRange]) -> Result<ResultSlot> {
    let (from, to) = match ranges {
        [] => return Err(ValidationErrors::schema(EMPTY_INPUT).into()),
        // A lone range is its own intersection.
        [only] => (only.from, only.to),
        [first, rest @ ..] => rest.iter().fold((first.from, first.to), |(from, to), range| {
            (from.max(range.from), to.min(range.to))
        }),
    };

    // Touching ranges (from == to) have no usable overlap.
    if from >= to {
        return Err(EngineError::NoOverlap);
    }

    Ok(ResultSlot { from, to })
}
