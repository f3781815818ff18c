//! Engine error kinds.
//!
//! Every engine operation is total over validated input: it signals one of
//! these kinds instead of returning a sentinel or coercing silently. None of
//! them is fatal — correcting the input and retrying the same operation is
//! always possible.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Malformed or out-of-range input (non-positive body metrics, a zero
    /// calorie burn rate).
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Completion is terminal; completing an activity twice is rejected.
    #[error("activity {id} is already completed")]
    InvalidTransition { id: String },

    /// Operation not permitted in the current state (removing a completed
    /// activity, adding a duplicate activity name).
    #[error("invalid operation: {reason}")]
    InvalidOperation { reason: String },

    /// Lookup miss: an activity id absent from the set, or a name absent
    /// from the catalog.
    #[error("not found: {id}")]
    NotFound { id: String },
}
