//! Errors reported by the hash tables

use thiserror::Error;

/// Failure of a table operation.
///
/// Missing keys are never errors; lookups and removals report absence through
/// `Option`/`bool`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// An explicit resize asked for fewer buckets than the live entries need
    #[error("capacity {requested} cannot hold {size} live entries")]
    CapacityTooSmall {
        /// The rejected capacity
        requested: usize,
        /// Live entries at the time of the request
        size: usize,
    },

    /// Quadratic probing visited `capacity` slots without finding room for the key
    #[error("probe sequence exhausted after {capacity} slots ({size} live entries)")]
    ProbeExhausted {
        /// Bucket count of the table
        capacity: usize,
        /// Live entries in the table
        size: usize,
    },
}
