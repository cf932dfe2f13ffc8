//! Error types for strict configuration and insertion

use thiserror::Error;

/// Rejected table parameters, produced by the strict construction path.
///
/// The lenient constructors never return this: they clamp instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Requested capacity is below the supported minimum
    #[error("capacity {capacity} is below the minimum of {minimum}")]
    CapacityTooSmall {
        /// The requested capacity
        capacity: usize,
        /// The smallest accepted capacity
        minimum: usize,
    },
    /// Load factor is NaN or outside the accepted range
    #[error("load factor {load_factor} is outside {min}..={max}")]
    LoadFactorOutOfRange {
        /// The requested load factor
        load_factor: f64,
        /// Lower bound (inclusive)
        min: f64,
        /// Upper bound (inclusive)
        max: f64,
    },
}

/// Failure to place an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsertError {
    /// Neither the tail nor the head probe range has a vacant or matching slot.
    ///
    /// The resize threshold keeps at least one slot free, so this only shows up if that
    /// invariant is broken.
    #[error("no vacant or matching slot among {capacity} slots")]
    NoSlot {
        /// Capacity of the table at the time of the failed insertion
        capacity: usize,
    },
}
