//! Construction parameters for [`ProbingHashTable`](crate::ProbingHashTable)

use log::debug;

use crate::ConfigError;

/// Smallest capacity a table is created with
pub const MIN_CAPACITY: usize = 5;
/// Capacity used by `ProbingHashTable::new`
pub const DEFAULT_CAPACITY: usize = 10;
/// Load factor used when none (or an out-of-range one) is given
pub const DEFAULT_LOAD_FACTOR: f64 = 0.7;
/// Lowest accepted load factor
pub const MIN_LOAD_FACTOR: f64 = 0.45;
/// Highest accepted load factor
pub const MAX_LOAD_FACTOR: f64 = 0.8;

/// How a lookup walks the probe sequence.
///
/// Both modes visit `[home, capacity)` and then wrap to `[0, home)`. Since entries are never
/// removed, they always agree on the result; they differ only in how many slots a miss costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeMode {
    /// Skip over empty slots and keep scanning until a match or the end of the wrapped range.
    #[default]
    FullScan,
    /// Stop at the first empty slot, as textbook linear probing does.
    EarlyExit,
}

/// Parameters for building a table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Initial number of slots
    pub capacity: usize,
    /// Fraction of slots that may be filled before the table grows
    pub load_factor: f64,
    /// Lookup termination rule
    pub probe_mode: ProbeMode,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            probe_mode: ProbeMode::default(),
        }
    }
}

impl TableConfig {
    /// Creates a config with the given capacity and load factor and the default probe mode.
    ///
    /// No validation happens here; see [`normalized`](Self::normalized) and
    /// [`validate`](Self::validate).
    #[must_use]
    pub fn new(capacity: usize, load_factor: f64) -> Self {
        Self { capacity, load_factor, probe_mode: ProbeMode::default() }
    }

    /// Sets the probe mode
    #[must_use]
    pub fn with_probe_mode(mut self, probe_mode: ProbeMode) -> Self {
        self.probe_mode = probe_mode;
        self
    }

    /// Returns a copy with the capacity raised to [`MIN_CAPACITY`] and an out-of-range or NaN
    /// load factor replaced by [`DEFAULT_LOAD_FACTOR`].
    #[must_use]
    pub fn normalized(self) -> Self {
        let capacity = self.capacity.max(MIN_CAPACITY);
        let load_factor = if load_factor_in_range(self.load_factor) {
            self.load_factor
        } else {
            DEFAULT_LOAD_FACTOR
        };

        if capacity != self.capacity || load_factor.to_bits() != self.load_factor.to_bits() {
            debug!(
                "clamped table config: capacity {} -> {capacity}, load factor {} -> {load_factor}",
                self.capacity, self.load_factor
            );
        }

        Self { capacity, load_factor, probe_mode: self.probe_mode }
    }

    /// Checks the parameters without correcting them.
    ///
    /// # Errors
    ///
    /// [`ConfigError::CapacityTooSmall`] when `capacity < MIN_CAPACITY`, and
    /// [`ConfigError::LoadFactorOutOfRange`] when the load factor is NaN or outside
    /// `MIN_LOAD_FACTOR..=MAX_LOAD_FACTOR`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity < MIN_CAPACITY {
            return Err(ConfigError::CapacityTooSmall {
                capacity: self.capacity,
                minimum: MIN_CAPACITY,
            });
        }
        if !load_factor_in_range(self.load_factor) {
            return Err(ConfigError::LoadFactorOutOfRange {
                load_factor: self.load_factor,
                min: MIN_LOAD_FACTOR,
                max: MAX_LOAD_FACTOR,
            });
        }
        Ok(())
    }

    /// Entry count at which a table with this config grows
    #[must_use]
    pub fn resize_threshold(&self) -> usize {
        resize_threshold(self.capacity, self.load_factor)
    }
}

/// `floor(capacity * load_factor)`
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub(crate) fn resize_threshold(capacity: usize, load_factor: f64) -> usize {
    (capacity as f64 * load_factor).floor() as usize
}

/// NaN fails both comparisons
fn load_factor_in_range(load_factor: f64) -> bool {
    (MIN_LOAD_FACTOR..=MAX_LOAD_FACTOR).contains(&load_factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        let config = TableConfig::default();
        assert_eq!(config.capacity, 10);
        assert_eq!(config.resize_threshold(), 7);
        assert_eq!(config.probe_mode, ProbeMode::FullScan);
    }

    #[test]
    fn test_normalized_clamps_capacity() {
        let config = TableConfig::new(2, 0.5).normalized();
        assert_eq!(config.capacity, MIN_CAPACITY);
        assert!((config.load_factor - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalized_replaces_bad_load_factor() {
        for load_factor in [0.0, 0.44, 0.81, 1.5, -0.7, f64::NAN] {
            let config = TableConfig::new(20, load_factor).normalized();
            assert!((config.load_factor - DEFAULT_LOAD_FACTOR).abs() < f64::EPSILON);
            assert_eq!(config.resize_threshold(), 14);
        }
    }

    #[test]
    fn test_normalized_keeps_bounds() {
        let low = TableConfig::new(100, MIN_LOAD_FACTOR).normalized();
        assert_eq!(low.resize_threshold(), 45);

        let high = TableConfig::new(100, MAX_LOAD_FACTOR).normalized();
        assert_eq!(high.resize_threshold(), 80);
    }

    #[test]
    fn test_validate() {
        assert_eq!(TableConfig::default().validate(), Ok(()));
        assert_eq!(
            TableConfig::new(4, 0.7).validate(),
            Err(ConfigError::CapacityTooSmall { capacity: 4, minimum: 5 })
        );
        assert!(matches!(
            TableConfig::new(10, 0.9).validate(),
            Err(ConfigError::LoadFactorOutOfRange { .. })
        ));
        assert!(TableConfig::new(10, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_probe_mode_builder() {
        let config = TableConfig::default().with_probe_mode(ProbeMode::EarlyExit);
        assert_eq!(config.probe_mode, ProbeMode::EarlyExit);
        assert_eq!(config.normalized().probe_mode, ProbeMode::EarlyExit);
    }
}
