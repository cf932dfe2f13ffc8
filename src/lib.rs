//! # Probe Map
//!
//! A hash table using open addressing with linear probing and wrap-around search.
//!
//! All entries live in one contiguous slice of slots. A key starts probing at its home slot,
//! `hash(key) % capacity`, scans to the end of the slice and then wraps to the front. The table
//! doubles its capacity when the number of entries reaches `floor(capacity * load_factor)`.
//!
//! ## Basic Usage
//!
//! ```rust
//! use probemap::ProbingHashTable;
//!
//! // 10 slots, load factor 0.7: grows on the 7th entry
//! let mut table = ProbingHashTable::new();
//!
//! table.put("apple".to_string(), 1);
//! table.put("banana".to_string(), 2);
//! assert_eq!(table.get("apple"), Some(&1));
//! assert_eq!(table.get("cherry"), None);
//!
//! // Overwrite
//! table.put("apple".to_string(), 10);
//! assert_eq!(table.get("apple"), Some(&10));
//! assert_eq!(table.len(), 2);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use probemap::{ConfigError, ProbeMode, ProbingHashTable, TableConfig};
//!
//! // Out-of-range parameters are clamped...
//! let table: ProbingHashTable<u32, u32> = ProbingHashTable::with_capacity_and_load_factor(2, 0.99);
//! assert_eq!(table.capacity(), 5);
//! assert_eq!(table.resize_threshold(), 3);
//!
//! // ...unless the strict constructor is used.
//! let strict = ProbingHashTable::<u32, u32>::try_with_config(TableConfig::new(2, 0.7));
//! assert!(matches!(strict, Err(ConfigError::CapacityTooSmall { .. })));
//!
//! let config = TableConfig::new(64, 0.5).with_probe_mode(ProbeMode::EarlyExit);
//! let table: ProbingHashTable<u32, u32> = ProbingHashTable::with_config(config);
//! assert_eq!(table.resize_threshold(), 32);
//! ```
//!
//! ## Dump
//!
//! ```rust
//! use probemap::ProbingHashTable;
//!
//! let mut table = ProbingHashTable::new();
//! table.put("k", "v");
//! assert_eq!(table.to_string(), "k;v\n");
//! ```

/// Table construction parameters
mod config;
/// Error types
mod error;
/// The mapping contract
mod map;
/// Module implementing the linear probing hash table
mod probing_table;

pub use config::{
    DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, MAX_LOAD_FACTOR, MIN_CAPACITY, MIN_LOAD_FACTOR,
    ProbeMode, TableConfig,
};
pub use error::{ConfigError, InsertError};
pub use map::Map;
pub use probing_table::{Iter, ProbingHashTable};
