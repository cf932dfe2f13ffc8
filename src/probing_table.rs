use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    fmt,
    hash::{BuildHasher, Hash},
    iter, mem, slice,
};

use log::{debug, trace, warn};

use crate::{
    config::{ProbeMode, TableConfig, resize_threshold},
    ConfigError, InsertError,
};

/// An occupied slot
#[derive(Debug, Clone)]
struct Slot<K, V> {
    /// The key stored in the slot
    key: K,
    /// The value associated with the key
    value: V,
}

/// Result of walking the probe sequence for a key
#[derive(Debug, Clone, Copy)]
struct Search {
    /// Slot holding the key, if any
    index: Option<usize>,
    /// Number of slots inspected
    probes: usize,
}

/// A hash table using open addressing with linear probing and wrap-around search.
///
/// Every key has a home slot, `hash(key) % capacity`. Lookups scan from the home slot to the
/// end of the table and then wrap to the front, up to the home slot. Insertions take the first
/// slot in that order that is either empty or already holds the key.
///
/// The table grows by doubling once the number of entries reaches
/// `floor(capacity * load_factor)`, so there is always at least one free slot. Entries are
/// never removed.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock for shared use.
#[derive(Debug, Clone)]
pub struct ProbingHashTable<K, V, S = RandomState> {
    /// The slots storing the key-value pairs
    slots: Box<[Option<Slot<K, V>>]>,
    /// Number of occupied slots
    count: usize,
    /// Entry count at which the table grows
    resize_threshold: usize,
    /// Fraction of slots that may be filled, in `MIN_LOAD_FACTOR..=MAX_LOAD_FACTOR`
    load_factor: f64,
    /// Lookup termination rule
    probe_mode: ProbeMode,
    /// How many times the table has grown
    resizes: usize,
    /// Builds the hasher for home slot computation
    hash_builder: S,
}

impl<K, V> ProbingHashTable<K, V, RandomState> {
    /// Creates a table with 10 slots and a load factor of 0.7
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    /// Creates a table with the given capacity and load factor.
    ///
    /// The capacity is raised to at least [`MIN_CAPACITY`](crate::MIN_CAPACITY). A load factor
    /// outside `0.45..=0.8` (or NaN) is replaced by 0.7.
    #[must_use]
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f64) -> Self {
        Self::with_config(TableConfig::new(capacity, load_factor))
    }

    /// Creates a table from a config, clamping invalid parameters
    #[must_use]
    pub fn with_config(config: TableConfig) -> Self {
        Self::with_config_and_hasher(config, RandomState::new())
    }

    /// Creates a table from a config, rejecting invalid parameters instead of clamping them.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`TableConfig::validate`].
    pub fn try_with_config(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }
}

impl<K, V, S> ProbingHashTable<K, V, S> {
    /// Creates a default-sized table that hashes keys with `hash_builder`
    #[must_use]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_config_and_hasher(TableConfig::default(), hash_builder)
    }

    /// Creates a table from a config and hasher, clamping invalid parameters
    #[must_use]
    pub fn with_config_and_hasher(config: TableConfig, hash_builder: S) -> Self {
        let config = config.normalized();
        Self {
            slots: empty_slots(config.capacity),
            count: 0,
            resize_threshold: config.resize_threshold(),
            load_factor: config.load_factor,
            probe_mode: config.probe_mode,
            resizes: 0,
            hash_builder,
        }
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the entry count that triggers the next resize
    #[must_use]
    pub fn resize_threshold(&self) -> usize {
        self.resize_threshold
    }

    /// Returns the configured load factor
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns the lookup termination rule
    #[must_use]
    pub fn probe_mode(&self) -> ProbeMode {
        self.probe_mode
    }

    /// Returns how many times the table has grown
    #[must_use]
    pub fn resize_count(&self) -> usize {
        self.resizes
    }

    /// Returns an iterator over the entries in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: self.slots.iter() }
    }

    /// Returns an iterator over the keys in slot order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in slot order
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K, V, S> ProbingHashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Retrieves the value stored for `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.search(key).index?;
        self.slots.get(index)?.as_ref().map(|slot| &slot.value)
    }

    /// Retrieves a mutable reference to the value stored for `key`
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.search(key).index?;
        self.slots.get_mut(index)?.as_mut().map(|slot| &mut slot.value)
    }

    /// Returns true if the table holds `key`
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.search(key).index.is_some()
    }

    /// Returns the number of slots a lookup of `key` inspects, whether or not it is found.
    ///
    /// A hit at the home slot costs 1. Under [`ProbeMode::FullScan`] a miss always costs
    /// the full capacity.
    pub fn probe_count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.search(key).probes
    }

    /// Lookup for a key that may be missing altogether; `None` yields `None`.
    pub fn get_opt<Q>(&self, key: Option<&Q>) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        key.and_then(|key| self.get(key))
    }

    /// Inserts or overwrites the entry for `key`, returning the previous value.
    ///
    /// Grows the table once the entry count reaches the resize threshold.
    ///
    /// # Errors
    ///
    /// [`InsertError::NoSlot`] when no slot in either probe range is vacant or holds `key`.
    /// The entry is dropped and the table is left unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, InsertError> {
        let previous = self.place(key, value)?;
        if self.count >= self.resize_threshold {
            self.resize();
        }
        Ok(previous)
    }

    /// Inserts or overwrites the entry for `key`.
    ///
    /// A write that cannot be placed is logged and dropped.
    pub fn put(&mut self, key: K, value: V) {
        if let Err(err) = self.insert(key, value) {
            warn!("dropped write: {err}");
        }
    }

    /// Insertion for a key that may be missing altogether; `None` leaves the table untouched.
    pub fn put_opt(&mut self, key: Option<K>, value: V) {
        if let Some(key) = key {
            self.put(key, value);
        }
    }

    /// Gets the home slot for a key
    #[allow(clippy::cast_possible_truncation)]
    fn home_index<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        let capacity = self.slots.len().max(1) as u64;
        (self.hash_builder.hash_one(key) % capacity) as usize
    }

    /// Walks `[home, capacity)` then `[0, home)` looking for `key`
    fn search<Q>(&self, key: &Q) -> Search
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let home = self.home_index(key);
        let mut probes: usize = 0;

        for index in (home..self.slots.len()).chain(0..home) {
            probes = probes.saturating_add(1);
            match self.slots.get(index) {
                Some(Some(slot)) if slot.key.borrow() == key => {
                    return Search { index: Some(index), probes };
                }
                Some(None) if self.probe_mode == ProbeMode::EarlyExit => break,
                _ => {}
            }
        }

        Search { index: None, probes }
    }

    /// Index of the first slot in `[start, end)` that is empty or holds `key`
    fn locate(&self, key: &K, start: usize, end: usize) -> Option<usize> {
        self.slots
            .get(start..end)?
            .iter()
            .position(|slot| slot.as_ref().is_none_or(|slot| slot.key == *key))
            .map(|offset| start.saturating_add(offset))
    }

    /// Puts an entry into the current slots without checking the resize threshold
    fn place(&mut self, key: K, value: V) -> Result<Option<V>, InsertError> {
        let capacity = self.slots.len();
        let home = self.home_index(&key);
        let index = self
            .locate(&key, home, capacity)
            .or_else(|| self.locate(&key, 0, home))
            .ok_or(InsertError::NoSlot { capacity })?;

        let slot = self.slots.get_mut(index).ok_or(InsertError::NoSlot { capacity })?;
        if let Some(occupied) = slot {
            return Ok(Some(mem::replace(&mut occupied.value, value)));
        }

        *slot = Some(Slot { key, value });
        self.count = self.count.saturating_add(1);
        trace!("placed entry at slot {index} (home {home})");
        Ok(None)
    }

    /// Doubles the capacity and reinserts every entry in slot order
    fn resize(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = old_capacity.saturating_mul(2);
        let old_slots = mem::replace(&mut self.slots, empty_slots(new_capacity));

        self.resize_threshold = resize_threshold(new_capacity, self.load_factor);
        self.count = 0;

        for Slot { key, value } in old_slots.into_vec().into_iter().flatten() {
            if let Err(err) = self.place(key, value) {
                warn!("lost entry while resizing: {err}");
            }
        }

        self.resizes = self.resizes.saturating_add(1);
        debug!(
            "resized table from {old_capacity} to {new_capacity} slots, {} entries, next resize at {}",
            self.count, self.resize_threshold
        );
    }
}

/// Allocates `capacity` empty slots
fn empty_slots<K, V>(capacity: usize) -> Box<[Option<Slot<K, V>>]> {
    iter::repeat_with(|| None).take(capacity).collect()
}

impl<K, V, S> Default for ProbingHashTable<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Extend<(K, V)> for ProbingHashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ProbingHashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<'a, K, V, S> IntoIterator for &'a ProbingHashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders one `key;value` line per entry, in slot order
impl<K, V, S> fmt::Display for ProbingHashTable<K, V, S>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self {
            writeln!(f, "{key};{value}")?;
        }
        Ok(())
    }
}

/// Iterator over the entries of a [`ProbingHashTable`], in slot order
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Remaining slots
    slots: slice::Iter<'a, Option<Slot<K, V>>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(Option::as_ref).map(|slot| (&slot.key, &slot.value))
    }
}
