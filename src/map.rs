//! The minimal mapping contract shared by [`ProbingHashTable`] and the standard map

use std::{
    borrow::Borrow,
    collections::HashMap,
    hash::{BuildHasher, Hash},
};

use crate::ProbingHashTable;

/// Retrieve a value by key and insert or overwrite a key-value association.
pub trait Map<K, V> {
    /// Returns the value associated with `key`, if any
    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Associates `value` with `key`, replacing any previous value
    fn put(&mut self, key: K, value: V);

    /// Returns true if the map holds `key`
    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }
}

impl<K, V, S> Map<K, V> for ProbingHashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Self::get(self, key)
    }

    fn put(&mut self, key: K, value: V) {
        Self::put(self, key, value);
    }

    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Self::contains_key(self, key)
    }
}

impl<K, V, S> Map<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Self::get(self, key)
    }

    fn put(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}
