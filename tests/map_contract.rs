use std::{
    collections::{HashMap, HashSet},
    hash::{BuildHasherDefault, Hasher},
};

use probemap::{Map, ProbeMode, ProbingHashTable, TableConfig};
use test_log::test;

/// Maps a `u64` key to itself so tests can pick home slots
#[derive(Default)]
struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 = self.0.wrapping_shl(8) | u64::from(*byte);
        }
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }
}

fn courses(names: &[&str]) -> HashSet<String> {
    names.iter().map(ToString::to_string).collect()
}

fn string_keys<M: Map<String, HashSet<String>>>(mut map: M) {
    let first = courses(&["LinPro3", "ArqSof", "Comp"]);
    let second = courses(&["EngSof", "ArqComp", "PAA"]);
    map.put("Disciplinas1".to_string(), first.clone());
    map.put("Disciplinas2".to_string(), second.clone());

    assert_eq!(map.get("Disciplinas1"), Some(&first));
    assert_eq!(map.get("Disciplinas2"), Some(&second));
    assert_eq!(map.get("Disciplinas3"), None);
}

fn integer_keys<M: Map<i32, &'static str>>(mut map: M) {
    map.put(1, "LinPro3");
    map.put(2, "ArqSoft");
    assert_eq!(map.get(&1), Some(&"LinPro3"));
    assert_eq!(map.get(&2), Some(&"ArqSoft"));
    assert_eq!(map.get(&-1), None);

    map.put(2, "PAA");
    assert_eq!(map.get(&2), Some(&"PAA"));
    assert_eq!(map.get(&1), Some(&"LinPro3"));
}

#[test]
fn test_string_keys() {
    string_keys(ProbingHashTable::new());
    string_keys(HashMap::new());
}

#[test]
fn test_integer_keys() {
    integer_keys(ProbingHashTable::new());
    integer_keys(HashMap::new());
}

#[test]
fn test_growth_keeps_entries() {
    let mut table = ProbingHashTable::new();
    let threshold = table.resize_threshold();
    let capacity = table.capacity();

    for i in 0..threshold {
        table.put(format!("key-{i}"), i);
    }

    assert_ne!(table.capacity(), capacity);
    assert_eq!(table.len(), threshold);
    for i in 0..threshold {
        assert_eq!(table.get(&format!("key-{i}")), Some(&i));
    }
}

#[test]
fn test_colliding_keys_both_kept() {
    let config = TableConfig::new(10, 0.7);
    for probe_mode in [ProbeMode::FullScan, ProbeMode::EarlyExit] {
        let mut table: ProbingHashTable<u64, &str, BuildHasherDefault<IdentityHasher>> =
            ProbingHashTable::with_config_and_hasher(
                config.with_probe_mode(probe_mode),
                BuildHasherDefault::default(),
            );

        // Both keys have home slot 4
        table.put(4, "four");
        table.put(14, "fourteen");

        assert_eq!(table.get(&4), Some(&"four"));
        assert_eq!(table.get(&14), Some(&"fourteen"));
        assert_eq!(table.len(), 2);
        assert_eq!(table.to_string(), "4;four\n14;fourteen\n");
    }
}

#[test]
fn test_missing_key_is_noop() {
    let mut table: ProbingHashTable<String, i32> = ProbingHashTable::new();
    table.put("kept".to_string(), 1);

    table.put_opt(None, 2);
    assert_eq!(table.get_opt::<str>(None), None);
    assert_eq!(table.len(), 1);
    assert_eq!(table.to_string(), "kept;1\n");
}

#[test]
fn test_repeated_put() {
    let mut table = ProbingHashTable::new();
    table.put("k", 7);
    let before = table.to_string();
    table.put("k", 7);

    assert_eq!(table.to_string(), before);
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("k"), Some(&7));
}
