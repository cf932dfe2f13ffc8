#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashMap;

use criterion::{Criterion, criterion_group, criterion_main};
use probemap::{ProbeMode, ProbingHashTable, TableConfig};
use proptest::{
    collection::vec,
    prelude::{Strategy, any},
    strategy::ValueTree,
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;

fn hash_map_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = vec((any::<String>(), any::<String>()), ITEMS_AMOUNT)
        .new_tree(&mut runner)
        .unwrap()
        .current();

    let mut group = c.benchmark_group("Hash map comparison benchmark");
    group.sample_size(SAMPLE_SIZE);

    let modes = [(ProbeMode::FullScan, "full scan"), (ProbeMode::EarlyExit, "early exit")];
    for (probe_mode, name) in modes {
        let config = TableConfig::default().with_probe_mode(probe_mode);
        group.bench_function(format!("probing {name} insert"), |b| {
            b.iter(|| {
                let mut table = ProbingHashTable::with_config(config);
                for (key, value) in items.clone() {
                    table.put(key, value);
                }
                table
            });
        });

        let mut table = ProbingHashTable::with_config(config);
        table.extend(items.clone());
        group.bench_function(format!("probing {name} get"), |b| {
            b.iter(|| items.iter().filter(|(key, _)| table.get(key).is_some()).count());
        });
        group.bench_function(format!("probing {name} miss"), |b| {
            b.iter(|| table.get("absent key").is_some());
        });
    }

    let mut rust_map = HashMap::new();
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                rust_map.insert(key, value);
            }
        });
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| items.iter().filter(|(key, _)| rust_map.get(key).is_some()).count());
    });
    group.finish();
}

criterion_group!(benches, hash_map_benches);

criterion_main!(benches);
