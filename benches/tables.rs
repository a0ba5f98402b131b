#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashMap;

use criterion::{Criterion, criterion_group, criterion_main};
use primehash::{ChainedTable, OpenAddressingTable, hash_function_2};
use proptest::{
    prelude::{Strategy, any, prop},
    strategy::ValueTree,
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;
const INITIAL_CAPACITY: usize = 11;

fn hash_table_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = prop::collection::vec(("[a-z]{1,12}", any::<u64>()), ITEMS_AMOUNT)
        .new_tree(&mut runner)
        .unwrap()
        .current();

    let mut group = c.benchmark_group("Hash table comparison benchmark");
    group.sample_size(SAMPLE_SIZE);

    group.bench_function("open addressing put", |b| {
        b.iter(|| {
            let mut table = OpenAddressingTable::new(INITIAL_CAPACITY, hash_function_2);
            for (key, value) in items.clone() {
                table.put(key, value).unwrap();
            }
            table
        });
    });
    group.bench_function("chaining put", |b| {
        b.iter(|| {
            let mut table = ChainedTable::new(INITIAL_CAPACITY, hash_function_2);
            for (key, value) in items.clone() {
                table.put(key, value);
            }
            table
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            let mut map = HashMap::new();
            for (key, value) in items.clone() {
                map.insert(key, value);
            }
            map
        });
    });

    let mut open_table = OpenAddressingTable::new(INITIAL_CAPACITY, hash_function_2);
    let mut chained_table = ChainedTable::new(INITIAL_CAPACITY, hash_function_2);
    let mut rust_map = HashMap::new();
    for (key, value) in items.clone() {
        open_table.put(key.clone(), value).unwrap();
        chained_table.put(key.clone(), value);
        rust_map.insert(key, value);
    }

    group.bench_function("open addressing get", |b| {
        b.iter(|| items.iter().filter(|(key, _)| open_table.get(key).is_some()).count());
    });
    group.bench_function("chaining get", |b| {
        b.iter(|| items.iter().filter(|(key, _)| chained_table.get(key).is_some()).count());
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| items.iter().filter(|(key, _)| rust_map.get(key).is_some()).count());
    });
    group.finish();
}

criterion_group!(benches, hash_table_benches);

criterion_main!(benches);
