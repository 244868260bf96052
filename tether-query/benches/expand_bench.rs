//! Benchmarks for expand path normalization and relation expansion.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

use tether_query::{BatchedFetcher, MemoryStore, RecordExpander, normalize_expands};
use tether_schema::{Collection, Field, Record, RelationOptions};

// ============================================================================
// Path normalization
// ============================================================================

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_expands");

    group.bench_function("small", |b| {
        b.iter(|| black_box(normalize_expands(&["a.b.c", "a.b", "   test  ", "  ", "test"])))
    });

    for count in [10usize, 50, 200] {
        let paths: Vec<String> = (0..count)
            .map(|i| format!(" rel{}.sub{}.leaf ", i % 17, i % 5))
            .collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("paths", count), &paths, |b, paths| {
            b.iter(|| black_box(normalize_expands(paths.as_slice())))
        });
    }

    group.finish();
}

// ============================================================================
// Expansion over the in-memory store
// ============================================================================

/// `posts.author -> users.team -> teams`, with `posts.tags -> tags`.
fn seeded_store(posts: usize) -> (MemoryStore, Vec<Record>) {
    let store = MemoryStore::new();
    let teams = store
        .register(Collection::new("c_teams", "teams").with_field(Field::text("name")))
        .unwrap();
    let users = store
        .register(
            Collection::new("c_users", "users")
                .with_field(Field::text("name"))
                .with_field(Field::relation("team", RelationOptions::new("c_teams").single())),
        )
        .unwrap();
    let tags = store
        .register(Collection::new("c_tags", "tags").with_field(Field::text("label")))
        .unwrap();
    let post_collection = store
        .register(
            Collection::new("c_posts", "posts")
                .with_field(Field::relation("author", RelationOptions::new("c_users").single()))
                .with_field(Field::relation("tags", RelationOptions::new("c_tags"))),
        )
        .unwrap();

    store
        .insert_many((0..10).map(|i| Record::new(Arc::clone(&teams), format!("team{i}"))))
        .unwrap();
    store
        .insert_many((0..100).map(|i| {
            Record::new(Arc::clone(&users), format!("u{i}")).with("team", format!("team{}", i % 10))
        }))
        .unwrap();
    store
        .insert_many((0..50).map(|i| Record::new(Arc::clone(&tags), format!("t{i}"))))
        .unwrap();

    let records = (0..posts)
        .map(|i| {
            Record::new(Arc::clone(&post_collection), format!("p{i}"))
                .with("author", format!("u{}", i % 100))
                .with(
                    "tags",
                    serde_json::json!([format!("t{}", i % 50), format!("t{}", (i + 7) % 50)]),
                )
        })
        .collect();

    (store, records)
}

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand_records");

    for count in [10usize, 100, 1000] {
        let (store, records) = seeded_store(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("single_hop", count), &records, |b, records| {
            let expander = RecordExpander::new(&store).with_fetcher(&store);
            b.iter(|| {
                let mut batch = records.clone();
                expander.expand_many(&mut batch, &["author"]).unwrap();
                black_box(batch)
            })
        });

        group.bench_with_input(BenchmarkId::new("nested", count), &records, |b, records| {
            let expander = RecordExpander::new(&store).with_fetcher(&store);
            b.iter(|| {
                let mut batch = records.clone();
                expander
                    .expand_many(&mut batch, &["author.team", "tags"])
                    .unwrap();
                black_box(batch)
            })
        });
    }

    let (store, records) = seeded_store(1000);
    let batched = BatchedFetcher::new(|collection: &Arc<Collection>, ids: &[String]| {
        tether_query::RelationFetcher::fetch(&store, collection, ids)
    })
    .with_batch_size(64)
    .with_dedup(true);
    group.bench_function("batched_dedup_1000", |b| {
        let expander = RecordExpander::new(&store).with_fetcher(&batched);
        b.iter(|| {
            let mut batch = records.clone();
            expander
                .expand_many(&mut batch, &["author.team", "tags"])
                .unwrap();
            black_box(batch)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_expand);
criterion_main!(benches);
