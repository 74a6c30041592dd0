use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lru_slab::config::LruCacheConfig;
use lru_slab::LruCache;
use std::num::NonZeroUsize;

// Helper to create a cache with the init pattern
fn make_lru<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
        max_size: u64::MAX,
    };
    LruCache::init(config, None)
}

/// Cache filled with three times its capacity, so only the last third of the
/// keys is still resident.
fn make_warm_lru(cap: usize) -> LruCache<usize, usize> {
    let mut cache = make_lru(cap);
    for i in 0..cap * 3 {
        cache.put(i, i);
    }
    cache
}

pub fn criterion_benchmark(c: &mut Criterion) {
    const CACHE_SIZE: usize = 10_000;
    const ITEMS_TO_INSERT: usize = CACHE_SIZE * 3;
    const ITEMS_TO_READ: usize = CACHE_SIZE * 2;

    let mut group = c.benchmark_group("LRU Operations");

    group.throughput(Throughput::Elements(ITEMS_TO_INSERT as u64));
    group.bench_function("LRU put with eviction", |b| {
        let mut cache = make_lru(CACHE_SIZE);
        b.iter(|| {
            for i in 0..ITEMS_TO_INSERT {
                black_box(cache.put(i, i));
            }
        });
    });

    group.bench_function("LRU put existing", |b| {
        let mut cache = make_warm_lru(CACHE_SIZE);
        b.iter(|| {
            for i in 0..ITEMS_TO_INSERT {
                black_box(cache.put(CACHE_SIZE * 2 + i % CACHE_SIZE, i));
            }
        });
    });

    // Reads span both evicted and resident keys, half hits and half misses
    group.throughput(Throughput::Elements(ITEMS_TO_READ as u64));
    group.bench_function("LRU get", |b| {
        let mut cache = make_warm_lru(CACHE_SIZE);
        b.iter(|| {
            for i in CACHE_SIZE..CACHE_SIZE + ITEMS_TO_READ {
                black_box(cache.get(&i));
            }
        });
    });

    group.bench_function("LRU try_get", |b| {
        let mut cache = make_warm_lru(CACHE_SIZE);
        b.iter(|| {
            for i in CACHE_SIZE..CACHE_SIZE + ITEMS_TO_READ {
                black_box(cache.try_get(&i).is_ok());
            }
        });
    });

    group.bench_function("LRU peek", |b| {
        let cache = make_warm_lru(CACHE_SIZE);
        b.iter(|| {
            for i in CACHE_SIZE..CACHE_SIZE + ITEMS_TO_READ {
                black_box(cache.peek(&i));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
