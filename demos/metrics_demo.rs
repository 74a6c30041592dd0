//! Cache Metrics Demonstration
//!
//! Runs the same workload against LRU caches of different capacities and
//! prints the metrics each one reports, showing how capacity drives hit rate,
//! evictions and utilization.

use lru_slab::{config::LruCacheConfig, metrics::CacheMetrics, LruCache};
use std::collections::BTreeMap;

fn main() {
    println!("🚀 LRU Cache Metrics Demonstration");
    println!("==================================\n");

    let capacities = [2usize, 4, 8];

    println!("📊 Running one workload against several capacities:");
    println!("   • Capacities: {:?}", capacities);
    println!("   • Operations: 8 inserts → repeated reads of a hot set → removals → overwrites\n");

    let caches: Vec<(String, LruCache<&'static str, i32>)> = capacities
        .iter()
        .map(|&cap| (cache_label(cap), run_workload(cap)))
        .collect();

    display_metrics_comparison(&caches);
    demonstrate_deterministic_ordering(&caches[0].1);
}

fn run_workload(capacity: usize) -> LruCache<&'static str, i32> {
    let config = LruCacheConfig::try_new(capacity).expect("capacity is non-zero");
    let mut cache: LruCache<&'static str, i32> = LruCache::init(config, None);

    let fruits = [
        "apple", "banana", "cherry", "date", "elder", "fig", "grape", "honeydew",
    ];
    for (i, &fruit) in fruits.iter().enumerate() {
        cache.put(fruit, i as i32);
    }

    // Hot set read repeatedly, cold keys read once
    for _ in 0..3 {
        cache.get(&"grape");
        cache.get(&"honeydew");
    }
    for fruit in &fruits[..4] {
        if let Err(err) = cache.try_get(fruit) {
            println!("   {}: {}", cache_label(capacity), err);
        }
    }

    cache.remove(&"fig");
    cache.remove(&"kiwi");
    cache.put("grape", 100);
    cache.put("lemon", 9);

    cache
}

fn cache_label(capacity: usize) -> String {
    format!("LRU({})", capacity)
}

fn display_metrics_comparison(caches: &[(String, LruCache<&'static str, i32>)]) {
    println!("\n📈 Metrics Comparison");
    println!("=====================\n");

    let reports: Vec<(&str, BTreeMap<String, f64>)> = caches
        .iter()
        .map(|(name, cache)| (name.as_str(), cache.metrics()))
        .collect();

    let metric_names: Vec<&String> = match reports.first() {
        Some((_, report)) => report.keys().collect(),
        None => return,
    };

    print!("{:<26}", "metric");
    for (name, _) in &reports {
        print!("{:>12}", name);
    }
    println!();
    println!("{}", "-".repeat(26 + 12 * reports.len()));

    for metric in metric_names {
        print!("{:<26}", metric);
        for (_, report) in &reports {
            match report.get(metric) {
                Some(value) if value.fract() == 0.0 => print!("{:>12}", value),
                Some(value) => print!("{:>12.3}", value),
                None => print!("{:>12}", "-"),
            }
        }
        println!();
    }
}

fn demonstrate_deterministic_ordering(cache: &LruCache<&'static str, i32>) {
    println!("\n🔁 Deterministic Ordering");
    println!("=========================\n");
    println!(
        "Metrics come back in a BTreeMap, so {} reports print the same way every run:",
        cache.algorithm_name()
    );
    for (name, value) in cache.metrics().iter().take(5) {
        println!("   {} = {}", name, value);
    }

    println!("\nResident entries, most to least recently used:");
    for (key, value) in cache {
        println!("   {} → {}", key, value);
    }
}
