//! Basic usage of the LRU cache: inserting, promoting on read, eviction,
//! error-signaling lookup and iteration.

use lru_slab::{KeyNotFound, LruCache};
use std::num::NonZeroUsize;

fn main() -> Result<(), KeyNotFound> {
    let capacity = NonZeroUsize::new(3).unwrap();
    let mut cache: LruCache<u32, String> = LruCache::new(capacity);

    cache.put(1, "one".to_string());
    cache.put(2, "two".to_string());
    cache.put(3, "three".to_string());
    println!("cache holds {} of {} entries", cache.len(), cache.cap());

    // Reading 1 makes 2 the least recently used entry
    println!("get(1) = {}", cache.try_get(&1)?);

    if let Some((key, value)) = cache.put(4, "four".to_string()) {
        println!("inserting 4 evicted {} => {}", key, value);
    }

    match cache.try_get(&2) {
        Ok(value) => println!("get(2) = {}", value),
        Err(err) => println!("{}", err),
    }

    println!("most to least recently used:");
    for (key, value) in &cache {
        println!("  {} => {}", key, value);
    }

    cache.remove(&4);
    cache.clear();
    println!("after clear: len = {}, empty = {}", cache.len(), cache.is_empty());

    Ok(())
}
