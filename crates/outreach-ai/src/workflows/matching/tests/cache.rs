use crate::workflows::matching::cache::TtlCache;
use std::time::Duration;

#[test]
fn returns_values_inside_the_ttl() {
    let cache: TtlCache<String, u32> = TtlCache::new(4, Duration::from_secs(60));
    cache.insert("org-1".to_string(), 7);
    assert_eq!(cache.get(&"org-1".to_string()), Some(7));
    assert_eq!(cache.get(&"org-2".to_string()), None);
}

#[test]
fn expires_entries_after_the_ttl() {
    let cache: TtlCache<String, u32> = TtlCache::new(4, Duration::from_millis(20));
    cache.insert("org-1".to_string(), 7);
    std::thread::sleep(Duration::from_millis(40));
    assert_eq!(cache.get(&"org-1".to_string()), None);
    assert!(cache.is_empty());
}

#[test]
fn evicts_oldest_entry_at_capacity() {
    let cache: TtlCache<&'static str, u32> = TtlCache::new(2, Duration::from_secs(60));
    cache.insert("first", 1);
    std::thread::sleep(Duration::from_millis(5));
    cache.insert("second", 2);
    std::thread::sleep(Duration::from_millis(5));
    cache.insert("third", 3);

    assert_eq!(cache.get(&"first"), None);
    assert_eq!(cache.get(&"second"), Some(2));
    assert_eq!(cache.get(&"third"), Some(3));
}

#[test]
fn get_or_insert_with_computes_once() {
    let cache: TtlCache<&'static str, u32> = TtlCache::new(4, Duration::from_secs(60));
    let first = cache.get_or_insert_with(&"key", || 41);
    let second = cache.get_or_insert_with(&"key", || panic!("should hit the cache"));
    assert_eq!(first, 41);
    assert_eq!(second, 41);
}
