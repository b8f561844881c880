#![forbid(unsafe_code)]

//! LRU memo for [`wrap`](crate::wrap::wrap_with_mode) results.
//!
//! Keyed by an FxHash of the line plus the width and mode. The line text is
//! stored alongside the segments and compared on lookup, so a hash collision
//! costs a recompute, never a wrong answer.

use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use lru::LruCache;
use rustc_hash::FxHasher;

use crate::wrap::{Segments, WrapMode, wrap_with_mode};

/// Default number of distinct lines remembered.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

type Key = (u64, usize, WrapMode);

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
}

/// Memoized line wrapping.
#[derive(Debug)]
pub struct WrapCache {
    cache: LruCache<Key, (Box<str>, Segments)>,
    hits: u64,
    misses: u64,
}

impl Default for WrapCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl WrapCache {
    /// A cache holding up to `capacity` lines (at least 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    fn key(line: &str, width: usize, mode: WrapMode) -> Key {
        let mut hasher = FxHasher::default();
        line.hash(&mut hasher);
        (hasher.finish(), width.max(1), mode)
    }

    /// Same result as [`wrap_with_mode`], served from the cache when possible.
    pub fn wrap(&mut self, line: &str, width: usize, mode: WrapMode) -> Segments {
        let key = Self::key(line, width, mode);
        if let Some((cached, segments)) = self.cache.get(&key)
            && cached.as_ref() == line
        {
            self.hits += 1;
            return segments.clone();
        }
        self.misses += 1;
        let segments = wrap_with_mode(line, width, mode);
        self.cache.put(key, (line.into(), segments.clone()));
        segments
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            len: self.cache.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrap::wrap;

    #[test]
    fn hit_returns_same_segments() {
        let mut cache = WrapCache::new(8);
        let first = cache.wrap("hello world", 5, WrapMode::Word);
        let second = cache.wrap("hello world", 5, WrapMode::Word);
        assert_eq!(first, second);
        assert_eq!(first, wrap("hello world", 5));
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                len: 1
            }
        );
    }

    #[test]
    fn width_is_part_of_the_key() {
        let mut cache = WrapCache::new(8);
        let narrow = cache.wrap("hello world", 5, WrapMode::Word);
        let wide = cache.wrap("hello world", 20, WrapMode::Word);
        assert_ne!(narrow.len(), wide.len());
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut cache = WrapCache::new(1);
        cache.wrap("a", 5, WrapMode::Word);
        cache.wrap("b", 5, WrapMode::Word);
        cache.wrap("a", 5, WrapMode::Word);
        assert_eq!(cache.stats().hits, 0);
        assert_eq!(cache.stats().len, 1);
        cache.clear();
        assert_eq!(cache.stats().len, 0);
    }
}
