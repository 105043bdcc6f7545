//! Memoizing verdict cache with least-recently-used eviction.

use parking_lot::Mutex;
use std::collections::HashMap;

/// Thread-safe word -> verdict cache.
///
/// Keys are case-sensitive, exactly as scanned. Each entry carries the tick of
/// its last use. When the cache is full, the least recently used eighth of the
/// entries is evicted in one go, so eviction cost is spread over many inserts.
///
/// Every invalidation (`clear`, `remove_case_insensitive`) bumps a generation
/// counter. A lookup that reads the generation before computing a verdict can
/// store it with `insert_if_current`, which drops the verdict if an
/// invalidation happened in between.
pub struct ResultCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
}

struct CacheInner {
    entries: HashMap<String, (bool, u64)>,
    tick: u64,
    generation: u64,
}

impl ResultCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                tick: 0,
                generation: 0,
            }),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, word: &str) -> Option<bool> {
        let mut inner = self.inner.lock();
        inner.tick += 1;
        let tick = inner.tick;
        inner.entries.get_mut(word).map(|(verdict, used)| {
            *used = tick;
            *verdict
        })
    }

    pub fn insert(&self, word: &str, verdict: bool) {
        self.inner.lock().store(word, verdict, self.capacity);
    }

    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    /// Insert only if nothing was invalidated since `generation` was read.
    /// Returns whether the verdict was stored.
    pub fn insert_if_current(&self, word: &str, verdict: bool, generation: u64) -> bool {
        let mut inner = self.inner.lock();
        if inner.generation != generation {
            return false;
        }
        inner.store(word, verdict, self.capacity);
        true
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.generation += 1;
    }

    /// Drop every entry that equals `word` ignoring case
    pub fn remove_case_insensitive(&self, word: &str) {
        let folded = word.to_lowercase();
        let mut inner = self.inner.lock();
        inner.entries.retain(|key, _| key.to_lowercase() != folded);
        inner.generation += 1;
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheInner {
    fn store(&mut self, word: &str, verdict: bool, capacity: usize) {
        self.tick += 1;
        let tick = self.tick;

        if !self.entries.contains_key(word) && self.entries.len() >= capacity {
            self.evict(capacity);
        }
        self.entries.insert(word.to_string(), (verdict, tick));
    }

    fn evict(&mut self, capacity: usize) {
        let count = (capacity / 8).max(1);
        let mut ticks: Vec<u64> = self.entries.values().map(|(_, used)| *used).collect();
        ticks.sort_unstable();
        // Everything at or below the cutoff tick goes
        let cutoff = ticks[count.min(ticks.len()) - 1];
        self.entries.retain(|_, (_, used)| *used > cutoff);
        tracing::debug!("Evicted cache entries, {} remain", self.entries.len());
    }
}
