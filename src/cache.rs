use std::cell::Cell;
use std::marker::PhantomData;

use crate::types::Lit;

/// Perfect hash: distinct keys must map to distinct values.
pub trait MyHash {
    fn hash(&self) -> u64;
}

impl MyHash for Lit {
    fn hash(&self) -> u64 {
        self.code() as u64
    }
}

struct Entry<V> {
    key: u64,
    epoch: u32,
    value: V,
}

/// Direct-mapped result cache.
///
/// Colliding keys evict each other. [`invalidate`][Cache::invalidate] bumps an
/// epoch instead of touching the slots, so dropping every entry is `O(1)`.
pub struct Cache<K, V> {
    data: Vec<Option<Entry<V>>>,
    bitmask: u64,
    epoch: u32,
    hits: Cell<usize>,
    misses: Cell<usize>,
    _phantom: PhantomData<K>,
}

impl<K, V> Cache<K, V> {
    /// Create a new cache of size `2^bits`.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Bits should be in the range 0..=31");

        let size = 1 << bits;
        let bitmask = (size - 1) as u64;

        Self {
            data: std::iter::repeat_with(|| None).take(size).collect(),
            bitmask,
            epoch: 0,
            hits: Cell::new(0),
            misses: Cell::new(0),
            _phantom: PhantomData,
        }
    }

    /// Get the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }
    /// Get the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    /// Drop every entry.
    pub fn invalidate(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            // Wrapped around: stale entries could look fresh again.
            self.data.fill_with(|| None);
        }
    }

    fn index(&self, key: u64) -> usize {
        (key & self.bitmask) as usize
    }

    /// Get the cached result.
    pub fn get(&self, key: &K) -> Option<&V>
    where
        K: MyHash,
    {
        let key = key.hash();
        match &self.data[self.index(key)] {
            Some(entry) if entry.key == key && entry.epoch == self.epoch => {
                self.hits.set(self.hits.get() + 1);
                Some(&entry.value)
            }
            _ => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    /// Insert a result into the cache.
    pub fn insert(&mut self, key: &K, value: V)
    where
        K: MyHash,
    {
        let key = key.hash();
        let index = self.index(key);
        self.data[index] = Some(Entry {
            key,
            epoch: self.epoch,
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl MyHash for u64 {
        fn hash(&self) -> u64 {
            *self
        }
    }

    #[test]
    fn test_cache() {
        let mut cache = Cache::<u64, bool>::new(3);

        cache.insert(&1, true);
        cache.insert(&2, false);
        cache.insert(&9, true); // evicts 1

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(&false));
        assert_eq!(cache.get(&9), Some(&true));
        assert_eq!(cache.get(&3), None);
        assert_eq!(cache.hits(), 2);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn test_invalidate() {
        let mut cache = Cache::<Lit, bool>::new(4);
        let lit = Lit::from_dimacs(-3);
        cache.insert(&lit, true);
        assert_eq!(cache.get(&lit), Some(&true));
        cache.invalidate();
        assert_eq!(cache.get(&lit), None);
        cache.insert(&lit, false);
        assert_eq!(cache.get(&lit), Some(&false));
    }
}
