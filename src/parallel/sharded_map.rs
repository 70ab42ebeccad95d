use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use parking_lot::{Mutex, MappedMutexGuard, MutexGuard};

use crate::core::types::DocumentId;

struct Shard<V> {
    map: Mutex<BTreeMap<DocumentId, V>>,
}

/// A fixed-count array of mutex-guarded maps, selected by `document_id %
/// shard_count`. Bounds contention during parallel scoring: two updates
/// only ever serialize against each other when their ids land on the same
/// shard.
pub struct ShardedMap<V> {
    shards: Vec<Shard<V>>,
}

/// A scoped handle granting mutable access to the (possibly freshly
/// default-constructed) entry for a key. The shard's lock is held for the
/// handle's lifetime and released on drop.
pub struct Access<'a, V> {
    guard: MappedMutexGuard<'a, V>,
}

impl<'a, V> Deref for Access<'a, V> {
    type Target = V;
    fn deref(&self) -> &V {
        &self.guard
    }
}

impl<'a, V> DerefMut for Access<'a, V> {
    fn deref_mut(&mut self) -> &mut V {
        &mut self.guard
    }
}

impl<V: Default> ShardedMap<V> {
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard_count must be positive");
        let shards = (0..shard_count)
            .map(|_| Shard {
                map: Mutex::new(BTreeMap::new()),
            })
            .collect();
        ShardedMap { shards }
    }

    fn shard_index(&self, key: DocumentId) -> usize {
        (key.value().rem_euclid(self.shards.len() as i64)) as usize
    }

    /// Locks the shard owning `key` and returns a handle to its entry,
    /// default-constructing the entry if it wasn't present.
    pub fn access(&self, key: DocumentId) -> Access<'_, V> {
        let shard = &self.shards[self.shard_index(key)];
        let guard = shard.map.lock();
        let mapped = MutexGuard::map(guard, |m| m.entry(key).or_default());
        Access { guard: mapped }
    }

    pub fn erase(&self, key: DocumentId) {
        let shard = &self.shards[self.shard_index(key)];
        shard.map.lock().remove(&key);
    }

    /// Best-effort, lock-free-ish size: shards currently held by another
    /// thread are skipped rather than waited on. Spec.md only requires
    /// this to be accurate enough for reserve hints.
    pub fn size(&self) -> usize {
        self.shards
            .iter()
            .map(|s| s.map.try_lock().map(|m| m.len()).unwrap_or(0))
            .sum()
    }
}

impl<V: Clone> ShardedMap<V> {
    /// Locks every shard in order and merges their entries into a single
    /// canonical ordered map.
    pub fn build_ordinary(&self) -> BTreeMap<DocumentId, V> {
        let mut result = BTreeMap::new();
        for shard in &self.shards {
            let guard = shard.map.lock();
            result.extend(guard.iter().map(|(k, v)| (*k, v.clone())));
        }
        result
    }
}
