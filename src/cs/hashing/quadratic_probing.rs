//! # Quadratic Probing Hash Map
//!
//! This module provides a **string-keyed HashMap** using *open addressing* with *quadratic probing*
//! over a single contiguous, prime-sized slot array.
//!
//! ## Key Features
//! - **Open Addressing**: Every entry lives directly in the slot array; collisions are resolved by
//!   probing `(home + j^2) mod capacity` for `j = 0, 1, 2, ...`.
//! - **Prime Capacity**: The capacity is always prime, both at construction and after every resize.
//! - **Tombstones**: Removal marks the slot as a tombstone, so later probes keep walking past it. A
//!   tombstone is revived when its own key is put again, and tombstones are dropped for good on resize.
//! - **Automatic Growth**: Before every insertion, if the load factor is `>= 0.5`, the table doubles
//!   (rounded up to the next prime) and all live entries are re-inserted.
//! - **Bounded Probing**: Every probe walk stops after `capacity` steps. Since `(j + p)^2 = j^2 (mod p)`,
//!   that covers every slot the key could ever occupy.
//! - **Injected Hashing**: Any [`KeyHasher`] (for instance [`hash_function_1`], [`hash_function_2`](super::string_hash::hash_function_2) or a
//!   closure) decides the home slot.
//!
//! **Note**: This map is not thread-safe. A resize runs inline inside `put`, so a single insertion may
//! take O(capacity) time.
//!
//! ## Example
//! ```rust
//! use quadmap::cs::hashing::quadratic_probing::ProbingHashMap;
//! use quadmap::cs::hashing::string_hash::hash_function_2;
//!
//! let mut map = ProbingHashMap::new(10, hash_function_2);
//! assert_eq!(map.capacity(), 11);
//!
//! map.put("apple", 3);
//! map.put("pear", 5);
//! assert_eq!(map.get("apple"), Some(&3));
//!
//! map.remove("apple");
//! assert!(!map.contains_key("apple"));
//! assert_eq!(map.size(), 1);
//! ```

use std::fmt;

use log::{debug, trace, warn};

use super::primes::{is_prime, next_prime};
use super::string_hash::{hash_function_1, HashFn, KeyHasher};
use crate::error::{Error, Result};

/// Default requested capacity when none is given.
pub const DEFAULT_INITIAL_CAPACITY: usize = 11;
/// Load factor at which the next insertion grows the table first.
pub const MAX_LOAD_FACTOR: f64 = 0.5;

/// A key/value record held by exactly one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry<V> {
    key: String,
    value: V,
}

/// A slot is `Empty`, `Live`, or a `Tombstone` still holding the entry that was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot<V> {
    Empty,
    Live(Entry<V>),
    Tombstone(Entry<V>),
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<V> Slot<V> {
    fn is_live(&self) -> bool {
        matches!(self, Slot::Live(_))
    }

    /// True for the slot that terminates a probe for `key`: an empty slot, or one holding `key`.
    fn ends_probe_for(&self, key: &str) -> bool {
        match self {
            Slot::Empty => true,
            Slot::Live(entry) | Slot::Tombstone(entry) => entry.key == key,
        }
    }

    /// Turns a live slot into a tombstone. Returns false if the slot was not live.
    fn bury(&mut self) -> bool {
        match std::mem::take(self) {
            Slot::Live(entry) => {
                *self = Slot::Tombstone(entry);
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }
}

impl<V: fmt::Display> fmt::Display for Slot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Empty => write!(f, "None"),
            Slot::Live(entry) => write!(f, "K: {} V: {} TS: False", entry.key, entry.value),
            Slot::Tombstone(entry) => write!(f, "K: {} V: {} TS: True", entry.key, entry.value),
        }
    }
}

/// Walks the quadratic probe sequence from `hash mod capacity` until `stop` accepts an index.
/// Returns `None` once `capacity` indices have been visited.
fn probe_by<F>(capacity: usize, hash: u64, mut stop: F) -> Option<usize>
where
    F: FnMut(usize) -> bool,
{
    let mut idx = (hash % capacity as u64) as usize;
    for j in 0..capacity {
        if stop(idx) {
            return Some(idx);
        }
        // (j + 1)^2 - j^2 = 2j + 1
        idx = (idx + 2 * j + 1) % capacity;
    }
    None
}

/// A builder for the `ProbingHashMap`, in case you want to set capacity and hasher separately.
#[derive(Debug, Clone)]
pub struct ProbingHashMapBuilder<H> {
    capacity: usize,
    hasher: H,
}

impl Default for ProbingHashMapBuilder<HashFn> {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_INITIAL_CAPACITY,
            hasher: hash_function_1,
        }
    }
}

impl ProbingHashMapBuilder<HashFn> {
    /// Create a new builder with the default capacity and `hash_function_1`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: KeyHasher> ProbingHashMapBuilder<H> {
    /// Sets the requested capacity (rounded up to a prime on `build`).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Replaces the hash function.
    pub fn with_hasher<H2: KeyHasher>(self, hasher: H2) -> ProbingHashMapBuilder<H2> {
        ProbingHashMapBuilder {
            capacity: self.capacity,
            hasher,
        }
    }

    /// Finalize building the map.
    pub fn build<V>(self) -> ProbingHashMap<V, H> {
        ProbingHashMap::new(self.capacity, self.hasher)
    }
}

/// Open addressing hash map from `String` keys to `V`, probed quadratically over a prime-sized table.
#[derive(Debug, Clone)]
pub struct ProbingHashMap<V, H = HashFn> {
    slots: Vec<Slot<V>>,
    /// Always prime, always `slots.len()`.
    capacity: usize,
    /// Number of live entries; tombstones are not counted.
    size: usize,
    hasher: H,
}

impl<V> Default for ProbingHashMap<V, HashFn> {
    fn default() -> Self {
        ProbingHashMapBuilder::new().build()
    }
}

impl<V, H: KeyHasher> ProbingHashMap<V, H> {
    /// Creates an empty map whose capacity is the next prime at or above `capacity`.
    pub fn new(capacity: usize, hasher: H) -> Self {
        let capacity = next_prime(capacity);
        ProbingHashMap {
            slots: Self::empty_slots(capacity),
            capacity,
            size: 0,
            hasher,
        }
    }

    /// Number of live entries.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of slots in the table.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Inserts `value` under `key`, or replaces the value of an existing key.
    ///
    /// # Panics
    /// Panics if no slot can be found for the key even after tombstones were purged, which the
    /// load factor policy rules out for any deterministic hasher. See [`try_put`](Self::try_put).
    pub fn put(&mut self, key: &str, value: V) {
        if let Err(err) = self.try_put(key, value) {
            panic!("{}", err);
        }
    }

    /// Fallible form of [`put`](Self::put).
    ///
    /// The load check runs first, even when `key` is already present, so updating a key in a table
    /// at the threshold still grows it. If the key's probe sequence has no empty slot left (all taken
    /// by other keys' tombstones), the table is rebuilt at its current capacity and the probe retried.
    pub fn try_put(&mut self, key: &str, value: V) -> Result<()> {
        if self.table_load() >= MAX_LOAD_FACTOR {
            self.resize_table(self.capacity.saturating_mul(2))?;
        }

        let idx = match self.probe(key) {
            Some(idx) => idx,
            None => {
                trace!(
                    "probe for {:?} exhausted {} slots, purging tombstones",
                    key,
                    self.capacity
                );
                self.rebuild(self.capacity)?;
                match self.probe(key) {
                    Some(idx) => idx,
                    None => {
                        warn!(
                            "no slot for {:?} in a table of {} slots holding {} entries",
                            key, self.capacity, self.size
                        );
                        return Err(Error::ProbeExhausted {
                            key: key.to_owned(),
                            capacity: self.capacity,
                        });
                    }
                }
            }
        };

        let slot = match std::mem::take(&mut self.slots[idx]) {
            Slot::Empty => {
                self.size += 1;
                Slot::Live(Entry {
                    key: key.to_owned(),
                    value,
                })
            }
            Slot::Tombstone(entry) => {
                self.size += 1;
                Slot::Live(Entry { value, ..entry })
            }
            Slot::Live(entry) => Slot::Live(Entry { value, ..entry }),
        };
        self.slots[idx] = slot;
        Ok(())
    }

    /// Returns the value stored under `key`, or `None` if the key is absent or was removed.
    pub fn get(&self, key: &str) -> Option<&V> {
        match &self.slots[self.find_live(key)?] {
            Slot::Live(entry) => Some(&entry.value),
            _ => None,
        }
    }

    /// Returns true only if `key` maps to a live entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.find_live(key).is_some()
    }

    /// Tombstones the entry for `key`. Returns false (and changes nothing) if the key was not live.
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(idx) = self.find_live(key) else {
            return false;
        };
        let buried = self.slots[idx].bury();
        if buried {
            self.size -= 1;
        }
        buried
    }

    /// Rebuilds the table with `new_capacity` slots (rounded up to a prime), carrying over live
    /// entries only. Tombstones are dropped.
    ///
    /// A target smaller than `size()` is ignored. If some live entry cannot be placed in the new
    /// table, the map is left untouched and `Error::ProbeExhausted` is returned.
    pub fn resize_table(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity < self.size {
            debug!(
                "ignoring resize to {} slots below {} live entries",
                new_capacity, self.size
            );
            return Ok(());
        }
        let new_capacity = if is_prime(new_capacity) {
            new_capacity
        } else {
            next_prime(new_capacity)
        };
        let old_capacity = self.capacity;
        self.rebuild(new_capacity)?;
        debug!(
            "resized table from {} to {} slots, {} live entries carried",
            old_capacity, new_capacity, self.size
        );
        Ok(())
    }

    /// Ratio of live entries to capacity.
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity as f64
    }

    /// `capacity() - size()`: tombstoned slots count as empty.
    pub fn empty_buckets(&self) -> usize {
        self.capacity - self.size
    }

    /// Empties every slot, keeping the capacity.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.size = 0;
    }

    /// Iterates live `(key, value)` pairs in slot order.
    ///
    /// The order follows the physical layout and changes across resizes.
    pub fn entries(&self) -> Entries<'_, V> {
        Entries {
            slots: self.slots.iter(),
        }
    }

    /// Index of the slot holding `key`, or of the first empty slot on its probe sequence.
    fn probe(&self, key: &str) -> Option<usize> {
        let slots = &self.slots;
        probe_by(self.capacity, self.hasher.hash_key(key), |idx| {
            slots[idx].ends_probe_for(key)
        })
    }

    /// Index of the live slot holding `key`.
    fn find_live(&self, key: &str) -> Option<usize> {
        if self.size == 0 {
            return None;
        }
        // An exhausted probe has visited every slot the key can occupy, so it is absent.
        let idx = self.probe(key)?;
        self.slots[idx].is_live().then_some(idx)
    }

    /// Re-inserts every live entry into a fresh table of `capacity` slots. The new layout is
    /// computed in full before any entry moves, so a failed placement leaves `self` as it was.
    fn rebuild(&mut self, capacity: usize) -> Result<()> {
        let mut layout: Vec<Option<usize>> = vec![None; capacity];
        for (from, slot) in self.slots.iter().enumerate() {
            let Slot::Live(entry) = slot else {
                continue;
            };
            let hash = self.hasher.hash_key(&entry.key);
            let to = probe_by(capacity, hash, |idx| layout[idx].is_none()).ok_or_else(|| {
                Error::ProbeExhausted {
                    key: entry.key.clone(),
                    capacity,
                }
            })?;
            layout[to] = Some(from);
        }

        let mut old_slots = std::mem::replace(&mut self.slots, Self::empty_slots(capacity));
        for (to, from) in layout.into_iter().enumerate() {
            if let Some(from) = from {
                self.slots[to] = std::mem::take(&mut old_slots[from]);
            }
        }
        self.capacity = capacity;
        Ok(())
    }

    fn empty_slots(capacity: usize) -> Vec<Slot<V>> {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Default::default);
        slots
    }
}

impl<V: Clone, H: KeyHasher> ProbingHashMap<V, H> {
    /// Collects every live `(key, value)` pair, in slot order.
    pub fn get_keys_and_values(&self) -> Vec<(String, V)> {
        self.entries()
            .map(|(key, value)| (key.to_owned(), value.clone()))
            .collect()
    }
}

impl<V: fmt::Display, H> fmt::Display for ProbingHashMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, slot) in self.slots.iter().enumerate() {
            writeln!(f, "{}: {}", idx, slot)?;
        }
        Ok(())
    }
}

/// Iterator over the live entries of a [`ProbingHashMap`], created by [`ProbingHashMap::entries`].
#[derive(Debug, Clone)]
pub struct Entries<'a, V> {
    slots: std::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Entries<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| match slot {
            Slot::Live(entry) => Some((entry.key.as_str(), &entry.value)),
            _ => None,
        })
    }
}

impl<'a, V, H: KeyHasher> IntoIterator for &'a ProbingHashMap<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Entries<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}
