use std::{fmt, iter, mem};

use log::{debug, trace, warn};

use crate::{
    HashTable, TableError,
    entry::Entry,
    hash::{HashFn, KeyHash, hash_function_1},
    prime::{next_prime, prime_capacity},
};

/// Bucket count requested by `Default`
const DEFAULT_CAPACITY: usize = 11;
/// The table grows before an insert once `len / capacity` reaches this value
const MAX_LOAD_FACTOR: f64 = 0.5;

/// A single bucket of the open-addressing table
#[derive(Debug, Clone)]
enum Slot<V> {
    /// Never used since the last rehash or clear; ends every probe sequence
    Empty,
    /// Held an entry that was removed; probing continues past it
    Tombstone(Entry<V>),
    /// Holds a live entry
    Live(Entry<V>),
}

impl<V> Slot<V> {
    /// The entry in this slot, if it is live
    const fn live(&self) -> Option<&Entry<V>> {
        match self {
            Self::Live(entry) => Some(entry),
            Self::Empty | Self::Tombstone(_) => None,
        }
    }

    /// Turns a live slot into a tombstone, keeping the entry in place
    fn bury(&mut self) {
        *self = match mem::replace(self, Self::Empty) {
            Self::Live(entry) => Self::Tombstone(entry),
            other => other,
        };
    }
}

/// Quadratic probe sequence `(home + j²) mod capacity` for `j` in `0..capacity`
#[derive(Debug, Clone)]
struct Probe {
    /// Slot to yield next
    index: usize,
    /// Distance to the following slot, `2j + 1` reduced modulo the capacity
    step: usize,
    /// Probes left before the sequence gives up
    remaining: usize,
    /// Bucket count of the probed table
    capacity: usize,
}

impl Probe {
    /// Starts a probe sequence at `home`
    const fn new(home: usize, capacity: usize) -> Self {
        Self { index: home, step: 1, remaining: capacity, capacity }
    }
}

impl Iterator for Probe {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let current = self.index;
        // (j + 1)² - j² = 2j + 1, so each step grows by two
        self.index = (self.index + self.step) % self.capacity;
        self.step = (self.step + 2) % self.capacity;
        Some(current)
    }
}

/// Builds `capacity` empty slots
fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

/// A hash table resolving collisions with quadratic probing.
///
/// All entries live directly in a prime-sized slot array. Removal leaves a tombstone
/// so that lookups keep probing past it; tombstones are dropped on the next rehash
/// or [`clear`](Self::clear). The table doubles its capacity (rounded up to a prime)
/// before any insert that finds it at least half full, which guarantees quadratic
/// probing always reaches a free slot.
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct OpenAddressingTable<V, H = HashFn> {
    /// The slot array; its length is the capacity
    slots: Vec<Slot<V>>,
    /// Number of live entries (tombstones excluded)
    size: usize,
    /// Maps keys to home slots before the modulo
    hasher: H,
}

impl<V> Default for OpenAddressingTable<V> {
    fn default() -> Self {
        let hasher: HashFn = hash_function_1;
        Self::new(DEFAULT_CAPACITY, hasher)
    }
}

impl<V, H> OpenAddressingTable<V, H>
where
    H: KeyHash,
{
    /// Creates a table with `next_prime(initial_capacity)` empty slots
    pub fn new(initial_capacity: usize, hasher: H) -> Self {
        Self { slots: empty_slots(next_prime(initial_capacity)), size: 0, hasher }
    }

    /// Home slot of `key` in an array of `capacity` slots
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn home(&self, key: &str, capacity: usize) -> usize {
        // the remainder is below the capacity, which is a usize
        (self.hasher.hash(key) % capacity as u64) as usize
    }

    /// Probe sequence for `key` over the current slot array
    fn probe(&self, key: &str) -> Probe {
        Probe::new(self.home(key, self.capacity()), self.capacity())
    }

    /// Index of the live slot holding `key`
    fn find(&self, key: &str) -> Option<usize> {
        for index in self.probe(key) {
            match self.slots.get(index)? {
                Slot::Empty => return None,
                Slot::Live(entry) if entry.key == key => return Some(index),
                Slot::Live(_) | Slot::Tombstone(_) => {}
            }
        }
        None
    }

    /// Inserts `key` or overwrites its value, returning the previous value.
    ///
    /// Grows the table first if it is at least half full. The new entry takes the
    /// first tombstone on its probe path, but only after the path has been followed
    /// to an empty slot without meeting a live copy of the key.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ProbeExhausted`] if the whole probe sequence is full of
    /// other live keys.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>, TableError> {
        if self.table_load() >= MAX_LOAD_FACTOR {
            self.rehash(prime_capacity(self.capacity().saturating_mul(2)))?;
        }

        let key = key.into();
        let mut vacancy = None;
        for index in self.probe(&key) {
            match self.slots.get_mut(index) {
                Some(Slot::Live(entry)) if entry.key == key => {
                    return Ok(Some(mem::replace(&mut entry.value, value)));
                }
                Some(Slot::Empty) => {
                    vacancy = vacancy.or(Some(index));
                    break;
                }
                Some(Slot::Tombstone(_)) => {
                    if vacancy.is_none() {
                        vacancy = Some(index);
                    }
                }
                Some(Slot::Live(_)) | None => {}
            }
        }

        let Some(slot) = vacancy.and_then(|index| self.slots.get_mut(index)) else {
            warn!("no free slot for {key:?} in {} slots", self.slots.len());
            return Err(TableError::ProbeExhausted { capacity: self.capacity(), size: self.size });
        };
        *slot = Slot::Live(Entry::new(key, value));
        self.size = self.size.saturating_add(1);
        Ok(None)
    }

    /// Retrieves the value for `key`
    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key)
            .and_then(|index| self.slots.get(index))
            .and_then(Slot::live)
            .map(|entry| &entry.value)
    }

    /// Returns true if `key` has a live entry
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Tombstones the slot holding `key`, returning whether one was found
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(slot) = self.find(key).and_then(|index| self.slots.get_mut(index)) else {
            return false;
        };
        slot.bury();
        self.size = self.size.saturating_sub(1);
        trace!("tombstoned {key:?}");
        true
    }

    /// Rehashes every live entry into `new_capacity` slots, or the next prime above it.
    ///
    /// Tombstones are discarded. If the new capacity would leave the table half full
    /// or more, reinsertion keeps growing it as `put` would.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CapacityTooSmall`] if `new_capacity` is zero or smaller
    /// than [`len`](Self::len), leaving the table untouched.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), TableError> {
        if new_capacity < self.size || new_capacity == 0 {
            warn!("refusing to resize {} live entries into {new_capacity} slots", self.size);
            return Err(TableError::CapacityTooSmall { requested: new_capacity, size: self.size });
        }
        self.rehash(prime_capacity(new_capacity))
    }

    /// Capacity reached by reinserting every live entry into `capacity` slots, growing
    /// before each insert that finds the slots at least half full as `put` does
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn grown_capacity(&self, mut capacity: usize) -> usize {
        for placed in 0..self.size {
            if placed as f64 / capacity as f64 >= MAX_LOAD_FACTOR {
                capacity = prime_capacity(capacity.saturating_mul(2));
            }
        }
        capacity
    }

    /// Moves the live entries into a fresh array of `capacity` slots (grown further
    /// if needed), dropping tombstones.
    ///
    /// Every destination slot is chosen before any entry moves, so on error the
    /// table is unchanged.
    fn rehash(&mut self, capacity: usize) -> Result<(), TableError> {
        let capacity = self.grown_capacity(capacity);
        let mut taken = vec![false; capacity];
        let mut targets = Vec::with_capacity(self.size);
        for entry in self.slots.iter().filter_map(Slot::live) {
            let free = Probe::new(self.home(&entry.key, capacity), capacity)
                .find(|&index| taken.get(index) == Some(&false));
            let Some(flag) = free.and_then(|index| taken.get_mut(index)) else {
                warn!("no free slot for {:?} while rehashing into {capacity} slots", entry.key);
                return Err(TableError::ProbeExhausted { capacity, size: self.size });
            };
            *flag = true;
            targets.extend(free);
        }

        debug!(
            "rehashing {} live entries from {} to {capacity} slots",
            self.size,
            self.slots.len()
        );
        let old_slots = mem::replace(&mut self.slots, empty_slots(capacity));
        let live = old_slots.into_iter().filter_map(|slot| match slot {
            Slot::Live(entry) => Some(entry),
            Slot::Empty | Slot::Tombstone(_) => None,
        });
        for (entry, index) in live.zip(targets) {
            if let Some(slot) = self.slots.get_mut(index) {
                *slot = Slot::Live(entry);
            }
        }
        Ok(())
    }
}

impl<V, H> OpenAddressingTable<V, H> {
    /// Returns the number of live entries
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns true if there are no live entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `len / capacity`
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Counts the slots that are empty or tombstoned
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.slots.iter().filter(|slot| slot.live().is_none()).count()
    }

    /// Replaces every slot with an empty one, keeping the capacity
    pub fn clear(&mut self) {
        self.slots = empty_slots(self.capacity());
        self.size = 0;
    }

    /// Returns an iterator over the live `(key, value)` pairs in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: &self.slots, index: 0 }
    }

    /// Copies out every live `(key, value)` pair in slot order
    #[must_use]
    pub fn keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }
}

impl<V, H> HashTable<V> for OpenAddressingTable<V, H>
where
    H: KeyHash,
{
    fn put(&mut self, key: String, value: V) -> Result<Option<V>, TableError> {
        Self::put(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        Self::get(self, key)
    }

    fn remove(&mut self, key: &str) -> bool {
        Self::remove(self, key)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn resize(&mut self, new_capacity: usize) -> Result<(), TableError> {
        Self::resize(self, new_capacity)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn capacity(&self) -> usize {
        Self::capacity(self)
    }

    fn table_load(&self) -> f64 {
        Self::table_load(self)
    }

    fn empty_buckets(&self) -> usize {
        Self::empty_buckets(self)
    }

    fn keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        Self::keys_and_values(self)
    }
}

impl<V: fmt::Debug, H> fmt::Debug for OpenAddressingTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAddressingTable")
            .field("slots", &self.slots)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// One line per slot: `index: key: value`, with `-` for empty slots
impl<V: fmt::Display, H> fmt::Display for OpenAddressingTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{index}: -")?,
                Slot::Tombstone(entry) => writeln!(f, "{index}: {entry} (tombstone)")?,
                Slot::Live(entry) => writeln!(f, "{index}: {entry}")?,
            }
        }
        Ok(())
    }
}

/// Iterator over the live entries of an [`OpenAddressingTable`], in slot order
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// The slot array being walked
    slots: &'a [Slot<V>],
    /// Next slot to inspect
    index: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Live(entry) = slot {
                return Some(entry.as_pair());
            }
        }
        None
    }
}

impl<'a, V, H> IntoIterator for &'a OpenAddressingTable<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hash_function_2, is_prime};

    /// Sends every key to slot 0 so that probing is deterministic
    fn collide(_: &str) -> u64 {
        0
    }

    #[test]
    fn test_put_and_get() {
        let mut table = OpenAddressingTable::new(11, hash_function_1);
        assert_eq!(table.put("a", 1).unwrap(), None);
        assert_eq!(table.put("b", 2).unwrap(), None);
        assert_eq!(table.put("a", 3).unwrap(), Some(1));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("a"), Some(&3));
        assert_eq!(table.get("b"), Some(&2));
        assert!(!table.contains_key("c"));
        assert_eq!(table.capacity(), 11);
    }

    #[test]
    fn test_probe_sequence_is_quadratic() {
        let indices: Vec<usize> = Probe::new(3, 7).collect();
        let expected: Vec<usize> = (0..7_usize).map(|j| (3 + j * j) % 7).collect();
        assert_eq!(indices, expected);
    }

    #[test]
    fn test_colliding_keys_follow_the_probe_sequence() {
        let mut table = OpenAddressingTable::new(7, collide);
        for key in ["a", "b", "c", "d"] {
            table.put(key, key.len()).unwrap();
        }

        // slots 0, 1, 4 and then 9 % 7 = 2
        let keys: Vec<&str> = table.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a", "b", "d", "c"]);
        assert_eq!(table.empty_buckets(), 3);
    }

    #[test]
    fn test_grows_at_half_load() {
        let mut table = OpenAddressingTable::new(7, collide);
        for key in ["a", "b", "c", "d"] {
            table.put(key, 0).unwrap();
        }
        assert_eq!(table.capacity(), 7);

        // 4 / 7 >= 0.5, so this put doubles to the next prime above 14
        table.put("e", 0).unwrap();
        assert_eq!(table.capacity(), 17);
        assert_eq!(table.len(), 5);
        for key in ["a", "b", "c", "d", "e"] {
            assert!(table.contains_key(key));
        }
    }

    #[test]
    fn test_remove_leaves_tombstone() {
        let mut table = OpenAddressingTable::new(7, collide);
        table.put("a", 1).unwrap();
        table.put("b", 2).unwrap();

        assert!(table.remove("a"));
        assert!(!table.remove("a"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a"), None);
        // "b" sits behind the tombstone and must still be found
        assert_eq!(table.get("b"), Some(&2));
        assert_eq!(table.empty_buckets(), 6);
        assert!(table.to_string().contains("a: 1 (tombstone)"));
    }

    #[test]
    fn test_update_behind_tombstone_does_not_duplicate() {
        let mut table = OpenAddressingTable::new(7, collide);
        table.put("a", 1).unwrap();
        table.put("b", 2).unwrap();
        assert!(table.remove("a"));

        assert_eq!(table.put("b", 20).unwrap(), Some(2));
        assert_eq!(table.len(), 1);
        assert_eq!(table.keys_and_values(), vec![("b".to_string(), 20)]);
    }

    #[test]
    fn test_reinsert_reuses_tombstone() {
        let mut table = OpenAddressingTable::new(7, collide);
        table.put("a", 1).unwrap();
        table.put("b", 2).unwrap();
        assert!(table.remove("a"));

        table.put("a", 3).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.keys_and_values().len(), table.len());
        assert_eq!(table.get("a"), Some(&3));
        assert!(table.to_string().starts_with("0: a: 3\n"));
    }

    #[test]
    fn test_put_fails_when_every_slot_is_taken() {
        let mut table = OpenAddressingTable::new(3, hash_function_1);
        // every slot holds some other key while `len` stays below the growth threshold
        table.slots = ["a", "b", "c"]
            .into_iter()
            .map(|key| Slot::Live(Entry::new(key.to_string(), 0)))
            .collect();
        table.size = 1;
        let before = table.keys_and_values();

        assert_eq!(
            table.put("w", 9),
            Err(TableError::ProbeExhausted { capacity: 3, size: 1 })
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.capacity(), 3);
        assert_eq!(table.keys_and_values(), before);
        assert!(!table.contains_key("w"));
    }

    #[test]
    fn test_failed_rehash_leaves_table_unchanged() {
        let mut table = OpenAddressingTable::new(11, collide);
        for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
            table.put(key, i).unwrap();
        }
        let before = table.keys_and_values();

        // j² mod 8 only reaches three distinct slots, one short for four colliding keys
        assert_eq!(table.rehash(8), Err(TableError::ProbeExhausted { capacity: 8, size: 4 }));
        assert_eq!(table.capacity(), 11);
        assert_eq!(table.len(), 4);
        assert_eq!(table.keys_and_values(), before);
        for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
            assert_eq!(table.get(key), Some(&i));
        }
    }

    #[test]
    fn test_resize_drops_tombstones() {
        let mut table = OpenAddressingTable::new(11, hash_function_1);
        table.put("key1", 10).unwrap();
        table.put("key2", 20).unwrap();
        assert!(table.remove("key1"));

        table.resize(30).unwrap();
        assert_eq!(table.capacity(), 31);
        assert_eq!(table.len(), 1);
        assert_eq!(table.empty_buckets(), 30);
        assert_eq!(table.get("key2"), Some(&20));
        assert!(!table.to_string().contains("tombstone"));
    }

    #[test]
    fn test_resize_keeps_load_bound() {
        let mut table = OpenAddressingTable::new(53, hash_function_2);
        for i in 0..20 {
            table.put(format!("str{i}"), i).unwrap();
        }

        // 23 slots cannot hold 20 entries at half load, so reinsertion grows further
        table.resize(23).unwrap();
        assert!(table.table_load() <= 0.5);
        assert!(is_prime(table.capacity()));
        for i in 0..20 {
            assert_eq!(table.get(&format!("str{i}")), Some(&i));
        }
    }

    #[test]
    fn test_resize_rejects_shrinking_below_len() {
        let mut table = OpenAddressingTable::new(11, hash_function_1);
        for key in ["a", "b", "c"] {
            table.put(key, 0).unwrap();
        }

        assert_eq!(
            table.resize(2),
            Err(TableError::CapacityTooSmall { requested: 2, size: 3 })
        );
        assert_eq!(table.capacity(), 11);
        assert_eq!(table.len(), 3);

        let mut empty: OpenAddressingTable<u8> = OpenAddressingTable::default();
        assert!(empty.resize(0).is_err());
        empty.resize(2).unwrap();
        assert_eq!(empty.capacity(), 2);
    }

    #[test]
    fn test_clear() {
        let mut table = OpenAddressingTable::new(53, hash_function_1);
        table.put("key1", 10).unwrap();
        table.put("key2", 20).unwrap();
        table.resize(100).unwrap();

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 101);
        assert_eq!(table.empty_buckets(), 101);
        assert_eq!(table.get("key1"), None);
    }

    #[test]
    fn test_table_load() {
        let mut table = OpenAddressingTable::new(101, hash_function_1);
        assert!(table.table_load().abs() < f64::EPSILON);
        table.put("key1", 10).unwrap();
        table.put("key2", 20).unwrap();
        table.put("key1", 30).unwrap();
        assert!((table.table_load() - 2.0 / 101.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_iter_skips_empty_and_tombstones() {
        let mut table = OpenAddressingTable::new(10, hash_function_2);
        for i in 0..5 {
            table.put(i.to_string(), i * 24).unwrap();
        }
        assert!(table.remove("0"));
        assert!(table.remove("4"));

        let mut seen: Vec<(&str, &i32)> = (&table).into_iter().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![("1", &24), ("2", &48), ("3", &72)]);
    }
}
