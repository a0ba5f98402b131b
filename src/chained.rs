use std::{fmt, iter, mem};

use log::{debug, warn};

use crate::{
    HashTable, TableError,
    chain::{Chain, ChainIter},
    entry::Entry,
    hash::{HashFn, KeyHash, hash_function_1},
    prime::{next_prime, prime_capacity},
};

/// Bucket count requested by `Default`
const DEFAULT_CAPACITY: usize = 11;
/// The table grows before an insert once `len / capacity` reaches this value
const MAX_LOAD_FACTOR: f64 = 1.0;

/// Builds `capacity` empty chains
fn fresh_buckets<V>(capacity: usize) -> Vec<Chain<V>> {
    iter::repeat_with(Chain::new).take(capacity).collect()
}

/// A hash table resolving collisions with separate chaining.
///
/// Each of the prime number of buckets holds a linked list of the entries hashing to
/// it, in insertion order. Removal unlinks the node, so there are no tombstones. The
/// table doubles its capacity (rounded up to a prime) before any insert that finds
/// as many entries as buckets.
pub struct ChainedTable<V, H = HashFn> {
    /// One chain per bucket; the length is the capacity
    buckets: Vec<Chain<V>>,
    /// Number of entries across all chains
    size: usize,
    /// Maps keys to buckets before the modulo
    hasher: H,
}

impl<V> Default for ChainedTable<V> {
    fn default() -> Self {
        let hasher: HashFn = hash_function_1;
        Self::new(DEFAULT_CAPACITY, hasher)
    }
}

impl<V, H> ChainedTable<V, H>
where
    H: KeyHash,
{
    /// Creates a table with `next_prime(initial_capacity)` empty buckets
    pub fn new(initial_capacity: usize, hasher: H) -> Self {
        Self { buckets: fresh_buckets(next_prime(initial_capacity)), size: 0, hasher }
    }

    /// Bucket index of `key`
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn bucket_index(&self, key: &str) -> usize {
        (self.hasher.hash(key) % self.capacity() as u64) as usize
    }

    /// The chain `key` hashes to
    #[allow(clippy::indexing_slicing)]
    fn bucket(&self, key: &str) -> &Chain<V> {
        // `bucket_index` is reduced modulo `buckets.len()`, which is never zero
        &self.buckets[self.bucket_index(key)]
    }

    /// The chain `key` hashes to, mutably
    #[allow(clippy::indexing_slicing)]
    fn bucket_mut(&mut self, key: &str) -> &mut Chain<V> {
        let index = self.bucket_index(key);
        &mut self.buckets[index]
    }

    /// Inserts `key` at the tail of its bucket, or overwrites its value in place.
    /// Returns the previous value.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        if self.table_load() >= MAX_LOAD_FACTOR {
            self.rehash(prime_capacity(self.capacity().saturating_mul(2)));
        }

        let key = key.into();
        let chain = self.bucket_mut(&key);
        if let Some(entry) = chain.find_mut(&key) {
            return Some(mem::replace(&mut entry.value, value));
        }
        chain.push_back(Entry::new(key, value));
        self.size = self.size.saturating_add(1);
        None
    }

    /// Retrieves the value for `key`
    pub fn get(&self, key: &str) -> Option<&V> {
        self.bucket(key).find(key).map(|entry| &entry.value)
    }

    /// Returns true if `key` is stored
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Unlinks `key` from its bucket, returning whether it was present
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.bucket_mut(key).remove(key).is_some();
        if removed {
            self.size = self.size.saturating_sub(1);
        }
        removed
    }

    /// Rehashes every entry into `new_capacity` buckets, or the next prime above it.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CapacityTooSmall`] if `new_capacity` is zero or smaller
    /// than [`len`](Self::len), leaving the table untouched.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), TableError> {
        if new_capacity < self.size || new_capacity == 0 {
            warn!("refusing to resize {} entries into {new_capacity} buckets", self.size);
            return Err(TableError::CapacityTooSmall { requested: new_capacity, size: self.size });
        }
        self.rehash(prime_capacity(new_capacity));
        Ok(())
    }

    /// Swaps in `capacity` empty buckets and reinserts the old entries, bucket by
    /// bucket and head to tail
    fn rehash(&mut self, capacity: usize) {
        let old_buckets = mem::replace(&mut self.buckets, fresh_buckets(capacity));
        debug!(
            "rehashing {} entries from {} to {capacity} buckets",
            self.size,
            old_buckets.len()
        );
        self.size = 0;

        for mut chain in old_buckets {
            while let Some(entry) = chain.pop_front() {
                self.put(entry.key, entry.value);
            }
        }
    }
}

impl<V, H> ChainedTable<V, H> {
    /// Returns the number of entries
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `len / capacity`
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Counts the buckets whose chain is empty
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Replaces every chain with an empty one, keeping the capacity
    pub fn clear(&mut self) {
        self.buckets = fresh_buckets(self.capacity());
        self.size = 0;
    }

    /// Returns an iterator over the `(key, value)` pairs, bucket by bucket
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: &self.buckets, bucket: 0, chain: ChainIter::empty() }
    }

    /// Copies out every `(key, value)` pair, bucket by bucket
    #[must_use]
    pub fn keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }
}

impl<V, H> HashTable<V> for ChainedTable<V, H>
where
    H: KeyHash,
{
    fn put(&mut self, key: String, value: V) -> Result<Option<V>, TableError> {
        Ok(Self::put(self, key, value))
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

impl<V: fmt::Debug, H> fmt::Debug for ChainedTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedTable")
            .field("buckets", &self.buckets)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// One line per bucket: `index: key: value -> key: value`, with `-` for empty buckets
impl<V: fmt::Display, H> fmt::Display for ChainedTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {chain}")?;
        }
        Ok(())
    }
}

/// Iterator over the entries of a [`ChainedTable`]: buckets in index order, each
/// chain head to tail
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// All buckets of the table
    buckets: &'a [Chain<V>],
    /// Next bucket to open once `chain` runs dry
    bucket: usize,
    /// Position inside the current bucket
    chain: ChainIter<'a, V>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                return Some(entry.as_pair());
            }
            self.chain = self.buckets.get(self.bucket)?.iter();
            self.bucket = self.bucket.saturating_add(1);
        }
    }
}

impl<'a, V, H> IntoIterator for &'a ChainedTable<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
