//! The contract shared by both collision strategies

use crate::TableError;

/// Associative storage from string keys to values of type `V`.
///
/// Implemented by [`OpenAddressingTable`](crate::OpenAddressingTable) and
/// [`ChainedTable`](crate::ChainedTable), so code written against this trait works with
/// either collision strategy.
pub trait HashTable<V> {
    /// Inserts or updates `key`, returning the previous value if the key was live.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ProbeExhausted`] if an open-addressing table finds no
    /// slot for the key. Chaining never fails.
    fn put(&mut self, key: String, value: V) -> Result<Option<V>, TableError>;

    /// Returns the value stored for `key`
    fn get(&self, key: &str) -> Option<&V>;

    /// Returns true if `key` has a live entry
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, returning whether a live entry was removed
    fn remove(&mut self, key: &str) -> bool;

    /// Drops every entry, keeping the current capacity
    fn clear(&mut self);

    /// Rehashes every live entry into `new_capacity` buckets (rounded up to a prime).
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CapacityTooSmall`] if `new_capacity` is zero or below
    /// [`len`](Self::len); the table is left unchanged.
    fn resize(&mut self, new_capacity: usize) -> Result<(), TableError>;

    /// Number of live entries
    fn len(&self) -> usize;

    /// Returns true if there are no live entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of buckets, always prime
    fn capacity(&self) -> usize;

    /// Live entries per bucket
    fn table_load(&self) -> f64;

    /// Number of buckets holding no live entry
    fn empty_buckets(&self) -> usize;

    /// Owned copies of every live `(key, value)` pair, in bucket order
    fn keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone;
}

/// Builds a table from `pairs` by calling [`HashTable::put`] for each one, so later
/// duplicates overwrite earlier ones.
///
/// # Errors
///
/// Propagates the first error returned by `put`.
pub fn fill<T, V, I>(table: &mut T, pairs: I) -> Result<(), TableError>
where
    T: HashTable<V>,
    I: IntoIterator<Item = (String, V)>,
{
    for (key, value) in pairs {
        table.put(key, value)?;
    }
    Ok(())
}
