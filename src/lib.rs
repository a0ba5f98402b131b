//! # Prime Hash
//!
//! Hash tables from string keys to arbitrary values, built on prime-sized bucket
//! arrays and a caller-supplied hash function.
//!
//! This crate provides two hash table implementations sharing the [`HashTable`] contract:
//!
//! - [`OpenAddressingTable`]: entries live in the bucket array itself; collisions are
//!   resolved with quadratic probing and removals leave tombstones. Grows before an
//!   insert once it is half full.
//! - [`ChainedTable`]: each bucket holds a linked list of the entries hashing to it.
//!   Grows before an insert once there are as many entries as buckets.
//!
//! Both tables double their capacity to the next prime when they grow and rehash every
//! live entry. Capacities are always prime.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primehash::{OpenAddressingTable, TableError, hash_function_1};
//!
//! # fn main() -> Result<(), TableError> {
//! let mut table = OpenAddressingTable::new(11, hash_function_1);
//!
//! table.put("apple", 1)?;
//! table.put("banana", 2)?;
//! assert_eq!(table.get("apple"), Some(&1));
//!
//! // Update values
//! table.put("apple", 10)?;
//! assert_eq!(table.get("apple"), Some(&10));
//! assert_eq!(table.len(), 2);
//!
//! // Remove values
//! assert!(table.remove("apple"));
//! assert_eq!(table.get("apple"), None);
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Hash Functions
//!
//! Any `Fn(&str) -> u64` works as the hash function:
//!
//! ```rust
//! use primehash::ChainedTable;
//!
//! let mut table = ChainedTable::new(5, |key: &str| key.len() as u64);
//! for word in ["one", "two", "three", "four", "five", "six"] {
//!     table.put(word, word.len());
//! }
//!
//! // the sixth insert found the table full and grew it to the next prime above 10
//! assert_eq!(table.capacity(), 11);
//! assert_eq!(table.get("three"), Some(&5));
//! ```

/// Module implementing the singly linked bucket list of the chained table
mod chain;
/// Module implementing the separate-chaining hash table
mod chained;
/// Module defining the key/value record stored by both tables
mod entry;
/// Error types returned by table operations
mod error;
/// Hash function seam and the reference hash functions
mod hash;
/// Mode finding built on the chained table
mod mode;
/// Module implementing the open-addressing hash table
mod open_addressing;
/// Prime capacity computations
mod prime;
/// Trait shared by both hash tables
mod table;

pub use chained::{ChainedTable, Iter as ChainedIter};
pub use error::TableError;
pub use hash::{HashFn, KeyHash, hash_function_1, hash_function_2};
pub use mode::find_mode;
pub use open_addressing::{Iter as OpenAddressingIter, OpenAddressingTable};
pub use prime::{LARGEST_PRIME, is_prime, next_prime, prime_capacity};
pub use table::{HashTable, fill};
