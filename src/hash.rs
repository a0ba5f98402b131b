//! Pluggable key hashing

/// Maps a key to a non-negative integer.
///
/// The tables only ever reduce the result modulo their capacity, so any pure
/// function of the key works. Every `Fn(&str) -> u64` implements this trait.
pub trait KeyHash {
    /// Hashes `key`
    fn hash(&self, key: &str) -> u64;
}

impl<F> KeyHash for F
where
    F: Fn(&str) -> u64,
{
    fn hash(&self, key: &str) -> u64 {
        self(key)
    }
}

/// Plain function pointer hasher, the default hasher type of both tables
pub type HashFn = fn(&str) -> u64;

/// Sums the character codes of `key`.
///
/// Anagrams collide, which makes this useful for exercising collision paths.
#[must_use]
pub fn hash_function_1(key: &str) -> u64 {
    key.chars().fold(0_u64, |hash, c| hash.wrapping_add(u64::from(c)))
}

/// Sums the character codes of `key`, each weighted by its 1-based position
#[must_use]
pub fn hash_function_2(key: &str) -> u64 {
    key.chars()
        .fold((0_u64, 1_u64), |(hash, position), c| {
            (hash.wrapping_add(position.wrapping_mul(u64::from(c))), position.wrapping_add(1))
        })
        .0
}
