//! Key hashing contract.
//!
//! A `KeyHasher` maps a string key to a non-negative integer. The only
//! requirement is determinism: the same key always hashes to the same
//! value for the lifetime of a map. Hash quality affects probe and chain
//! lengths, never correctness.

/// Hash function over string keys supplied to a map at construction.
pub trait KeyHasher {
    fn hash_key(&self, key: &str) -> u64;
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> u64,
{
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        self(key)
    }
}

/// Sum of the key's byte values. Anagrams collide.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CharSum;

impl KeyHasher for CharSum {
    fn hash_key(&self, key: &str) -> u64 {
        key.bytes()
            .fold(0u64, |acc, b| acc.wrapping_add(u64::from(b)))
    }
}

/// Position-weighted byte sum: `sum((i + 1) * byte_i)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WeightedCharSum;

impl KeyHasher for WeightedCharSum {
    fn hash_key(&self, key: &str) -> u64 {
        key.bytes().enumerate().fold(0u64, |acc, (i, b)| {
            acc.wrapping_add((i as u64 + 1).wrapping_mul(u64::from(b)))
        })
    }
}
