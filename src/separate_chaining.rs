//! SeparateChainingMap: one owned chain of entries per bucket.
//!
//! Keys hashing to the same bucket share its chain; removal unlinks the
//! entry outright, so there is no deleted-slot state to track.

use crate::error::{check_capacity, CapacityError};
use crate::key_hash::{CharSum, KeyHasher};
use crate::prime::{is_prime, next_prime, MAX_CAPACITY};
use crate::DEFAULT_CAPACITY;
use core::fmt;
use core::mem;
use log::{debug, trace};

#[derive(Clone, Debug)]
pub(crate) struct Node<V> {
    pub(crate) key: String,
    pub(crate) value: V,
}

/// Bucket contents in insertion order.
#[derive(Clone, Debug)]
pub(crate) struct Chain<V> {
    pub(crate) nodes: Vec<Node<V>>,
}

impl<V> Chain<V> {
    const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.key == key)
    }

    fn find(&self, key: &str) -> Option<&Node<V>> {
        self.nodes.iter().find(|n| n.key == key)
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut Node<V>> {
        self.nodes.iter_mut().find(|n| n.key == key)
    }

    /// Appends without checking for an existing node with the same key.
    fn insert(&mut self, key: String, value: V) {
        self.nodes.push(Node { key, value });
    }

    fn remove(&mut self, key: &str) -> Option<Node<V>> {
        let index = self.position(key)?;
        Some(self.nodes.remove(index))
    }
}

fn empty_chains<V>(capacity: usize) -> Vec<Chain<V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Chain::new);
    buckets
}

/// Separate-chaining map from `String` keys to `V`.
///
/// Capacity (the bucket count) is always prime. Before an insert, the
/// table grows to the next prime above double its capacity once the
/// average chain length `len / capacity` (truncated) reaches 1.
///
/// Not synchronized: wrap an instance in a lock to share it across threads.
#[derive(Clone)]
pub struct SeparateChainingMap<V, S = CharSum> {
    pub(crate) buckets: Vec<Chain<V>>,
    len: usize,
    hasher: S,
}

impl<V> SeparateChainingMap<V> {
    /// Map using [`CharSum`] with `capacity` rounded up to a prime.
    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        Self::with_capacity_and_hasher(capacity, CharSum)
    }
}

impl<V> Default for SeparateChainingMap<V> {
    fn default() -> Self {
        Self::from_parts(next_prime(DEFAULT_CAPACITY), CharSum)
    }
}

/// Iterator over entries in bucket order, then chain order.
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Chain<V>>,
    chain: core::slice::Iter<'a, Node<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(n) = self.chain.next() {
                self.remaining -= 1;
                return Some((n.key.as_str(), &n.value));
            }
            self.chain = self.buckets.next()?.nodes.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'a, V, S> IntoIterator for &'a SeparateChainingMap<V, S> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            buckets: self.buckets.iter(),
            chain: Default::default(),
            remaining: self.len,
        }
    }
}

impl<V, S> SeparateChainingMap<V, S> {
    fn from_parts(capacity: usize, hasher: S) -> Self {
        Self {
            buckets: empty_chains(capacity),
            len: 0,
            hasher,
        }
    }

    /// Number of entries across all chains.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets; always prime.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// `len / capacity`, i.e. the average chain length.
    pub fn table_load(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Buckets whose chain is empty.
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|c| c.is_empty()).count()
    }

    /// Drop every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        trace!("clearing separate chaining table of capacity {}", self.capacity());
        self.buckets = empty_chains(self.capacity());
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, V> {
        self.into_iter()
    }

    /// Snapshot of `(key, value)` pairs in bucket order, then chain order.
    pub fn keys_and_values(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }
}

impl<V, S> SeparateChainingMap<V, S>
where
    S: KeyHasher,
{
    /// Map using `hasher` with `capacity` rounded up to a prime.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, CapacityError> {
        check_capacity(capacity)?;
        Ok(Self::from_parts(next_prime(capacity), hasher))
    }

    fn bucket_index(&self, key: &str) -> usize {
        (self.hasher.hash_key(key) % self.capacity() as u64) as usize
    }

    fn chain(&self, key: &str) -> &Chain<V> {
        &self.buckets[self.bucket_index(key)]
    }

    fn chain_mut(&mut self, key: &str) -> &mut Chain<V> {
        let index = self.bucket_index(key);
        &mut self.buckets[index]
    }

    /// Insert or overwrite. Returns the previous value for `key`, if any.
    ///
    /// Grows first when the truncated average chain length is at least 1,
    /// even if `key` is already present.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        if self.len / self.capacity() >= 1 {
            self.resize_table(self.capacity() * 2);
        }

        let chain = self.chain_mut(&key);
        if let Some(node) = chain.find_mut(&key) {
            return Some(mem::replace(&mut node.value, value));
        }
        chain.insert(key, value);
        self.len += 1;
        None
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain(key).find(key).map(|n| &n.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.chain_mut(key).find_mut(key).map(|n| &mut n.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.len != 0 && self.chain(key).position(key).is_some()
    }

    /// Unlink `key` from its chain and return its value. Absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let node = self.chain_mut(key).remove(key)?;
        self.len -= 1;
        Some(node.value)
    }

    /// Rehash every entry into `new_capacity` buckets. A prime target
    /// (including 2) is kept; anything else goes through [`next_prime`].
    ///
    /// Unlike the open-addressing map, any target from 1 up to
    /// [`MAX_CAPACITY`] is accepted, including ones below `len()`.
    /// Re-insertion goes through [`put`](Self::put), so an undersized
    /// target grows again while entries are moved over.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 || new_capacity > MAX_CAPACITY {
            debug!(
                "ignoring resize of separate chaining table to {} (len {})",
                new_capacity, self.len
            );
            return;
        }
        let new_capacity = if is_prime(new_capacity) {
            new_capacity
        } else {
            next_prime(new_capacity)
        };
        trace!(
            "rehashing separate chaining table: {} -> {} buckets, {} entries",
            self.capacity(),
            new_capacity,
            self.len
        );

        let old = mem::replace(&mut self.buckets, empty_chains(new_capacity));
        self.len = 0;
        for chain in old {
            for Node { key, value } in chain.nodes {
                self.put(key, value);
            }
        }
    }
}

impl<V: fmt::Debug, S> fmt::Debug for SeparateChainingMap<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chain) in self.buckets.iter().enumerate() {
            write!(f, "{}:", i)?;
            for (j, n) in chain.nodes.iter().enumerate() {
                let sep = if j == 0 { " " } else { " -> " };
                write!(f, "{}({:?}: {:?})", sep, n.key, n.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
