//! OpenAddressingMap: flat slot array with quadratic probing and tombstones.
//!
//! Slots are in exactly one of three states (`Empty`, `Occupied`,
//! `Tombstone`). Probing for a key stops at the first `Empty` slot, so a
//! removed entry must leave a `Tombstone` behind to keep later entries on
//! the same probe path reachable. Tombstones are reused by inserts and
//! dropped for good on rehash.

use crate::error::{check_capacity, CapacityError};
use crate::key_hash::{CharSum, KeyHasher};
use crate::prime::{is_prime, next_prime, MAX_CAPACITY};
use crate::DEFAULT_CAPACITY;
use core::fmt;
use core::mem;
use log::{debug, error, trace};

#[derive(Clone, Debug)]
pub(crate) struct Entry<V> {
    pub(crate) key: String,
    pub(crate) value: V,
}

#[derive(Clone, Debug)]
pub(crate) enum Slot<V> {
    Empty,
    Occupied(Entry<V>),
    Tombstone,
}

fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || Slot::Empty);
    slots
}

/// Quadratic probe sequence `(base + j^2) mod capacity` for `j in 0..capacity`.
///
/// For a prime capacity the offsets repeat with period `capacity`, so the
/// sequence covers every reachable slot before it ends.
#[derive(Clone, Debug)]
struct Probe {
    index: usize,
    step: usize,
    capacity: usize,
}

impl Probe {
    fn new(hash: u64, capacity: usize) -> Self {
        Self {
            index: (hash % capacity as u64) as usize,
            step: 0,
            capacity,
        }
    }
}

impl Iterator for Probe {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.step >= self.capacity {
            return None;
        }
        let current = self.index;
        self.step += 1;
        // j^2 - (j-1)^2 == 2j - 1
        self.index = (self.index + 2 * self.step - 1) % self.capacity;
        Some(current)
    }
}

/// Open-addressing map from `String` keys to `V`.
///
/// Capacity is always prime. The table grows to the next prime above
/// double its capacity before an insert whenever the load factor has
/// reached 0.5, so an insert always finds a free slot on its probe path.
///
/// Not synchronized: wrap an instance in a lock to share it across threads.
#[derive(Clone)]
pub struct OpenAddressingMap<V, S = CharSum> {
    pub(crate) slots: Vec<Slot<V>>,
    len: usize,
    hasher: S,
}

impl<V> OpenAddressingMap<V> {
    /// Map using [`CharSum`] with `capacity` rounded up to a prime.
    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        Self::with_capacity_and_hasher(capacity, CharSum)
    }
}

impl<V> Default for OpenAddressingMap<V> {
    fn default() -> Self {
        Self::from_parts(next_prime(DEFAULT_CAPACITY), CharSum)
    }
}

/// Iterator over live entries in slot order.
pub struct Iter<'a, V> {
    it: core::slice::Iter<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.it.by_ref() {
            if let Slot::Occupied(e) = slot {
                self.remaining -= 1;
                return Some((e.key.as_str(), &e.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'a, V, S> IntoIterator for &'a OpenAddressingMap<V, S> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            it: self.slots.iter(),
            remaining: self.len,
        }
    }
}

impl<V, S> OpenAddressingMap<V, S> {
    fn from_parts(capacity: usize, hasher: S) -> Self {
        Self {
            slots: empty_slots(capacity),
            len: 0,
            hasher,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots; always prime.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// `len / capacity`.
    pub fn table_load(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Slots free for insertion: empty or tombstoned.
    pub fn empty_buckets(&self) -> usize {
        let free = self
            .slots
            .iter()
            .filter(|s| !matches!(s, Slot::Occupied(_)))
            .count();
        debug_assert_eq!(free, self.capacity() - self.len);
        free
    }

    /// Slots holding a logically deleted entry.
    pub fn tombstones(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Tombstone))
            .count()
    }

    /// Drop every entry and tombstone, keeping the current capacity.
    pub fn clear(&mut self) {
        trace!("clearing open addressing table of capacity {}", self.capacity());
        self.slots = empty_slots(self.capacity());
        self.len = 0;
    }

    /// Live entries in slot order. Each call starts a fresh traversal.
    pub fn iter(&self) -> Iter<'_, V> {
        self.into_iter()
    }

    /// Snapshot of `(key, value)` pairs in slot order.
    pub fn keys_and_values(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }
}

impl<V, S> OpenAddressingMap<V, S>
where
    S: KeyHasher,
{
    /// Map using `hasher` with `capacity` rounded up to a prime.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, CapacityError> {
        check_capacity(capacity)?;
        Ok(Self::from_parts(next_prime(capacity), hasher))
    }

    fn probe(&self, key: &str) -> Probe {
        Probe::new(self.hasher.hash_key(key), self.capacity())
    }

    /// Slot index of the live entry for `key`, stopping at the first empty slot.
    fn find_live(&self, key: &str) -> Option<usize> {
        for index in self.probe(key) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(e) if e.key == key => return Some(index),
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
        }
        None
    }

    /// Insert or overwrite. Returns the previous value for `key`, if any.
    ///
    /// Grows first when the load factor is at least 0.5, even if `key` is
    /// already present. A new key lands in the first empty or tombstoned
    /// slot on its probe path; a live copy further along the path is
    /// updated in place instead.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        if 2 * self.len >= self.capacity() {
            self.resize_table(self.capacity() * 2);
        }

        let mut vacant = None;
        for index in self.probe(&key) {
            match &mut self.slots[index] {
                Slot::Empty => {
                    vacant.get_or_insert(index);
                    break;
                }
                Slot::Tombstone => {
                    vacant.get_or_insert(index);
                }
                Slot::Occupied(e) if e.key == key => {
                    return Some(mem::replace(&mut e.value, value));
                }
                Slot::Occupied(_) => {}
            }
        }

        debug_assert!(
            vacant.is_some(),
            "no free slot for a new key at capacity {}",
            self.capacity()
        );
        let Some(index) = vacant else {
            // Only reachable when growth was refused at MAX_CAPACITY.
            error!(
                "dropping insert: open addressing table full at capacity {}",
                self.capacity()
            );
            return None;
        };
        self.slots[index] = Slot::Occupied(Entry { key, value });
        self.len += 1;
        None
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        if self.len == 0 {
            return None;
        }
        let index = self.find_live(key)?;
        match &self.slots[index] {
            Slot::Occupied(e) => Some(&e.value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        if self.len == 0 {
            return None;
        }
        let index = self.find_live(key)?;
        match &mut self.slots[index] {
            Slot::Occupied(e) => Some(&mut e.value),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.len != 0 && self.find_live(key).is_some()
    }

    /// Tombstone the slot holding `key` and return its value. Absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.find_live(key)?;
        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied(e) => {
                self.len -= 1;
                Some(e.value)
            }
            other => {
                self.slots[index] = other;
                None
            }
        }
    }

    /// Rehash every live entry into `new_capacity` slots. A prime target
    /// (including 2) is kept; anything else goes through [`next_prime`].
    ///
    /// Targets below `len()` or above [`MAX_CAPACITY`] are ignored.
    /// Re-insertion goes through [`put`](Self::put), so a target close to
    /// `len()` triggers further growth and the final capacity can exceed it.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < self.len || new_capacity > MAX_CAPACITY {
            debug!(
                "ignoring resize of open addressing table to {} (len {})",
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
            "rehashing open addressing table: {} -> {} slots, {} live",
            self.capacity(),
            new_capacity,
            self.len
        );

        let old = mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.len = 0;
        for slot in old {
            if let Slot::Occupied(Entry { key, value }) = slot {
                self.put(key, value);
            }
        }
    }
}

impl<V: fmt::Debug, S> fmt::Debug for OpenAddressingMap<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{}: empty", i)?,
                Slot::Tombstone => writeln!(f, "{}: tombstone", i)?,
                Slot::Occupied(e) => writeln!(f, "{}: {:?} -> {:?}", i, e.key, e.value)?,
            }
        }
        Ok(())
    }
}
