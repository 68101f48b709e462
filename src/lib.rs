//! prime-hashmap: string-keyed hash maps with prime capacities, in two
//! collision-resolution flavours.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: show the mechanics a hash table is made of (prime sizing,
//!   collision resolution, rehash, deletion) in two small, independent
//!   maps with the same operation set.
//! - Variants:
//!   - OpenAddressingMap<V, S>: one flat slot array; collisions resolved
//!     by quadratic probing `(h + j^2) mod capacity`; removal leaves a
//!     tombstone so later probes still walk past the slot.
//!   - SeparateChainingMap<V, S>: one chain per bucket; collisions append
//!     to the chain; removal unlinks the entry.
//!   - find_mode: a client of SeparateChainingMap's public API.
//!
//! Constraints
//! - Capacity is always prime and at least 2. Constructors round requests
//!   up with `prime::next_prime` (2 becomes 3); `resize_table` keeps a
//!   prime target and rounds anything else up.
//! - Open addressing grows before an insert once `len / capacity >= 0.5`;
//!   separate chaining once `len / capacity` (truncated) reaches 1.
//!   Growth targets double the capacity, then round up to a prime.
//! - Keys are unique across the table in both variants.
//! - Lookups return `Option`; a stored value is never confused with
//!   absence.
//!
//! Hasher contract
//! - `S: KeyHasher` maps `&str` to `u64` and must be deterministic. Any
//!   `Fn(&str) -> u64` qualifies. `CharSum` and `WeightedCharSum` are
//!   provided; `CharSum` is the default.
//!
//! Resize policy
//! - OpenAddressingMap ignores targets below `len()`; SeparateChainingMap
//!   only ignores 0. Both ignore targets above `MAX_CAPACITY`. Neither
//!   reports the refusal other than through a `debug!` log record.
//!
//! Notes and non-goals
//! - Single-threaded and unsynchronized. Callers sharing a map across
//!   threads wrap it in a lock (e.g. `RwLock`).
//! - No persistence, no shrinking on removal, no generic key type.
//! - Iterators borrow the map, so any number of traversals may run at once
//!   and each starts from the first slot.

pub mod error;
pub mod key_hash;
mod mode;
pub mod open_addressing;
pub mod prime;
pub mod separate_chaining;
#[cfg(test)]
mod separate_chaining_proptest;

/// Initial capacity used by the `Default` impls.
pub const DEFAULT_CAPACITY: usize = 11;

// Public surface
pub use error::CapacityError;
pub use key_hash::{CharSum, KeyHasher, WeightedCharSum};
pub use mode::find_mode;
pub use open_addressing::OpenAddressingMap;
pub use separate_chaining::SeparateChainingMap;
