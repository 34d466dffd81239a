//! flatdict: a single-threaded string dictionary backed by a flat slot
//! array, with a cached 32-bit key hash used to skip string comparisons
//! during scans.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small associative store for string/string configuration data
//!   whose behavior is simple to reason about: one flat array, full-array
//!   scans, growth by doubling, nothing clever hiding in the probe logic.
//! - Layers:
//!   - hash: the pure one-at-a-time key hash (`hash32`). Deterministic
//!     across calls and processes; no per-process salt.
//!   - SlotStore: structural layer owning the slot array and the occupancy
//!     count. Knows how to scan for a matching key, find a free slot, and
//!     grow. Does not know the public operation semantics.
//!   - FlatDict: public API (`get`/`set`/`unset`/`dump`/`iter`) and the
//!     error taxonomy, built on SlotStore.
//!
//! Constraints
//! - Single-threaded: exclusive mutation through `&mut self`; callers that
//!   share an instance across threads supply their own lock around it.
//! - Every operation is O(capacity). The cached hash is a pre-filter for
//!   the string comparison, not a bucket address: lookups, overwrites and
//!   deletions always scan the whole array from index 0.
//! - Insertion probes for a free slot starting at index `count`, wrapping
//!   at capacity. Deletion vacates a slot in place with no tombstone and
//!   no rebalancing, which is sound only because no probe chain is ever
//!   rooted at a hash bucket. Do not "upgrade" one side without the other.
//! - A key may be present with no value. That state is distinct from the
//!   key being absent: `get` returns the stored null, not the caller's
//!   default, and `contains_key` reports true.
//!
//! Notes and non-goals
//! - Capacity starts at 128 slots minimum, doubles when full, and never
//!   shrinks. Growth is a single `Vec` resize; when the reallocation fails
//!   `set` reports it and the dictionary is left exactly as it was.
//! - Values returned by `get` and `iter` borrow the dictionary's own
//!   storage; growth reallocates that storage, so any later mutation ends
//!   the borrow (the compiler enforces this).
//! - Entry/exit probes around the public operations are trace-level log
//!   spans with no functional effect (`probe`).
//! - The object-id sequence (`sequence`) is a thin wrapper over an
//!   external row store, specified here only at its boundary trait.

mod dict;
mod hash;
mod probe;
pub mod sequence;
mod slot_store;

// Public surface
pub use dict::{FlatDict, Iter, SetError};
pub use hash::hash32;
