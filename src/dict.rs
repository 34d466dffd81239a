//! FlatDict: the public dictionary API over the flat slot store.

use crate::hash::hash32;
use crate::probe;
use crate::slot_store::{Slot, SlotStore};
use std::collections::TryReserveError;
use std::fmt;
use std::io;

/// Marker written by [`FlatDict::dump`] for a key that holds no value.
const UNDEF_MARKER: &str = "UNDEF";

/// Error returned by [`FlatDict::set`].
#[derive(Debug)]
pub enum SetError {
    /// Growing the slot array failed. The dictionary is left at its prior
    /// capacity and count; nothing was inserted.
    Alloc(TryReserveError),
}

impl fmt::Display for SetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alloc(e) => write!(f, "growing the dictionary failed: {e}"),
        }
    }
}

impl std::error::Error for SetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Alloc(e) => Some(e),
        }
    }
}

impl From<TryReserveError> for SetError {
    fn from(value: TryReserveError) -> Self {
        Self::Alloc(value)
    }
}

/// A string dictionary on a flat slot array.
///
/// Keys are unique owned strings; each may hold an owned value or no value
/// at all. Matching compares the cached key hash before the key bytes, but
/// always walks the whole array: every operation is O(capacity) by
/// contract, not O(1).
#[derive(Debug)]
pub struct FlatDict {
    store: SlotStore,
}

impl FlatDict {
    /// Empty dictionary at the minimum capacity (128 slots).
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Empty dictionary with room for `hint` entries before the first
    /// growth. Hints below the 128-slot floor are raised to it.
    pub fn with_capacity(hint: usize) -> Self {
        Self {
            store: SlotStore::with_capacity(hint),
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Total slot count. Grows only by doubling, never shrinks.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Whether `key` is present, regardless of whether it holds a value.
    pub fn contains_key(&self, key: &str) -> bool {
        let _span = probe::enter("contains_key");
        self.store.find_match(hash32(key), key).is_some()
    }

    /// Look up `key` and return a borrow of its stored value.
    ///
    /// Returns `default` only when the key is absent. A key stored with no
    /// value yields `None` even if `default` is `Some` — the key was
    /// found, and its (empty) value is the answer. The borrow points into
    /// the dictionary's own storage and ends at the next mutation.
    pub fn get<'a>(&'a self, key: &str, default: Option<&'a str>) -> Option<&'a str> {
        let _span = probe::enter("get");
        match self.store.find_match(hash32(key), key) {
            Some(i) => self.store.slots()[i].value.as_deref(),
            None => default,
        }
    }

    /// Insert `key` with `value`, or replace the value if the key is
    /// already present.
    ///
    /// A `None` value is legal and stores the key with no value (see
    /// [`get`](Self::get)). Replacement drops the previous value in place
    /// and never changes the occupied count. A fresh key goes into the
    /// first free slot found by probing from index `count` with
    /// wraparound, after doubling the capacity if no slot is free; if that
    /// reallocation fails the error is returned and the dictionary is
    /// untouched.
    pub fn set(&mut self, key: &str, value: Option<&str>) -> Result<(), SetError> {
        let _span = probe::enter("set");
        let hash = hash32(key);
        if self.store.len() > 0 {
            if let Some(i) = self.store.find_match(hash, key) {
                self.store.replace_value(i, value);
                return Ok(());
            }
        }
        if self.store.is_full() {
            self.store.grow()?;
        }
        let i = self.store.free_slot();
        self.store.occupy(i, key, value, hash);
        Ok(())
    }

    /// Remove `key` if present; silently does nothing otherwise.
    ///
    /// Vacates the matching slot in place — no tombstone, no compaction of
    /// neighbors. Sound because lookup never follows a probe chain.
    pub fn unset(&mut self, key: &str) {
        let _span = probe::enter("unset");
        if let Some(i) = self.store.find_match(hash32(key), key) {
            self.store.vacate(i);
        }
    }

    /// Write every entry to `out`, one line per occupied slot in index
    /// order: the key right-aligned to 20 columns, a tab, then the value
    /// in brackets (`UNDEF` for a key with no value). An empty dictionary
    /// writes the single line `empty dictionary`. Errors come from the
    /// sink only.
    pub fn dump<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        let _span = probe::enter("dump");
        if self.store.len() < 1 {
            return writeln!(out, "empty dictionary");
        }
        for (key, value) in self.iter() {
            writeln!(out, "{key:>20}\t[{}]", value.unwrap_or(UNDEF_MARKER))?;
        }
        Ok(())
    }

    /// Iterate `(key, value)` pairs in slot-index order — the same order
    /// `dump` writes. After deletions and re-insertions this reflects
    /// where the wraparound probe placed each key, not insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.store.slots().iter(),
        }
    }
}

impl Default for FlatDict {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over occupied slots in index order.
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Slot>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, Option<&'a str>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.inner.by_ref() {
            if let Some(key) = slot.key.as_deref() {
                return Some((key, slot.value.as_deref()));
            }
        }
        None
    }
}
