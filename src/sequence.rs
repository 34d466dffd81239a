//! Object-id sequence over an external row store.
//!
//! Unique object identifiers come from a single-row sequence table owned
//! by a row-oriented storage facility outside this crate. Only that
//! boundary is defined here ([`RowStore`]); the generator itself is a thin
//! read-increment-persist wrapper around it.

use crate::probe;
use std::fmt;

/// Name of the sequence table.
pub const SEQUENCE_TABLE: &str = "sequence";

/// First identifier handed out by a freshly initialized sequence.
pub const ID_START_VALUE: i64 = 100;

/// Attribute positions within the sequence row.
pub const OBJ_ID: usize = 0;
pub const NAME: usize = 1;
pub const CURRENT_VALUE: usize = 2;
pub const INCREMENT: usize = 3;

/// One attribute value inside a persisted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Text(String),
}

/// One persisted row; attributes are addressed by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Attribute at `pos`, if the row has one there.
    pub fn at(&self, pos: usize) -> Option<&Value> {
        self.values.get(pos)
    }

    /// Replace the attribute at `pos`. Returns false (and changes
    /// nothing) when the row has no such position.
    pub fn set_at(&mut self, pos: usize, value: Value) -> bool {
        match self.values.get_mut(pos) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// Status reported by the mutating row-store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreError;

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("row store rejected the operation")
    }
}

impl std::error::Error for StoreError {}

/// Boundary to the row-oriented storage facility that persists the
/// sequence table. Implementations live outside this crate.
pub trait RowStore {
    /// Number of rows currently in `table`.
    fn count_rows(&self, table: &str) -> usize;

    /// Row at `index` within `table`, if any.
    fn read_row(&self, index: usize, table: &str) -> Option<Row>;

    /// Append a new row to `table`.
    fn insert_row(&mut self, table: &str, row: Row) -> Result<(), StoreError>;

    /// Update every row of `table` whose attribute at position
    /// `criteria.0` equals `criteria.1`, setting each attribute listed in
    /// `updates` to its paired value.
    fn update_row(
        &mut self,
        table: &str,
        criteria: (usize, Value),
        updates: &[(usize, Value)],
    ) -> Result<(), StoreError>;
}

/// Error returned by [`ObjectIds::next_id`].
#[derive(Debug)]
pub enum SequenceError {
    /// The store rejected the insert or update; no identifier was minted.
    Store(StoreError),
    /// The sequence row is missing or its current-value attribute is not
    /// an integer.
    MalformedRow,
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "persisting the sequence failed: {e}"),
            Self::MalformedRow => f.write_str("sequence row is malformed"),
        }
    }
}

impl std::error::Error for SequenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::MalformedRow => None,
        }
    }
}

impl From<StoreError> for SequenceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Mints unique object identifiers from the single-row sequence table.
#[derive(Debug)]
pub struct ObjectIds<S> {
    store: S,
}

impl<S: RowStore> ObjectIds<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Mint the next unique identifier.
    ///
    /// With exactly one row in the sequence table: read the current value,
    /// increment it, persist the update (matched on the obj-id attribute)
    /// and return the new value. In any other state the table is
    /// initialized with the starting value and an increment of one, and
    /// the starting value is returned. A store rejection leaves the
    /// persisted sequence as it was.
    pub fn next_id(&mut self) -> Result<i64, SequenceError> {
        let _span = probe::enter("next_id");
        if self.store.count_rows(SEQUENCE_TABLE) == 1 {
            let row = self
                .store
                .read_row(0, SEQUENCE_TABLE)
                .ok_or(SequenceError::MalformedRow)?;
            let current = match row.at(CURRENT_VALUE) {
                Some(Value::Int(v)) => *v,
                _ => return Err(SequenceError::MalformedRow),
            };
            let next = current + 1;
            self.store.update_row(
                SEQUENCE_TABLE,
                (OBJ_ID, Value::Int(0)),
                &[(CURRENT_VALUE, Value::Int(next))],
            )?;
            Ok(next)
        } else {
            let row = Row::new(vec![
                Value::Int(0),
                Value::Text("objectID".to_owned()),
                Value::Int(ID_START_VALUE),
                Value::Int(1),
            ]);
            self.store.insert_row(SEQUENCE_TABLE, row)?;
            Ok(ID_START_VALUE)
        }
    }
}
