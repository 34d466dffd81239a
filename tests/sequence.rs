// ObjectIds behavior against an in-memory RowStore double.
//
// The double keeps tables as plain row vectors and can be switched into a
// rejecting mode to exercise the failure paths. Invariants exercised:
// - First call initializes the single-row sequence table and returns the
//   starting value.
// - Later calls read-increment-persist and return consecutive values.
// - A rejected write mints nothing; the persisted value is unchanged, so
//   the next successful call continues from it.
// - A table without exactly one row is (re)initialized.
use flatdict::sequence::{
    ObjectIds, Row, RowStore, SequenceError, StoreError, Value, CURRENT_VALUE, ID_START_VALUE,
    NAME, SEQUENCE_TABLE,
};
use std::collections::HashMap;

#[derive(Default)]
struct MemStore {
    tables: HashMap<String, Vec<Row>>,
    reject_writes: bool,
}

impl RowStore for MemStore {
    fn count_rows(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, Vec::len)
    }

    fn read_row(&self, index: usize, table: &str) -> Option<Row> {
        self.tables.get(table)?.get(index).cloned()
    }

    fn insert_row(&mut self, table: &str, row: Row) -> Result<(), StoreError> {
        if self.reject_writes {
            return Err(StoreError);
        }
        self.tables.entry(table.to_owned()).or_default().push(row);
        Ok(())
    }

    fn update_row(
        &mut self,
        table: &str,
        criteria: (usize, Value),
        updates: &[(usize, Value)],
    ) -> Result<(), StoreError> {
        if self.reject_writes {
            return Err(StoreError);
        }
        let rows = self.tables.get_mut(table).ok_or(StoreError)?;
        for row in rows.iter_mut() {
            if row.at(criteria.0) == Some(&criteria.1) {
                for (pos, value) in updates {
                    row.set_at(*pos, value.clone());
                }
            }
        }
        Ok(())
    }
}

// Test: first call initializes the sequence table.
// Verifies: starting value returned; exactly one row persisted with the
// expected name and current-value attributes.
#[test]
fn first_call_initializes_and_returns_start() {
    let mut ids = ObjectIds::new(MemStore::default());
    assert_eq!(ids.next_id().unwrap(), ID_START_VALUE);

    let store = ids.store();
    assert_eq!(store.count_rows(SEQUENCE_TABLE), 1);
    let row = store.read_row(0, SEQUENCE_TABLE).unwrap();
    assert_eq!(row.at(NAME), Some(&Value::Text("objectID".to_owned())));
    assert_eq!(row.at(CURRENT_VALUE), Some(&Value::Int(ID_START_VALUE)));
}

// Test: consecutive calls increment and persist.
// Verifies: values are consecutive, the table stays single-row, and the
// persisted current value tracks the last minted id.
#[test]
fn subsequent_calls_increment() {
    let mut ids = ObjectIds::new(MemStore::default());
    assert_eq!(ids.next_id().unwrap(), ID_START_VALUE);
    assert_eq!(ids.next_id().unwrap(), ID_START_VALUE + 1);
    assert_eq!(ids.next_id().unwrap(), ID_START_VALUE + 2);

    let store = ids.store();
    assert_eq!(store.count_rows(SEQUENCE_TABLE), 1);
    let row = store.read_row(0, SEQUENCE_TABLE).unwrap();
    assert_eq!(row.at(CURRENT_VALUE), Some(&Value::Int(ID_START_VALUE + 2)));
}

// Test: a rejected update mints nothing.
// Verifies: the error surfaces, and the next successful call continues
// from the last persisted value rather than skipping ids.
#[test]
fn rejected_update_leaves_sequence_unchanged() {
    let mut ids = ObjectIds::new(MemStore::default());
    assert_eq!(ids.next_id().unwrap(), ID_START_VALUE);
    assert_eq!(ids.next_id().unwrap(), ID_START_VALUE + 1);

    let mut store = ids.into_inner();
    store.reject_writes = true;
    let mut ids = ObjectIds::new(store);
    assert!(matches!(ids.next_id(), Err(SequenceError::Store(_))));

    let mut store = ids.into_inner();
    store.reject_writes = false;
    let mut ids = ObjectIds::new(store);
    assert_eq!(ids.next_id().unwrap(), ID_START_VALUE + 2);
}

// Test: a sequence row without an integer current value is rejected.
#[test]
fn malformed_row_is_an_error() {
    let mut store = MemStore::default();
    store
        .insert_row(
            SEQUENCE_TABLE,
            Row::new(vec![
                Value::Int(0),
                Value::Text("objectID".to_owned()),
                Value::Text("not a number".to_owned()),
                Value::Int(1),
            ]),
        )
        .unwrap();

    let mut ids = ObjectIds::new(store);
    assert!(matches!(ids.next_id(), Err(SequenceError::MalformedRow)));
}

// Test: anything other than exactly one row triggers initialization.
// Verifies: a doubly-seeded table gets a fresh starting row appended and
// the starting value is returned, mirroring the init path.
#[test]
fn non_single_row_table_is_reinitialized() {
    let mut store = MemStore::default();
    for _ in 0..2 {
        store
            .insert_row(
                SEQUENCE_TABLE,
                Row::new(vec![
                    Value::Int(0),
                    Value::Text("objectID".to_owned()),
                    Value::Int(500),
                    Value::Int(1),
                ]),
            )
            .unwrap();
    }

    let mut ids = ObjectIds::new(store);
    assert_eq!(ids.next_id().unwrap(), ID_START_VALUE);
    assert_eq!(ids.store().count_rows(SEQUENCE_TABLE), 3);
}
