use modelsort::prelude::*;
use std::collections::HashMap;

// Simulate a column-oriented table model owned by a view layer.
struct MockTableModel {
    names: Vec<String>,
    sizes: Vec<u64>,
    notifications: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
struct FileRow {
    name: String,
    size: u64,
}

// Field lookup on a typed row, without going through a map.
impl Record for FileRow {
    type Key = u64;

    fn field(&self, name: &str) -> Option<&u64> {
        (name == "size").then_some(&self.size)
    }
}

impl MockTableModel {
    fn new(rows: &[(&str, u64)]) -> Self {
        Self {
            names: rows.iter().map(|(n, _)| n.to_string()).collect(),
            sizes: rows.iter().map(|&(_, s)| s).collect(),
            notifications: Vec::new(),
        }
    }
}

// Implement ListModel for the external struct.
// This proves the trait is implementable by "outside crates".
impl ListModel for MockTableModel {
    type Item = FileRow;

    fn count(&self) -> usize {
        self.names.len()
    }

    fn get(&self, index: usize) -> Result<FileRow, ModelError> {
        match (self.names.as_slice().get(index), self.sizes.as_slice().get(index)) {
            (Some(name), Some(&size)) => Ok(FileRow {
                name: name.clone(),
                size,
            }),
            _ => Err(ModelError::IndexOutOfBounds {
                index,
                len: self.count(),
            }),
        }
    }

    fn set(&mut self, index: usize, item: FileRow) -> Result<(), ModelError> {
        self.names.set(index, item.name)?;
        self.sizes.set(index, item.size)?;
        self.notifications.push(format!("dataChanged({index})"));
        Ok(())
    }

    fn move_rows(&mut self, from: usize, to: usize, count: usize) -> Result<(), ModelError> {
        self.names.move_rows(from, to, count)?;
        self.sizes.move_rows(from, to, count)?;
        self.notifications
            .push(format!("rowsMoved({from}, {to}, {count})"));
        Ok(())
    }
}

#[test]
fn test_external_model_with_moves() {
    let mut table = MockTableModel::new(&[("c.txt", 30), ("a.txt", 10), ("b.txt", 20)]);

    let stats = sort(&mut table, "size", false, true).unwrap();

    assert_eq!(table.names, vec!["a.txt", "b.txt", "c.txt"]);
    assert_eq!(table.sizes, vec![10, 20, 30]);
    assert_eq!(stats.moves, 1);
    assert_eq!(table.notifications, vec!["rowsMoved(0, 2, 1)"]);
}

#[test]
fn test_external_model_with_swaps() {
    let mut table = MockTableModel::new(&[("c.txt", 30), ("a.txt", 10), ("b.txt", 20)]);

    sort(&mut table, "size", true, false).unwrap();

    assert_eq!(table.names, vec!["c.txt", "b.txt", "a.txt"]);
    assert!(
        table
            .notifications
            .iter()
            .all(|n| n.starts_with("dataChanged"))
    );
}

#[test]
fn test_external_model_by_column_closure() {
    let mut table = MockTableModel::new(&[("b", 1), ("c", 1), ("a", 1)]);

    sort_model_by(
        &mut table,
        Direction::Ascending,
        Strategy::MinimalMove,
        |row| row.name.clone(),
    )
    .unwrap();

    assert_eq!(table.names, vec!["a", "b", "c"]);
    assert_eq!(table.notifications, vec!["rowsMoved(2, 0, 1)"]);
}

#[test]
fn test_unknown_field_is_reported() {
    let mut table = MockTableModel::new(&[("b", 2), ("a", 1)]);
    let err = sort(&mut table, "owner", false, false).unwrap_err();
    assert_eq!(
        err,
        SortError::MissingKey {
            index: 0,
            field: "owner".into()
        }
    );
}

#[test]
fn test_hash_map_records() {
    let make = |v: i64| HashMap::from([("rank".to_string(), v)]);
    let mut model = VecModel::from(vec![make(3), make(-1), make(2)]);

    sort_model(
        &mut model,
        &SortOptions::new("rank").with_strategy(Strategy::MinimalMove),
    )
    .unwrap();

    let ranks: Vec<i64> = model.as_slice().iter().map(|m| m["rank"]).collect();
    assert_eq!(ranks, vec![-1, 2, 3]);
}
