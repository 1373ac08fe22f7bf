use constprop_ir::{ColumnKey, Expr};
use rustc_hash::FxHashMap;

/// Dense numbering of the distinct columns seen by one propagation call.
#[derive(Debug, Default)]
pub(crate) struct ColumnIndex {
    ids: FxHashMap<ColumnKey, usize>,
    columns: Vec<Expr>,
}

impl ColumnIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Assigns the next id to `column` unless it already has one. Non-column
    /// expressions are ignored.
    pub(crate) fn insert(&mut self, column: &Expr) {
        let Some(key) = column.column_key() else {
            return;
        };
        if !self.ids.contains_key(&key) {
            self.ids.insert(key, self.columns.len());
            self.columns.push(column.clone());
        }
    }

    pub(crate) fn id(&self, column: &Expr) -> Option<usize> {
        column
            .column_key()
            .and_then(|key| self.ids.get(&key).copied())
    }

    pub(crate) fn column(&self, id: usize) -> &Expr {
        &self.columns[id]
    }

    pub(crate) fn len(&self) -> usize {
        self.columns.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
