use indexmap::IndexMap;

use crate::types::Value;

/// A source row: column name to value, in the source's column order.
///
/// The table migrator derives the insert column list from the first row of a
/// table and reuses it for every row, so all rows of one table are expected
/// to carry the same columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowRecord {
    columns: IndexMap<String, Value>,
}

impl RowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for fixtures.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn get_mut(&mut self, column: &str) -> Option<&mut Value> {
        self.columns.get_mut(column)
    }

    /// Column names in source order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.keys().cloned().collect()
    }

    /// Values for `columns`, in that order. Missing columns yield `Value::Null`.
    pub fn values_for<'a>(&'a self, columns: &'a [String]) -> impl Iterator<Item = &'a Value> {
        const NULL: &Value = &Value::Null;
        columns
            .iter()
            .map(move |column| self.columns.get(column).unwrap_or(NULL))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, Value)> for RowRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}
