//! Row types produced by the sheet reader

use ahash::AHashMap;
use std::rc::Rc;

/// Ordered set of row keys with name lookup
///
/// Shared by every row read from one sheet, so keys are stored once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowKeys {
    names: Vec<String>,
    positions: AHashMap<String, usize>,
}

impl RowKeys {
    /// Build from names in column order; on duplicates the first occurrence
    /// wins lookups
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut positions = AHashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            positions.entry(name.clone()).or_insert(i);
        }
        Self { names, positions }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// One row of raw cell text keyed by header name (or column letter)
///
/// Iteration order is column order. A key may be absent (the row ended before
/// that column) or present with a null value (the cell had no text).
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    keys: Rc<RowKeys>,
    values: Vec<Option<String>>,
}

impl RawRow {
    /// Create a row over shared keys
    ///
    /// `values` may be shorter than `keys`; keys past its end are absent.
    /// Extra values beyond the keys are dropped.
    pub fn new(keys: Rc<RowKeys>, mut values: Vec<Option<String>>) -> Self {
        values.truncate(keys.len());
        Self { keys, values }
    }

    /// Number of keys present in this row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.position(key).map_or(false, |i| i < self.values.len())
    }

    /// Look up a key: `None` if absent, `Some(None)` if present but null
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        let i = self.keys.position(key)?;
        self.values.get(i).map(|v| v.as_deref())
    }

    /// Cell text by key, flattening absent and null
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).flatten()
    }

    /// Keys present in this row, in column order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().take(self.values.len())
    }

    /// `(key, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.keys
            .iter()
            .zip(self.values.iter().map(|v| v.as_deref()))
    }

    /// Take the values, dropping the keys
    pub fn into_values(self) -> Vec<Option<String>> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keys() -> Rc<RowKeys> {
        Rc::new(RowKeys::new(["Id", "Name", "Score"]))
    }

    #[test]
    fn test_lookup() {
        let row = RawRow::new(
            keys(),
            vec![Some("1".into()), None, Some("9.5".into())],
        );

        assert_eq!(row.get("Id"), Some(Some("1")));
        assert_eq!(row.get("Name"), Some(None));
        assert_eq!(row.get("Missing"), None);
        assert_eq!(row.text("Score"), Some("9.5"));
        assert_eq!(row.text("Name"), None);
    }

    #[test]
    fn test_short_row_has_absent_trailing_keys() {
        let row = RawRow::new(keys(), vec![Some("1".into())]);

        assert_eq!(row.len(), 1);
        assert!(row.contains_key("Id"));
        assert!(!row.contains_key("Name"));
        assert_eq!(row.get("Score"), None);
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["Id"]);
    }

    #[test]
    fn test_iteration_order() {
        let row = RawRow::new(
            keys(),
            vec![Some("1".into()), Some("Ann".into()), None, Some("extra".into())],
        );

        assert_eq!(
            row.iter().collect::<Vec<_>>(),
            vec![("Id", Some("1")), ("Name", Some("Ann")), ("Score", None)]
        );
    }

    #[test]
    fn test_duplicate_keys_first_wins() {
        let keys = Rc::new(RowKeys::new(["A", "A"]));
        let row = RawRow::new(keys, vec![Some("first".into()), Some("second".into())]);
        assert_eq!(row.text("A"), Some("first"));
        assert_eq!(row.len(), 2);
    }
}
