use std::collections::HashMap;

use crate::field::FieldDescriptor;

/// `family:qualifier` pair naming a cell within a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Column {
    pub family: String,
    pub qualifier: String,
}

impl Column {
    pub fn new(family: impl Into<String>, qualifier: impl Into<String>) -> Self {
        Self { family: family.into(), qualifier: qualifier.into() }
    }

    /// Parse the `family:qualifier` form used on the wire and in config.
    /// The qualifier may itself contain `:`.
    pub fn parse(s: &str) -> Option<Self> {
        let (family, qualifier) = s.split_once(':')?;
        if family.is_empty() {
            return None;
        }
        Some(Self::new(family, qualifier))
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.family, self.qualifier)
    }
}

/// Cells of one fetched row, grouped by family. A `RowCells` only exists
/// for rows the store found; a missing row is `None` at the store boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowCells {
    families: HashMap<String, HashMap<String, Vec<u8>>>,
}

impl RowCells {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a cell, replacing any previous value for the column.
    pub fn insert(&mut self, column: Column, value: Vec<u8>) {
        self.families
            .entry(column.family)
            .or_default()
            .insert(column.qualifier, value);
    }

    pub fn get(&self, family: &str, qualifier: &str) -> Option<&[u8]> {
        self.families.get(family)?.get(qualifier).map(Vec::as_slice)
    }

    pub fn field(&self, field: &FieldDescriptor) -> Option<&[u8]> {
        self.get(field.family, field.qualifier)
    }

    /// Number of cells across all families.
    pub fn len(&self) -> usize {
        self.families.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(family, qualifier, value)` for every cell, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[u8])> {
        self.families.iter().flat_map(|(family, cells)| {
            cells
                .iter()
                .map(move |(qualifier, v)| (family.as_str(), qualifier.as_str(), v.as_slice()))
        })
    }
}

impl FromIterator<(Column, Vec<u8>)> for RowCells {
    fn from_iter<I: IntoIterator<Item = (Column, Vec<u8>)>>(iter: I) -> Self {
        let mut cells = Self::new();
        for (column, value) in iter {
            cells.insert(column, value);
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::MAX_MAG;

    #[test]
    fn parse_column() {
        assert_eq!(Column::parse("s:max_mag"), Some(Column::new("s", "max_mag")));
        assert_eq!(Column::parse("s:a:b"), Some(Column::new("s", "a:b")));
        assert_eq!(Column::parse("s:"), Some(Column::new("s", "")));
        assert_eq!(Column::parse(":max_mag"), None);
        assert_eq!(Column::parse("max_mag"), None);
    }

    #[test]
    fn lookup_by_field() {
        let cells: RowCells = [
            (Column::new("s", "max_mag"), b"4.5".to_vec()),
            (Column::new("t", "max_mag"), b"9.9".to_vec()),
        ]
        .into_iter()
        .collect();
        assert_eq!(cells.field(&MAX_MAG), Some(&b"4.5"[..]));
        assert_eq!(cells.get("s", "quake_count"), None);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells.iter().filter(|(f, _, _)| *f == "t").count(), 1);
    }
}
