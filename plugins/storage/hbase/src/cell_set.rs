use serde::Deserialize;

use quake_api::{RowCells, StoreError};

use crate::{b64, column_from_b64};

#[derive(Deserialize)]
struct CellSet {
    #[serde(rename = "Row", default)]
    rows: Vec<CellSetRow>,
}

#[derive(Deserialize)]
struct CellSetRow {
    key: String,
    #[serde(rename = "Cell", default)]
    cells: Vec<CellSetCell>,
}

#[derive(Deserialize)]
struct CellSetCell {
    column: String,
    #[serde(rename = "$", default)]
    value: String,
}

/// Parse a single-row CellSet body.
///
/// No rows, or a row with no cells, means the row does not exist. When the
/// gateway returns several versions of a column the first (newest) wins.
pub fn parse_cell_set(body: &str) -> Result<Option<RowCells>, StoreError> {
    let set: CellSet = serde_json::from_str(body)
        .map_err(|e| StoreError::format_err(format!("CellSet: {e}")))?;

    let mut cells = RowCells::new();
    for row in &set.rows {
        // Validate the key even though we only asked for one row.
        b64("row key", &row.key)?;
        for cell in &row.cells {
            let column = column_from_b64(&cell.column)?;
            if cells.get(&column.family, &column.qualifier).is_none() {
                cells.insert(column, b64("value", &cell.value)?);
            }
        }
    }

    Ok((!cells.is_empty()).then_some(cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quake_api::ErrorKind;

    #[test]
    fn decodes_cells() {
        // key "CA#2020#03", s:quake_count = 8-byte 5, s:max_mag = "4.1"
        let body = r#"{"Row":[{"key":"Q0EjMjAyMCMwMw==","Cell":[
            {"column":"czpxdWFrZV9jb3VudA==","timestamp":1700000000000,"$":"AAAAAAAAAAU="},
            {"column":"czptYXhfbWFn","timestamp":1700000000000,"$":"NC4x"}
        ]}]}"#;
        let cells = parse_cell_set(body).unwrap().unwrap();
        assert_eq!(cells.get("s", "quake_count"), Some(&5i64.to_be_bytes()[..]));
        assert_eq!(cells.get("s", "max_mag"), Some(&b"4.1"[..]));
        assert_eq!(cells.len(), 2);
    }

    #[test]
    fn newest_version_wins() {
        let body = r#"{"Row":[{"key":"Sw==","Cell":[
            {"column":"czptYXhfbWFn","timestamp":2,"$":"NS4w"},
            {"column":"czptYXhfbWFn","timestamp":1,"$":"NC4x"}
        ]}]}"#;
        let cells = parse_cell_set(body).unwrap().unwrap();
        assert_eq!(cells.get("s", "max_mag"), Some(&b"5.0"[..]));
    }

    #[test]
    fn empty_sets_are_missing_rows() {
        assert_eq!(parse_cell_set(r#"{}"#).unwrap(), None);
        assert_eq!(parse_cell_set(r#"{"Row":[]}"#).unwrap(), None);
        assert_eq!(parse_cell_set(r#"{"Row":[{"key":"Sw==","Cell":[]}]}"#).unwrap(), None);
    }

    #[test]
    fn empty_value_is_an_empty_cell() {
        let body = r#"{"Row":[{"key":"Sw==","Cell":[{"column":"czptYXhfbWFn","$":""}]}]}"#;
        let cells = parse_cell_set(body).unwrap().unwrap();
        assert_eq!(cells.get("s", "max_mag"), Some(&b""[..]));
    }

    #[test]
    fn malformed_bodies_are_format_errors() {
        for body in [
            "not json",
            r#"{"Row":[{"key":"***","Cell":[]}]}"#,
            r#"{"Row":[{"key":"Sw==","Cell":[{"column":"bm9jb2xvbg==","$":""}]}]}"#,
            r#"{"Row":[{"key":"Sw==","Cell":[{"column":"czptYXhfbWFn","$":"@@"}]}]}"#,
        ] {
            assert_eq!(parse_cell_set(body).unwrap_err().kind(), ErrorKind::Format, "{body}");
        }
    }
}
