use crate::decode;
use crate::error::StoreError;
use crate::field::FIELDS;
use crate::query::LookupQuery;
use crate::record::{LookupOutcome, assemble};
use crate::storage::RowStore;

/// Fetch the row for `query` and decode it.
///
/// Errors only come from the store. Unreadable cells are logged at debug
/// level and decode to zero.
pub async fn lookup(store: &dyn RowStore, query: &LookupQuery) -> Result<LookupOutcome, StoreError> {
    let row_key = query.row_key();
    tracing::debug!(row_key = %row_key, "looking up row");

    let row = store
        .get(&row_key)
        .await
        .map_err(|e| e.with_context(format!("get '{row_key}'")))?;

    match &row {
        None => tracing::debug!(row_key = %row_key, "row not found"),
        Some(cells) => {
            for field in FIELDS.iter().filter(|f| decode::is_degraded(f.kind, cells.field(f))) {
                tracing::debug!(
                    row_key = %row_key,
                    column = %field,
                    kind = %field.kind,
                    "cell not decodable, using zero"
                );
            }
        }
    }

    Ok(assemble(query, row.as_ref()))
}
