//! Columnar record loader: runs the flattening projection and
//! materializes every result row into a keyed record.

use log::debug;
use rowparity_common::{Error, KeyedRecord, Result};

use crate::source::ColumnarSource;

/// Projection that flattens every row of `table_ref` into one JSON
/// object per result row.
pub fn projection_query(table_ref: &str) -> String {
    format!("SELECT TO_JSON(t) FROM {} AS t", table_ref)
}

/// Executes the flattening query and parses each returned row into a
/// [`KeyedRecord`], preserving server order. Zero rows is a valid empty
/// sequence, not an error; a row that is not a JSON object is a
/// metadata failure (malformed projection).
pub fn load_keyed_records<C: ColumnarSource>(
    source: &mut C,
    table_ref: &str,
) -> Result<Vec<KeyedRecord>> {
    let rows = source.query(&projection_query(table_ref))?;
    let mut records = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let record: KeyedRecord = serde_json::from_str(row)
            .map_err(|e| Error::metadata(format!("result row {} is not a JSON object: {}", idx, e)))?;
        records.push(record);
    }
    debug!("loaded {} keyed records from {}", records.len(), table_ref);
    Ok(records)
}
