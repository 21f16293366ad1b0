//! Alignment and driving loop: walks the relational cursor in lockstep
//! with the materialized columnar sequence and aggregates the outcome.

use log::{debug, warn};

use rowparity_common::{Result, StructuralFailure, ValidationReport};

use crate::dialect::{CompareRule, DialectProfile};
use crate::loader::load_keyed_records;
use crate::rules;
use crate::source::{ColumnarSource, RelationalSource, RowStream};

/// Validates that `schema.source_table` on the relational side and
/// `target_table` on the columnar side hold identical data.
///
/// Rows are matched positionally: the Nth cursor row against the Nth
/// keyed record. Both collaborators must therefore present rows in a
/// deterministic, matching order; the engine does not sort.
///
/// Value mismatches are collected and the walk continues; structural
/// drift (column count, missing target key, row-count disparity) stops
/// the walk where it is found. Collaborator I/O failures are the only
/// `Err` outcomes; a `Failed` verdict is an `Ok` report.
///
/// All state is local to the call: concurrent validations over
/// independent collaborator instances do not interact.
pub fn validate<R, C>(
    relational: &mut R,
    columnar: &mut C,
    profile: &DialectProfile,
    schema: &str,
    source_table: &str,
    target_table: &str,
) -> Result<ValidationReport>
where
    R: RelationalSource,
    C: ColumnarSource,
{
    // Initializing: materialize the columnar side, open the cursor,
    // check column parity before touching any row.
    let records = load_keyed_records(columnar, target_table)?;
    let (descriptors, mut rows) = relational.open_cursor(schema, source_table)?;

    let mut report = ValidationReport::new();
    report.target_rows = records.len();

    if let Some(first) = records.first()
        && descriptors.len() != first.len()
    {
        let failure = StructuralFailure::ColumnCount {
            source: descriptors.len(),
            target: first.len(),
        };
        warn!("{}.{} vs {}: {}", schema, source_table, target_table, failure);
        report.fail_structural(failure);
        return Ok(report);
    }

    // Iterating: one cursor row at a time, all columns in ordinal
    // order, columnar index advancing in lockstep.
    let mut row_idx = 0usize;
    while let Some(row) = rows.next_row()? {
        if row_idx >= records.len() {
            let failure = StructuralFailure::RowCount {
                source: row_idx + 1,
                target: records.len(),
            };
            warn!("{}.{}: source row beyond target length: {}", schema, source_table, failure);
            report.source_rows = row_idx + 1;
            report.fail_structural(failure);
            return Ok(report);
        }
        let record = &records[row_idx];

        for descriptor in &descriptors {
            let rule = profile.rule_for(descriptor.type_code);
            if rule == CompareRule::Skip {
                report.record_skip();
                continue;
            }
            // Ordinals are 1-based; a 0 ordinal means broken metadata,
            // not a missing value.
            let Some(source_value) = descriptor
                .ordinal
                .checked_sub(1)
                .and_then(|slot| row.get(slot as usize))
            else {
                return Err(rowparity_common::Error::metadata(format!(
                    "row {}: cursor returned no value for ordinal {} ({})",
                    row_idx, descriptor.ordinal, descriptor.name
                )));
            };
            let Some(target_value) = record.get(&descriptor.name) else {
                let failure = StructuralFailure::MissingTargetKey {
                    row: row_idx,
                    column: descriptor.name.clone(),
                };
                warn!("{} vs {}: {}", source_table, target_table, failure);
                report.rows_compared = row_idx;
                report.source_rows = row_idx + 1;
                report.fail_structural(failure);
                return Ok(report);
            };
            report.record(rules::compare(rule, descriptor, source_value, target_value));
        }
        row_idx += 1;
    }

    // Finalizing: the cursor is exhausted; leftover keyed records mean
    // the target has rows the source never produced.
    report.rows_compared = row_idx;
    report.source_rows = row_idx;
    if row_idx < records.len() {
        let failure = StructuralFailure::RowCount {
            source: row_idx,
            target: records.len(),
        };
        warn!("{}.{}: {}", schema, source_table, failure);
        report.fail_structural(failure);
        return Ok(report);
    }

    debug!(
        "{}.{} vs {} ({}): {}",
        schema,
        source_table,
        target_table,
        profile.name(),
        report.summary()
    );
    Ok(report)
}
