use serde::{Deserialize, Serialize};

/// Outcome of comparing one column of one row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub column_name: String,
    pub column_type_name: String,
    pub matched: bool,
    pub reason: String,
    /// True when the target value could not be parsed under the fixed
    /// pattern for its type family, as opposed to a plain value
    /// difference.
    pub parse_failure: bool,
}

impl MatchResult {
    pub fn matched(column_name: impl Into<String>, column_type_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            column_type_name: column_type_name.into(),
            matched: true,
            reason: String::new(),
            parse_failure: false,
        }
    }

    pub fn mismatch(
        column_name: impl Into<String>,
        column_type_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            column_type_name: column_type_name.into(),
            matched: false,
            reason: reason.into(),
            parse_failure: false,
        }
    }

    pub fn parse_failure(
        column_name: impl Into<String>,
        column_type_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            column_type_name: column_type_name.into(),
            matched: false,
            reason: reason.into(),
            parse_failure: true,
        }
    }
}

/// Structural drift between the two stores. Any structural failure
/// aborts the remaining comparison immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StructuralFailure {
    /// Relational descriptor count differs from the key count of the
    /// first keyed record.
    ColumnCount { source: usize, target: usize },
    /// A relational column has no key in the target record: schema
    /// drift, not a data mismatch.
    MissingTargetKey { row: usize, column: String },
    /// One side ran out of rows before the other.
    RowCount { source: usize, target: usize },
}

impl std::fmt::Display for StructuralFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructuralFailure::ColumnCount { source, target } => write!(
                f,
                "Number of columns in source and target are not equal: {} vs {}",
                source, target
            ),
            StructuralFailure::MissingTargetKey { row, column } => {
                write!(f, "Row {}: column {} is absent in target record", row, column)
            }
            StructuralFailure::RowCount { source, target } => write!(
                f,
                "Number of rows in source and target are not equal: {} vs {}",
                source, target
            ),
        }
    }
}

/// Aggregate result of one validation call. Every value mismatch is
/// collected; a structural failure, when present, stopped the walk at
/// the point it was found.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub mismatches: Vec<MatchResult>,
    pub structural: Option<StructuralFailure>,
    pub rows_compared: usize,
    pub columns_compared: usize,
    pub columns_skipped: usize,
    pub source_rows: usize,
    pub target_rows: usize,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overall verdict: no structural drift and no value mismatches.
    pub fn passed(&self) -> bool {
        self.structural.is_none() && self.mismatches.is_empty()
    }

    pub fn mismatch_count(&self) -> usize {
        self.mismatches.len()
    }

    pub fn record(&mut self, result: MatchResult) {
        if result.matched {
            self.columns_compared += 1;
        } else {
            self.columns_compared += 1;
            self.mismatches.push(result);
        }
    }

    pub fn record_skip(&mut self) {
        self.columns_skipped += 1;
    }

    pub fn fail_structural(&mut self, failure: StructuralFailure) {
        self.structural = Some(failure);
    }

    /// One-line human summary for logs and assertion messages.
    pub fn summary(&self) -> String {
        if let Some(structural) = &self.structural {
            return format!("Failed (structural): {}", structural);
        }
        if self.mismatches.is_empty() {
            format!(
                "Passed: {} rows, {} columns compared, {} skipped",
                self.rows_compared, self.columns_compared, self.columns_skipped
            )
        } else {
            let first = &self.mismatches[0];
            format!(
                "Failed: {} mismatched values across {} rows (first: column {} - {})",
                self.mismatches.len(),
                self.rows_compared,
                first.column_name,
                first.reason
            )
        }
    }
}
