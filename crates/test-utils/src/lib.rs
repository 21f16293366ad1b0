//! In-memory implementations of both collaborator interfaces, for unit
//! and integration tests.

use rowparity_common::{ColumnDescriptor, Error, Result, SqlValue};
use rowparity_engine::{ColumnarSource, RelationalSource, RowStream};
use serde_json::Value as JsonValue;

/// A relational source backed by owned descriptors and rows. Each
/// `open_cursor` hands out a fresh stream over a copy of the rows, so
/// one instance supports repeated validations.
#[derive(Debug, Clone, Default)]
pub struct MemoryRelational {
    descriptors: Vec<ColumnDescriptor>,
    rows: Vec<Vec<SqlValue>>,
    fail_metadata: bool,
}

impl MemoryRelational {
    pub fn new(descriptors: Vec<ColumnDescriptor>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self {
            descriptors,
            rows,
            fail_metadata: false,
        }
    }

    /// Simulates an unreadable cursor: `open_cursor` fails with a
    /// metadata error.
    pub fn failing_metadata() -> Self {
        Self {
            fail_metadata: true,
            ..Self::default()
        }
    }
}

impl RelationalSource for MemoryRelational {
    type Rows = MemoryRows;

    fn open_cursor(
        &mut self,
        schema: &str,
        table: &str,
    ) -> Result<(Vec<ColumnDescriptor>, MemoryRows)> {
        if self.fail_metadata {
            return Err(Error::metadata(format!(
                "cannot read metadata for {}.{}",
                schema, table
            )));
        }
        Ok((
            self.descriptors.clone(),
            MemoryRows {
                rows: self.rows.clone().into_iter(),
            },
        ))
    }
}

#[derive(Debug)]
pub struct MemoryRows {
    rows: std::vec::IntoIter<Vec<SqlValue>>,
}

impl RowStream for MemoryRows {
    fn next_row(&mut self) -> Result<Option<Vec<SqlValue>>> {
        Ok(self.rows.next())
    }
}

/// A columnar source serving canned JSON documents, one per row, and
/// recording the projection it was asked to run.
#[derive(Debug, Clone, Default)]
pub struct MemoryColumnar {
    rows: Vec<String>,
    unavailable: bool,
    pub queries: Vec<String>,
}

impl MemoryColumnar {
    pub fn new(rows: Vec<String>) -> Self {
        Self {
            rows,
            unavailable: false,
            queries: Vec::new(),
        }
    }

    /// Builds records from JSON values (objects), serialized in place.
    pub fn from_values(rows: Vec<JsonValue>) -> Self {
        Self::new(rows.into_iter().map(|v| v.to_string()).collect())
    }

    /// Simulates an unreachable analytical store.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }
}

impl ColumnarSource for MemoryColumnar {
    fn query(&mut self, projection_sql: &str) -> Result<Vec<String>> {
        self.queries.push(projection_sql.to_string());
        if self.unavailable {
            return Err(Error::source_unavailable("analytical store unreachable"));
        }
        Ok(self.rows.clone())
    }
}

/// Shorthand for a descriptor with a 1-based ordinal.
pub fn descriptor(
    ordinal: u32,
    name: &str,
    type_code: i32,
    type_name: &str,
) -> ColumnDescriptor {
    ColumnDescriptor::new(ordinal, name, type_code, type_name)
}

pub fn decimal(text: &str) -> SqlValue {
    SqlValue::Decimal(text.parse().expect("valid decimal literal"))
}

pub fn date(year: i32, month: u32, day: u32) -> SqlValue {
    SqlValue::Date(chrono::NaiveDate::from_ymd_opt(year, month, day).expect("valid date"))
}

pub fn time(hour: u32, min: u32, sec: u32) -> SqlValue {
    SqlValue::Time(chrono::NaiveTime::from_hms_opt(hour, min, sec).expect("valid time"))
}

pub fn timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> SqlValue {
    SqlValue::Timestamp(
        chrono::NaiveDate::from_ymd_opt(year, month, day)
            .expect("valid date")
            .and_hms_opt(hour, min, sec)
            .expect("valid time"),
    )
}
