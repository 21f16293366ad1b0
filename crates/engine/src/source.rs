//! Collaborator interfaces. The engine owns no I/O: connection
//! management, retries and timeouts all live behind these seams.

use rowparity_common::{ColumnDescriptor, Result, SqlValue};

/// A row-oriented store that can open a read-only cursor over a table.
pub trait RelationalSource {
    type Rows: RowStream;

    /// Opens a cursor over `schema.table` and reads its column metadata
    /// exactly once, before any row is consumed. Metadata read failures
    /// surface as [`rowparity_common::Error::Metadata`].
    fn open_cursor(&mut self, schema: &str, table: &str)
    -> Result<(Vec<ColumnDescriptor>, Self::Rows)>;
}

/// Sequential, forward-only row fetch. `Ok(None)` means the stream is
/// exhausted; a well-behaved stream keeps returning `None` afterwards.
pub trait RowStream {
    fn next_row(&mut self) -> Result<Option<Vec<SqlValue>>>;
}

/// An analytical store that executes a flattening projection and
/// returns one self-describing JSON document per result row, in server
/// order. There is no stable server-side cursor on this side, so the
/// whole result is drained at once.
pub trait ColumnarSource {
    fn query(&mut self, projection_sql: &str) -> Result<Vec<String>>;
}
