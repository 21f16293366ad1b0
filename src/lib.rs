//! Rowparity - cross-store record validation.
//!
//! Proves that a relational table and a columnar JSON-projected extract
//! of it contain semantically identical data, column by column, despite
//! the two stores using incompatible type systems and encodings.

pub use rowparity_common::error::{Error, Result};
pub use rowparity_common::report::{MatchResult, StructuralFailure, ValidationReport};
pub use rowparity_common::types::{ColumnDescriptor, KeyedRecord, SqlValue};
pub use rowparity_engine::dialect::{CompareRule, DialectProfile, GENERIC, MYSQL, ORACLE, SQL_SERVER};
pub use rowparity_engine::validator::validate;

pub mod dialect {
    pub use rowparity_engine::dialect::type_codes;
}

pub mod source {
    pub use rowparity_engine::source::{ColumnarSource, RelationalSource, RowStream};
}

pub mod loader {
    pub use rowparity_engine::loader::{load_keyed_records, projection_query};
}
