//! Validation engine: proves a relational table and its columnar JSON
//! extract hold semantically identical data, column by column.

pub mod dialect;
pub mod loader;
pub mod rules;
pub mod source;
pub mod validator;

pub use dialect::{CompareRule, DialectProfile, type_codes};
pub use loader::{load_keyed_records, projection_query};
pub use source::{ColumnarSource, RelationalSource, RowStream};
pub use validator::validate;
