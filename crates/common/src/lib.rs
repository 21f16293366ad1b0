//! Common types and errors shared across the Rowparity workspace.

pub mod error;
pub mod report;
pub mod types;

pub use error::{Error, Result};
pub use report::{MatchResult, StructuralFailure, ValidationReport};
pub use types::{ColumnDescriptor, KeyedRecord, SqlValue};
