//! Per-dialect type dispatch. One engine, parameterized by a profile:
//! the profile maps a column's SQL type code to exactly one comparison
//! rule, with vendor type codes carried as small per-dialect tables.

use serde::{Deserialize, Serialize};

/// Standard and vendor SQL type codes as reported by relational
/// drivers.
pub mod type_codes {
    pub const BIT: i32 = -7;
    pub const TINYINT: i32 = -6;
    pub const BIGINT: i32 = -5;
    pub const LONGVARBINARY: i32 = -4;
    pub const VARBINARY: i32 = -3;
    pub const BINARY: i32 = -2;
    pub const LONGVARCHAR: i32 = -1;
    pub const CHAR: i32 = 1;
    pub const NUMERIC: i32 = 2;
    pub const DECIMAL: i32 = 3;
    pub const INTEGER: i32 = 4;
    pub const SMALLINT: i32 = 5;
    pub const FLOAT: i32 = 6;
    pub const REAL: i32 = 7;
    pub const DOUBLE: i32 = 8;
    pub const VARCHAR: i32 = 12;
    pub const BOOLEAN: i32 = 16;
    pub const DATE: i32 = 91;
    pub const TIME: i32 = 92;
    pub const TIMESTAMP: i32 = 93;
    pub const BLOB: i32 = 2004;
    pub const CLOB: i32 = 2005;
    pub const NCHAR: i32 = -15;
    pub const NVARCHAR: i32 = -9;
    pub const LONGNVARCHAR: i32 = -16;

    // SQL Server spatial types.
    pub const MSSQL_GEOMETRY: i32 = -157;
    pub const MSSQL_GEOGRAPHY: i32 = -158;

    // Oracle extensions.
    pub const ORACLE_BFILE: i32 = -13;
    pub const ORACLE_BINARY_FLOAT: i32 = 100;
    pub const ORACLE_BINARY_DOUBLE: i32 = 101;
}

/// The closed set of comparison rules. Every column resolves to exactly
/// one of these; `Text` is the fallback for unrecognized types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareRule {
    /// Raw bytes vs base64 text, exact string equality.
    Binary,
    /// Arbitrary-precision decimal equality, no rounding, no epsilon.
    Decimal,
    /// Integer equality via canonical decimal-string form.
    Integral,
    /// Bit-for-bit IEEE equality, not approximate.
    Float,
    Boolean,
    Date,
    /// Fixed textual pattern `%Y-%m-%dT%H:%M:%SZ` on the target side.
    Timestamp,
    /// Fixed textual pattern `%H:%M:%S` on the target side.
    Time,
    /// Policy exclusion: never compared, counted neither way.
    Skip,
    /// Literal display-string equality, formatting preserved.
    Text,
}

/// Maps a dialect's type codes to comparison rules. `overrides` is
/// consulted before the common table, so a dialect can repurpose a
/// standard code (SQL Server's TIMESTAMP is a rowversion, not a point
/// in time).
#[derive(Debug, Clone, Copy)]
pub struct DialectProfile {
    name: &'static str,
    overrides: &'static [(i32, CompareRule)],
}

pub static GENERIC: DialectProfile = DialectProfile {
    name: "generic",
    overrides: &[],
};

pub static MYSQL: DialectProfile = DialectProfile {
    name: "mysql",
    overrides: &[],
};

pub static SQL_SERVER: DialectProfile = DialectProfile {
    name: "sqlserver",
    overrides: &[
        (type_codes::MSSQL_GEOMETRY, CompareRule::Binary),
        (type_codes::MSSQL_GEOGRAPHY, CompareRule::Binary),
        // Rowversion column, not replicated by the target store.
        (type_codes::TIMESTAMP, CompareRule::Skip),
    ],
};

pub static ORACLE: DialectProfile = DialectProfile {
    name: "oracle",
    overrides: &[
        // Remote file locator, not replicated by the target store.
        (type_codes::ORACLE_BFILE, CompareRule::Skip),
        (type_codes::ORACLE_BINARY_FLOAT, CompareRule::Float),
        (type_codes::ORACLE_BINARY_DOUBLE, CompareRule::Float),
    ],
};

impl DialectProfile {
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Resolves one column type to one rule. Total: anything neither
    /// the dialect table nor the common table recognizes falls back to
    /// literal text comparison.
    pub fn rule_for(&self, type_code: i32) -> CompareRule {
        if let Some((_, rule)) = self.overrides.iter().find(|(code, _)| *code == type_code) {
            return *rule;
        }
        common_rule(type_code)
    }
}

fn common_rule(type_code: i32) -> CompareRule {
    use type_codes as t;
    match type_code {
        t::BIT | t::BOOLEAN => CompareRule::Boolean,
        t::DECIMAL | t::NUMERIC => CompareRule::Decimal,
        t::TINYINT | t::SMALLINT | t::INTEGER | t::BIGINT => CompareRule::Integral,
        t::REAL | t::FLOAT | t::DOUBLE => CompareRule::Float,
        t::DATE => CompareRule::Date,
        t::TIME => CompareRule::Time,
        t::TIMESTAMP => CompareRule::Timestamp,
        t::BINARY | t::VARBINARY | t::LONGVARBINARY | t::BLOB => CompareRule::Binary,
        _ => CompareRule::Text,
    }
}
