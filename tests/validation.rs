//! End-to-end validation scenarios through the public API, using the
//! in-memory collaborators.

use rowparity::dialect::type_codes;
use rowparity::{Error, GENERIC, MYSQL, ORACLE, SQL_SERVER, SqlValue, StructuralFailure, validate};
use rowparity_test_utils::{
    MemoryColumnar, MemoryRelational, date, decimal, descriptor, time, timestamp,
};
use serde_json::json;

fn ann_source() -> MemoryRelational {
    MemoryRelational::new(
        vec![
            descriptor(1, "id", type_codes::INTEGER, "INT"),
            descriptor(2, "name", type_codes::VARCHAR, "VARCHAR"),
            descriptor(3, "amt", type_codes::DECIMAL, "DECIMAL"),
        ],
        vec![vec![
            SqlValue::Int(1),
            SqlValue::Text("Ann".into()),
            decimal("10.50"),
        ]],
    )
}

#[test]
fn identical_rows_pass() {
    let mut rel = ann_source();
    let mut col =
        MemoryColumnar::from_values(vec![json!({"id": 1, "name": "Ann", "amt": "10.50"})]);
    let report = validate(&mut rel, &mut col, &GENERIC, "hr", "people", "people_bq").unwrap();
    assert!(report.passed(), "{}", report.summary());
    assert_eq!(report.rows_compared, 1);
    assert_eq!(report.columns_compared, 3);
}

#[test]
fn trailing_zero_difference_is_immaterial_for_decimal() {
    // "10.5" vs stored 10.50: the decimal rule compares values, not
    // strings, which is what separates it from the text fallback.
    let mut rel = ann_source();
    let mut col = MemoryColumnar::from_values(vec![json!({"id": 1, "name": "Ann", "amt": "10.5"})]);
    let report = validate(&mut rel, &mut col, &GENERIC, "hr", "people", "people_bq").unwrap();
    assert!(report.passed(), "{}", report.summary());
}

#[test]
fn single_differing_column_fails_naming_it() {
    let mut rel = ann_source();
    let mut col =
        MemoryColumnar::from_values(vec![json!({"id": 1, "name": "Bob", "amt": "10.50"})]);
    let report = validate(&mut rel, &mut col, &GENERIC, "hr", "people", "people_bq").unwrap();
    assert!(!report.passed());
    assert_eq!(report.mismatch_count(), 1);
    assert_eq!(report.mismatches[0].column_name, "name");
    assert!(report.mismatches[0].reason.contains("Ann"));
    assert!(report.mismatches[0].reason.contains("Bob"));
}

#[test]
fn row_count_disparity_is_structural_in_both_directions() {
    let mut rel = ann_source();
    let mut col = MemoryColumnar::from_values(vec![
        json!({"id": 1, "name": "Ann", "amt": "10.50"}),
        json!({"id": 2, "name": "Bob", "amt": "3.00"}),
    ]);
    let report = validate(&mut rel, &mut col, &GENERIC, "hr", "people", "people_bq").unwrap();
    assert!(matches!(
        report.structural,
        Some(StructuralFailure::RowCount { source: 1, target: 2 })
    ));

    let mut rel = ann_source();
    let mut col = MemoryColumnar::from_values(vec![]);
    let report = validate(&mut rel, &mut col, &GENERIC, "hr", "people", "people_bq").unwrap();
    assert!(matches!(
        report.structural,
        Some(StructuralFailure::RowCount { source: 1, target: 0 })
    ));
}

#[test]
fn full_type_spread_passes() {
    let mut rel = MemoryRelational::new(
        vec![
            descriptor(1, "flag", type_codes::BIT, "BIT"),
            descriptor(2, "big", type_codes::BIGINT, "BIGINT"),
            descriptor(3, "ratio", type_codes::DOUBLE, "DOUBLE"),
            descriptor(4, "born", type_codes::DATE, "DATE"),
            descriptor(5, "at", type_codes::TIME, "TIME"),
            descriptor(6, "seen", type_codes::TIMESTAMP, "TIMESTAMP"),
            descriptor(7, "payload", type_codes::BLOB, "BLOB"),
            descriptor(8, "code", type_codes::CHAR, "CHAR"),
        ],
        vec![vec![
            SqlValue::Bool(true),
            SqlValue::Int(9_007_199_254_740_993),
            SqlValue::Float(2.5),
            date(2023, 5, 1),
            time(10, 15, 30),
            timestamp(2023, 5, 1, 10, 15, 30),
            SqlValue::Bytes(vec![0xde, 0xad]),
            SqlValue::Text("007".into()),
        ]],
    );
    let mut col = MemoryColumnar::from_values(vec![json!({
        "flag": true,
        "big": 9_007_199_254_740_993i64,
        "ratio": 2.5,
        "born": "2023-05-01",
        "at": "10:15:30",
        "seen": "2023-05-01T10:15:30Z",
        "payload": "3q0=",
        "code": "007",
    })]);
    let report = validate(&mut rel, &mut col, &MYSQL, "db", "spread", "spread_bq").unwrap();
    assert!(report.passed(), "{}", report.summary());
    assert_eq!(report.columns_compared, 8);
}

#[test]
fn malformed_timestamp_text_is_a_flagged_failure_not_a_skip() {
    let mut rel = MemoryRelational::new(
        vec![descriptor(1, "seen", type_codes::TIMESTAMP, "TIMESTAMP")],
        vec![vec![timestamp(2023, 5, 1, 10, 15, 30)]],
    );
    let mut col = MemoryColumnar::from_values(vec![json!({"seen": "01/05/2023 10:15:30"})]);
    let report = validate(&mut rel, &mut col, &GENERIC, "db", "t", "t_bq").unwrap();
    assert!(!report.passed());
    assert_eq!(report.mismatch_count(), 1);
    assert!(report.mismatches[0].parse_failure);
}

#[test]
fn oracle_bfile_and_mssql_rowversion_are_policy_skipped() {
    let mut rel = MemoryRelational::new(
        vec![
            descriptor(1, "id", type_codes::NUMERIC, "NUMBER"),
            descriptor(2, "doc", type_codes::ORACLE_BFILE, "BFILE"),
        ],
        vec![vec![SqlValue::Int(1), SqlValue::Text("locator".into())]],
    );
    let mut col = MemoryColumnar::from_values(vec![json!({"id": 1, "doc": null})]);
    let report = validate(&mut rel, &mut col, &ORACLE, "scott", "docs", "docs_bq").unwrap();
    assert!(report.passed(), "{}", report.summary());
    assert_eq!(report.columns_skipped, 1);

    let mut rel = MemoryRelational::new(
        vec![
            descriptor(1, "id", type_codes::INTEGER, "int"),
            descriptor(2, "rv", type_codes::TIMESTAMP, "timestamp"),
        ],
        vec![vec![SqlValue::Int(1), SqlValue::Bytes(vec![7, 7])]],
    );
    let mut col = MemoryColumnar::from_values(vec![json!({"id": 1, "rv": "AAAB"})]);
    let report = validate(&mut rel, &mut col, &SQL_SERVER, "dbo", "t", "t_bq").unwrap();
    assert!(report.passed(), "{}", report.summary());
    assert_eq!(report.columns_skipped, 1);
}

#[test]
fn null_matches_null_and_nothing_else() {
    let mut rel = MemoryRelational::new(
        vec![
            descriptor(1, "a", type_codes::INTEGER, "INT"),
            descriptor(2, "b", type_codes::VARCHAR, "VARCHAR"),
        ],
        vec![vec![SqlValue::Null, SqlValue::Null]],
    );
    let mut col = MemoryColumnar::from_values(vec![json!({"a": null, "b": "x"})]);
    let report = validate(&mut rel, &mut col, &GENERIC, "db", "t", "t_bq").unwrap();
    assert!(!report.passed());
    assert_eq!(report.mismatch_count(), 1);
    assert_eq!(report.mismatches[0].column_name, "b");
}

#[test]
fn metadata_failure_propagates() {
    let mut rel = MemoryRelational::failing_metadata();
    let mut col = MemoryColumnar::from_values(vec![]);
    let err = validate(&mut rel, &mut col, &GENERIC, "db", "t", "t_bq").unwrap_err();
    assert!(matches!(err, Error::Metadata(_)));
}

#[test]
fn unavailable_columnar_store_propagates() {
    let mut rel = ann_source();
    let mut col = MemoryColumnar::unavailable();
    let err = validate(&mut rel, &mut col, &GENERIC, "db", "t", "t_bq").unwrap_err();
    assert!(matches!(err, Error::SourceUnavailable(_)));
}

#[test]
fn loader_is_asked_for_the_flattening_projection() {
    let mut rel = ann_source();
    let mut col =
        MemoryColumnar::from_values(vec![json!({"id": 1, "name": "Ann", "amt": "10.50"})]);
    validate(&mut rel, &mut col, &GENERIC, "hr", "people", "proj.ds.people").unwrap();
    assert_eq!(
        col.queries,
        ["SELECT TO_JSON(t) FROM proj.ds.people AS t"]
    );
}

#[test]
fn repeated_validations_share_no_state() {
    // Every call builds its state from scratch; a second run must see
    // only its own data.
    let mut rel = ann_source();
    let mut col =
        MemoryColumnar::from_values(vec![json!({"id": 1, "name": "Ann", "amt": "10.50"})]);
    for _ in 0..3 {
        let report = validate(&mut rel, &mut col, &GENERIC, "hr", "people", "people_bq").unwrap();
        assert!(report.passed(), "{}", report.summary());
        assert_eq!(report.rows_compared, 1);
        assert_eq!(report.target_rows, 1);
    }
}
