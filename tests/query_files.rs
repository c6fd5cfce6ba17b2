//! Query files loaded from disk and run through the dynamic builder.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use indoc::{formatdoc, indoc};
use pretty_assertions::assert_eq;
use seqpipe::config::{load_query, parse_query, run_query, QueryOutput};
use seqpipe::{Kind, QueryError};
use tempfile::TempDir;

/// Helper to create a query file with content
fn create_query_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let file_path = dir.join(name);
    fs::write(&file_path, content).unwrap();
    file_path
}

#[test]
fn test_load_and_run_even_sum() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_query_file(
        temp_dir.path(),
        "even.toml",
        indoc! {r#"
            name = "even sum"

            [input]
            range = { start = 1, end = 11 }

            [[stages]]
            op = "filter"
            predicate = "even"

            [[stages]]
            op = "sum"
        "#},
    );

    let query = load_query(&path).unwrap();
    assert_eq!(query.display_name(), "even sum");
    assert_eq!(run_query(&query).unwrap(), QueryOutput::Integer(30));
}

#[test]
fn test_zip_map_pairs_sum() {
    let query = parse_query(indoc! {r#"
        [input]
        values = [1, 2, 3, 4]

        [[stages]]
        op = "zip"
        with = [10, 20, 30, 40]

        [[stages]]
        op = "map_pairs"
        combine = "add"

        [[stages]]
        op = "sum"
    "#})
    .unwrap();

    assert_eq!(run_query(&query).unwrap(), QueryOutput::Integer(110));
}

#[test]
fn test_zip_descending_range_map_pairs_sum() {
    let query = parse_query(indoc! {r#"
        [input]
        range = { start = 1, end = 11 }

        [[stages]]
        op = "zip"
        with = [10, 9, 8, 7, 6, 5, 4, 3, 2, 1]

        [[stages]]
        op = "map_pairs"
        combine = "add"

        [[stages]]
        op = "sum"
    "#})
    .unwrap();

    assert_eq!(run_query(&query).unwrap(), QueryOutput::Integer(110));
}

#[test]
fn test_sum_wraps_on_overflow() {
    let query = parse_query(indoc! {r#"
        [input]
        values = [9223372036854775807, 1]

        [[stages]]
        op = "sum"
    "#})
    .unwrap();

    assert_eq!(run_query(&query).unwrap(), QueryOutput::Integer(i64::MIN));
    assert_eq!(query.build().unwrap().describe()[0].name, "sum");
}

#[test]
fn test_folds_from_file() {
    let run = |op: &str, combine: &str, init: i64| {
        let text = formatdoc! {r#"
                [input]
                values = [10, 20, 30]

                [[stages]]
                op = "{op}"
                combine = "{combine}"
                init = {init}
            "#};
        run_query(&parse_query(&text).unwrap()).unwrap()
    };

    assert_eq!(run("fold_left", "add", 0), QueryOutput::Integer(60));
    assert_eq!(run("fold_right", "add", 0), QueryOutput::Integer(60));
    assert_eq!(run("fold", "sub", 10), QueryOutput::Integer(-50));
    assert_eq!(run("fold_left", "sub", 60), QueryOutput::Integer(0));
}

#[test]
fn test_repeat_input_and_to_map() {
    let query = parse_query(indoc! {r#"
        [input]
        repeat = { value = 4, count = 3 }

        [[stages]]
        op = "zip"
        with = [7, 8, 9]

        [[stages]]
        op = "to_map"
    "#})
    .unwrap();

    assert_eq!(
        run_query(&query).unwrap(),
        QueryOutput::Map(BTreeMap::from([(4, 7)]))
    );
}

#[test]
fn test_descending_range_with_step() {
    let query = parse_query(indoc! {r#"
        [input]
        range = { start = 10, end = 0, step = 3 }

        [[stages]]
        op = "sort"

        [[stages]]
        op = "to_list"
    "#})
    .unwrap();

    assert_eq!(
        run_query(&query).unwrap(),
        QueryOutput::Sequence(vec![1, 4, 7, 10])
    );
}

#[test]
fn test_describe_stages() {
    let query = parse_query(indoc! {r#"
        [input]
        values = []

        [[stages]]
        op = "take"
        n = 3

        [[stages]]
        op = "any"
        predicate = { gt = 2 }
    "#})
    .unwrap();

    let pipeline = query.build().unwrap();
    let stages = pipeline.describe();
    assert_eq!(stages.len(), 2);
    assert_eq!(stages[0].name, "take");
    assert_eq!(stages[0].kind, Kind::Transform);
    assert_eq!(stages[1].name, "any");
    assert_eq!(stages[1].kind, Kind::Reduction);
    assert_eq!(pipeline.output_type_name(), "bool");
    assert_eq!(run_query(&query).unwrap(), QueryOutput::Bool(false));
}

#[test]
fn test_type_mismatch_reported_at_build() {
    let query = parse_query(indoc! {r#"
        [input]
        values = [1, 2]

        [[stages]]
        op = "zip"
        with = [3, 4]

        [[stages]]
        op = "filter"
        predicate = "odd"
    "#})
    .unwrap();

    match query.build().err() {
        Some(QueryError::TypeMismatch {
            position, stage, ..
        }) => {
            assert_eq!(position, 2);
            assert_eq!(stage, "filter");
        }
        other => panic!("expected a type mismatch, got {other:?}"),
    }
}

#[test]
fn test_reduction_in_the_middle_rejected() {
    let query = parse_query(indoc! {r#"
        [input]
        values = [1, 2]

        [[stages]]
        op = "size"

        [[stages]]
        op = "reverse"
    "#})
    .unwrap();

    assert!(matches!(
        run_query(&query),
        Err(QueryError::NonTerminalReduction { position: 2, .. })
    ));
}

#[test]
fn test_avg_of_empty_input_fails_at_run() {
    let query = parse_query(indoc! {r#"
        [input]
        range = { start = 3, end = 3 }

        [[stages]]
        op = "avg"
    "#})
    .unwrap();

    // Assembly succeeds; only running the query fails.
    assert!(query.build().is_ok());
    assert_eq!(
        run_query(&query).unwrap_err(),
        QueryError::empty_sequence("avg")
    );
}

#[test]
fn test_malformed_toml() {
    let err = parse_query("[input\nvalues = [1]").unwrap_err();
    assert!(matches!(err, QueryError::Configuration(_)));
    assert!(err.is_construction_error());
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_query(&temp_dir.path().join("absent.toml")).unwrap_err();
    match err {
        QueryError::Io { path, .. } => assert!(path.ends_with("absent.toml")),
        other => panic!("expected an io error, got {other:?}"),
    }
}
