//! End-to-end tests for `catq` request handling.
//!
//! Run with: `cargo test -p catalogue-cli --test cli_tests`

use std::io::Write;

use catalogue_cli::{CliConfig, execute, read_input};
use clap::Parser;
use serde_json::json;

fn write_request(body: &serde_json::Value) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", body).unwrap();
    file
}

// ============================================================================
// File Input
// ============================================================================

#[test]
fn test_search_from_file() {
    let file = write_request(&json!({
        "searchType": "tagsSearch_",
        "value": [["flood"]],
        "instance": "pune"
    }));
    let path = file.path().to_str().unwrap().to_string();

    let cli = CliConfig::try_parse_from(["catq", "search", "--input", path.as_str()]).unwrap();
    let input = read_input(cli.command.input()).unwrap();
    let outcome = execute(&cli.command, input, &cli.query_config().unwrap());

    assert!(!outcome.is_rejected());
    let body = outcome.to_json();
    let filter = body["query"]["bool"]["filter"].as_array().unwrap();
    assert_eq!(filter.len(), 2);
    assert_eq!(filter[1], json!({ "term": { "instance": "pune" } }));
}

#[test]
fn test_listing_from_file() {
    let file = write_request(&json!({ "itemType": "tags", "limit": 2, "offset": 1 }));
    let path = file.path().to_str().unwrap().to_string();

    let cli = CliConfig::try_parse_from(["catq", "list", "--input", path.as_str()]).unwrap();
    let input = read_input(cli.command.input()).unwrap();
    let outcome = execute(&cli.command, input, &cli.query_config().unwrap());

    assert_eq!(outcome.to_json()["aggs"]["results"]["terms"]["size"], json!(1));
}

#[test]
fn test_rejected_relationship_envelope() {
    let file = write_request(&json!({
        "id": "X",
        "relationship": "provider",
        "itemType": "iudx:Owner"
    }));
    let path = file.path().to_str().unwrap().to_string();

    let cli =
        CliConfig::try_parse_from(["catq", "relationship", "--input", path.as_str()]).unwrap();
    let input = read_input(cli.command.input()).unwrap();
    let outcome = execute(&cli.command, input, &cli.query_config().unwrap());

    assert!(outcome.is_rejected());
    assert_eq!(
        outcome.to_json(),
        json!({
            "type": "urn:dx:cat:InvalidRelationSearch",
            "title": "Invalid relationship search",
            "detail": "Invalid relationship type"
        })
    );
}

// ============================================================================
// Input Failures
// ============================================================================

#[test]
fn test_invalid_json_input() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    assert!(read_input(Some(file.path())).is_err());
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    assert!(read_input(Some(missing.as_path())).is_err());
}
