//! Tests for the variable renaming filter

use super::*;
use crate::Error;
use crate::app::services::filters::{Filter, VariableNameFilter, build_from_kwargs};
use crate::app::services::readers::{FilteredReader, Reader};
use serde_json::json;

fn sox_renamed() -> VariableNameFilter {
    build_from_kwargs(&json!({"reader_to_new": {"SOx": "oxidised_sulphur"}})).unwrap()
}

#[test]
fn test_variables_filter_renames() {
    let filter = sox_renamed();
    let variables = filter.filter_variables(vec!["NOx".to_string(), "SOx".to_string()]);
    assert_eq!(variables, vec!["NOx", "oxidised_sulphur"]);

    let data = filter
        .filter_data(create_test_data("SOx", "Gg"), &create_test_stations(), &variables)
        .unwrap();
    assert_eq!(data.variable(), "oxidised_sulphur");
    assert_eq!(data.len(), 104);
}

#[test]
fn test_variables_filter_through_reader() {
    let reader = FilteredReader::new(
        create_test_reader(),
        FilterChain::new(vec![sox_renamed().into()]),
    );

    assert_eq!(reader.data("oxidised_sulphur").unwrap().variable(), "oxidised_sulphur");
    assert!(matches!(
        reader.data("SOx"),
        Err(Error::VariableNotFound { .. })
    ));
}

#[test]
fn test_variables_filter_include_uses_new_names() {
    let filter: VariableNameFilter = build_from_kwargs(&json!({
        "reader_to_new": {"SOx": "oxidised_sulphur"},
        "include": ["oxidised_sulphur"]
    }))
    .unwrap();

    assert!(filter.has_variable("oxidised_sulphur"));
    assert!(!filter.has_variable("SOx"));
    assert!(filter.has_reader_variable("SOx"));
    assert!(!filter.has_reader_variable("NOx"));

    let variables = filter.filter_variables(vec!["SOx".to_string(), "NOx".to_string()]);
    assert_eq!(variables, vec!["oxidised_sulphur"]);
}

#[test]
fn test_variables_filter_exclude() {
    let filter: VariableNameFilter = build_from_kwargs(&json!({"exclude": ["NOx"]})).unwrap();
    let (rows, stations) = apply_filters(vec![filter.into()]);
    assert_eq!((rows, stations), (104, 2));
}

#[test]
fn test_reader_variable_inverse() {
    let filter = sox_renamed();
    assert_eq!(filter.reader_variable("oxidised_sulphur"), "SOx");
    assert_eq!(filter.reader_variable("NOx"), "NOx");
    assert_eq!(filter.new_variable("SOx"), "oxidised_sulphur");
}

#[test]
fn test_variables_filter_rejects_clashing_targets() {
    let result = build_from_kwargs::<VariableNameFilter>(&json!({
        "reader_to_new": {"SOx": "sulphur", "SO4": "sulphur"}
    }));
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_variables_filter_kwargs() {
    let filter = sox_renamed();
    assert_eq!(
        filter.init_kwargs(),
        json!({"reader_to_new": {"SOx": "oxidised_sulphur"}, "include": [], "exclude": []})
    );
}
