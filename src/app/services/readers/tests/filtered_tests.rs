//! Tests for the filtering reader

use super::*;
use crate::app::services::filters::{FilterChain, FilterCollection, FilterFactory};
use crate::app::services::readers::{FilteredReader, MemoryReader};
use serde_json::json;

fn filtered(collection: FilterCollection) -> FilteredReader<MemoryReader> {
    FilteredReader::from_collection(
        create_test_reader(),
        &collection,
        &FilterFactory::with_builtins(),
    )
    .unwrap()
}

#[test]
fn test_filtered_reader_without_filters() {
    let reader = filtered(FilterCollection::new());
    assert!(reader.chain().is_empty());
    assert_eq!(reader.variables().unwrap(), reader.reader().variables().unwrap());
    assert_eq!(reader.data("SOx").unwrap().len(), 104);
}

#[test]
fn test_filtered_reader_stations_and_rows() {
    let reader = filtered(FilterCollection::new().with("countries", json!({"exclude": ["NO"]})));

    let stations = reader.stations().unwrap();
    assert_eq!(stations.keys().collect::<Vec<_>>(), vec!["station2"]);

    let data = reader.data("NOx").unwrap();
    assert_eq!(data.len(), 52);
    assert!(data.stations().iter().all(|s| s == "station2"));

    // The backend is untouched
    assert_eq!(reader.reader().data("NOx").unwrap().len(), 104);
}

#[test]
fn test_filtered_reader_hides_excluded_variable() {
    let reader = filtered(FilterCollection::new().with("variables", json!({"exclude": ["NOx"]})));

    assert_eq!(reader.variables().unwrap(), vec!["SOx"]);
    assert!(matches!(
        reader.data("NOx"),
        Err(Error::VariableNotFound { ref variable }) if variable == "NOx"
    ));
    assert!(reader.variables_at("station1").unwrap() == vec!["SOx"]);
}

#[test]
fn test_filtered_reader_renamed_variable() {
    let reader = filtered(
        FilterCollection::new()
            .with("variables", json!({"reader_to_new": {"NOx": "nitrogen_oxides"}}))
            .with("stations", json!({"include": ["station1"]})),
    );

    assert_eq!(reader.variables().unwrap(), vec!["nitrogen_oxides", "SOx"]);
    let data = reader.data("nitrogen_oxides").unwrap();
    assert_eq!(data.variable(), "nitrogen_oxides");
    assert_eq!(data.units(), "Mg");
    assert_eq!(data.len(), 52);
}

#[test]
fn test_filtered_reader_invalid_collection() {
    let collection = FilterCollection::new()
        .with("bounding_boxes", json!({"include": [[100.0, 0.0, 0.0, 0.0]]}));
    let result = FilteredReader::from_collection(
        create_test_reader(),
        &collection,
        &FilterFactory::with_builtins(),
    );
    assert!(matches!(result, Err(Error::BoundingBox { .. })));
}

#[test]
fn test_filtered_reader_close_reaches_backend() {
    let mut reader = filtered(FilterCollection::new());
    reader.close().unwrap();
    assert!(reader.into_inner().is_closed());
}

#[test]
fn test_filtered_reader_passes_metadata() {
    let backend = create_test_reader().with_metadata("institution", "NILU");
    let reader = FilteredReader::new(backend, FilterChain::default());
    let boxed: Box<dyn Reader> = Box::new(reader);
    assert_eq!(boxed.metadata().unwrap()["institution"], "NILU");
}
