//! Tests for the in-memory reader

use super::*;
use crate::app::models::{DataRow, Station};
use crate::app::services::readers::MemoryReader;

#[test]
fn test_memory_reader_contents() {
    let reader = create_test_reader();

    assert_eq!(reader.variables().unwrap(), vec!["NOx", "SOx"]);
    assert_eq!(reader.stations().unwrap().len(), 2);
    assert_eq!(reader.data("SOx").unwrap().len(), 104);
    assert_eq!(reader.data("NOx").unwrap().units(), "Mg");
}

#[test]
fn test_memory_reader_unknown_variable() {
    let reader = create_test_reader();
    assert!(matches!(
        reader.data("O3"),
        Err(Error::VariableNotFound { ref variable }) if variable == "O3"
    ));
}

#[test]
fn test_memory_reader_appends_same_variable() {
    let mut reader = MemoryReader::new();
    reader.insert_data(create_test_data("SOx", "Gg")).unwrap();

    let mut extra = Data::new("SOx", "Gg");
    extra
        .append(DataRow::new(1.5, "station3", 0.0, 0.0, 0.0, day(0), day(1)))
        .unwrap();
    reader.insert_data(extra).unwrap();

    let data = reader.data("SOx").unwrap();
    assert_eq!(data.len(), 105);
    assert_eq!(data.stations().last().map(String::as_str), Some("station3"));
}

#[test]
fn test_memory_reader_unit_mismatch() {
    let mut reader = MemoryReader::new()
        .with_data(create_test_data("SOx", "Gg"))
        .unwrap();

    let result = reader.insert_data(create_test_data("SOx", "Mg"));
    assert!(matches!(result, Err(Error::UnitMismatch { .. })));
    assert_eq!(reader.data("SOx").unwrap().len(), 104);
}

#[test]
fn test_memory_reader_station_replaced() {
    let reader = MemoryReader::new()
        .with_station(Station::new("station1", 60.0, 10.7, 100.0))
        .with_station(Station::new("station1", 61.0, 10.7, 100.0).with_country("NO"));

    let stations = reader.stations().unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations["station1"].latitude(), 61.0);
}

#[test]
fn test_memory_reader_closed() {
    let mut reader = create_test_reader();
    assert!(!reader.is_closed());

    reader.close().unwrap();
    assert!(reader.is_closed());
    assert!(matches!(reader.data("SOx"), Err(Error::ReaderClosed)));
    assert!(matches!(reader.variables(), Err(Error::ReaderClosed)));
    assert!(matches!(reader.stations(), Err(Error::ReaderClosed)));
}

#[test]
fn test_variables_at() {
    let mut extra = Data::new("O3", "ppb");
    extra
        .append(DataRow::new(40.0, "station2", 51.5, -0.1, 20.0, day(0), day(1)))
        .unwrap();
    let reader = create_test_reader().with_data(extra).unwrap();

    assert_eq!(reader.variables_at("station1").unwrap(), vec!["NOx", "SOx"]);
    assert_eq!(
        reader.variables_at("station2").unwrap(),
        vec!["NOx", "O3", "SOx"]
    );
    assert!(reader.variables_at("station9").unwrap().is_empty());
}

#[test]
fn test_memory_reader_metadata() {
    assert!(create_test_reader().metadata().unwrap().is_empty());

    let mut reader = create_test_reader()
        .with_metadata("institution", "NILU")
        .with_metadata("revision", "2024-01-01");
    let metadata = reader.metadata().unwrap();
    assert_eq!(metadata.len(), 2);
    assert_eq!(metadata["institution"], "NILU");

    reader.close().unwrap();
    assert!(matches!(reader.metadata(), Err(Error::ReaderClosed)));
}
