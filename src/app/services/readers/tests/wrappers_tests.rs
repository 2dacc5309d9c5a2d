//! Tests for reader wrappers

use super::*;
use crate::app::services::readers::VariableNameChangingReader;

#[test]
fn test_variable_name_changing_reader() {
    let reader = VariableNameChangingReader::new(create_test_reader(), [("SOx", "newsox")]);

    assert_eq!(reader.variables().unwrap(), vec!["NOx", "newsox"]);

    let data = reader.data("newsox").unwrap();
    assert_eq!(data.variable(), "newsox");
    assert_eq!(data.units(), "Gg");
    assert_eq!(data.len(), 104);
    assert_eq!(data.values(), reader.reader().data("SOx").unwrap().values());

    // Unrenamed variables pass through
    assert_eq!(reader.data("NOx").unwrap().variable(), "NOx");
    assert_eq!(reader.stations().unwrap(), reader.reader().stations().unwrap());
}

#[test]
fn test_variable_name_changing_reader_old_name() {
    let reader = VariableNameChangingReader::new(create_test_reader(), [("SOx", "newsox")]);

    // Old names are not offered but still reach the backend
    assert!(!reader.variables().unwrap().contains(&"SOx".to_string()));
    assert_eq!(reader.data("SOx").unwrap().variable(), "SOx");
    assert!(matches!(reader.data("O3"), Err(Error::VariableNotFound { .. })));
}

#[test]
fn test_variable_name_changing_reader_close() {
    let tracking = TrackingReader::new();
    let closes = tracking.closes.clone();

    let mut reader = VariableNameChangingReader::new(tracking, Vec::<(String, String)>::new());
    reader.close().unwrap();
    assert_eq!(closes.get(), 1);
    assert_eq!(reader.into_inner().closes.get(), 1);
}

#[test]
fn test_variable_name_changing_reader_metadata() {
    let backend = create_test_reader().with_metadata("revision", "7");
    let reader = VariableNameChangingReader::new(backend, [("SOx", "newsox")]);
    assert_eq!(reader.metadata().unwrap()["revision"], "7");

    // Readers without metadata report an empty map
    let tracking = VariableNameChangingReader::new(TrackingReader::new(), [("O3", "ozone")]);
    assert!(tracking.metadata().unwrap().is_empty());
}
