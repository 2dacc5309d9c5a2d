//! Tests for scoped reader lifetimes

use super::*;
use crate::app::services::readers::{ScopedReader, with_reader};

#[test]
fn test_scoped_reader_closes_on_drop() {
    let reader = TrackingReader::new();
    let closes = reader.closes.clone();

    {
        let scoped = ScopedReader::new(reader);
        assert_eq!(scoped.variables().unwrap(), vec!["O3"]);
        assert_eq!(closes.get(), 0);
    }
    assert_eq!(closes.get(), 1);
}

#[test]
fn test_scoped_reader_explicit_close_once() {
    let reader = TrackingReader::new();
    let closes = reader.closes.clone();

    ScopedReader::new(reader).close().unwrap();
    assert_eq!(closes.get(), 1);
}

#[test]
fn test_scoped_reader_reports_close_error() {
    let reader = TrackingReader::failing();
    let closes = reader.closes.clone();

    assert!(ScopedReader::new(reader).close().is_err());
    assert_eq!(closes.get(), 1);

    // Dropping only logs the failure
    let reader = TrackingReader::failing();
    let closes = reader.closes.clone();
    drop(ScopedReader::new(reader));
    assert_eq!(closes.get(), 1);
}

#[test]
fn test_with_reader_returns_value() {
    let reader = TrackingReader::new();
    let closes = reader.closes.clone();

    let rows = with_reader(reader, |r| Ok(r.data("O3")?.len())).unwrap();
    assert_eq!(rows, 104);
    assert_eq!(closes.get(), 1);
}

#[test]
fn test_with_reader_closes_on_error() {
    let reader = TrackingReader::failing();
    let closes = reader.closes.clone();

    let result: crate::Result<()> =
        with_reader(reader, |_| Err(Error::variable_not_found("SOx")));

    // The error of the closure wins over the close error
    assert!(matches!(result, Err(Error::VariableNotFound { .. })));
    assert_eq!(closes.get(), 1);
}

#[test]
fn test_with_reader_close_error() {
    let result = with_reader(TrackingReader::failing(), |r| r.variables());
    assert!(result.unwrap_err().is_configuration());
}

#[test]
fn test_with_reader_closes_on_panic() {
    let reader = TrackingReader::new();
    let closes = reader.closes.clone();

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _ = with_reader(reader, |_| -> crate::Result<()> { panic!("reader callback") });
    }));

    assert!(outcome.is_err());
    assert_eq!(closes.get(), 1);
}

#[test]
fn test_memory_reader_closed_through_scope() {
    let reader = create_test_reader();
    let mut scoped = ScopedReader::new(reader);
    assert_eq!(scoped.data("SOx").unwrap().len(), 104);

    Reader::close(&mut *scoped).unwrap();
    assert!(scoped.is_closed());
    assert!(matches!(scoped.data("SOx"), Err(Error::ReaderClosed)));
}
