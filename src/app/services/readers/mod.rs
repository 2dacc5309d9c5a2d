//! Reader contract and reader compositions
//!
//! A [`Reader`] is one opened data source. It returns one [`Data`] table per
//! variable, the station map and the variable list. Filtering and renaming
//! are layered on top of any reader by the wrappers in this module instead of
//! being re-implemented by each backend.
//!
//! Readers hold resources until closed. [`ScopedReader`] and [`with_reader`]
//! guarantee the close on every exit path.

use crate::app::models::{Data, StationMap};
use crate::Result;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use tracing::warn;

pub mod engine;
pub mod filtered;
pub mod memory;
pub mod wrappers;

#[cfg(test)]
pub mod tests;

pub use engine::{Engine, EngineRegistry, MemoryEngine};
pub use filtered::FilteredReader;
pub use memory::MemoryReader;
pub use wrappers::VariableNameChangingReader;

/// An opened timeseries source
pub trait Reader {
    /// Data of one variable
    fn data(&self, variable: &str) -> Result<Data>;

    /// All stations, keyed by identifier
    fn stations(&self) -> Result<StationMap>;

    /// All variables this reader offers
    fn variables(&self) -> Result<Vec<String>>;

    /// Variables with at least one row at `station`
    fn variables_at(&self, station: &str) -> Result<Vec<String>> {
        let mut found = Vec::new();
        for variable in self.variables()? {
            if self.data(&variable)?.stations().iter().any(|s| s == station) {
                found.push(variable);
            }
        }
        Ok(found)
    }

    /// Descriptive metadata of the source, such as its origin or revision
    ///
    /// Backends without metadata return an empty map.
    fn metadata(&self) -> Result<BTreeMap<String, String>> {
        Ok(BTreeMap::new())
    }

    /// Release the resources held by this reader
    fn close(&mut self) -> Result<()>;
}

impl<R: Reader + ?Sized> Reader for Box<R> {
    fn data(&self, variable: &str) -> Result<Data> {
        (**self).data(variable)
    }

    fn stations(&self) -> Result<StationMap> {
        (**self).stations()
    }

    fn variables(&self) -> Result<Vec<String>> {
        (**self).variables()
    }

    fn variables_at(&self, station: &str) -> Result<Vec<String>> {
        (**self).variables_at(station)
    }

    fn metadata(&self) -> Result<BTreeMap<String, String>> {
        (**self).metadata()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Reader that is closed when it goes out of scope
///
/// Prefer [`ScopedReader::close`] where the close error matters; the implicit
/// close on drop can only log it.
#[derive(Debug)]
pub struct ScopedReader<R: Reader> {
    reader: R,
    closed: bool,
}

impl<R: Reader> ScopedReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            closed: false,
        }
    }

    /// Close the reader now and report the outcome
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.reader.close()
    }
}

impl<R: Reader> Deref for ScopedReader<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.reader
    }
}

impl<R: Reader> DerefMut for ScopedReader<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.reader
    }
}

impl<R: Reader> Drop for ScopedReader<R> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.reader.close() {
            warn!("Failed to close reader: {}", e);
        }
    }
}

/// Run `f` with `reader`, closing the reader afterwards
///
/// The reader is closed even when `f` fails or panics. An error from `f`
/// takes precedence over an error from closing.
pub fn with_reader<R, T, F>(reader: R, f: F) -> Result<T>
where
    R: Reader,
    F: FnOnce(&mut R) -> Result<T>,
{
    let mut scoped = ScopedReader::new(reader);
    let result = f(&mut *scoped);
    let closed = scoped.close();
    let value = result?;
    closed?;
    Ok(value)
}
