//! Reader wrappers

use super::Reader;
use crate::app::models::{Data, StationMap};
use crate::Result;
use std::collections::{BTreeMap, HashMap};

/// Reader offering the variables of another reader under new names
///
/// Station and source metadata are passed through unchanged.
#[derive(Debug)]
pub struct VariableNameChangingReader<R: Reader> {
    reader: R,
    reader_to_new: HashMap<String, String>,
    new_to_reader: HashMap<String, String>,
}

impl<R: Reader> VariableNameChangingReader<R> {
    /// Wrap `reader`, renaming variables by `reader_to_new`
    pub fn new<K, V>(reader: R, reader_to_new: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let reader_to_new: HashMap<String, String> = reader_to_new
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let new_to_reader = reader_to_new
            .iter()
            .map(|(k, v)| (v.clone(), k.clone()))
            .collect();

        Self {
            reader,
            reader_to_new,
            new_to_reader,
        }
    }

    /// The original reader
    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Reader> Reader for VariableNameChangingReader<R> {
    fn data(&self, variable: &str) -> Result<Data> {
        let reader_variable = self
            .new_to_reader
            .get(variable)
            .map(String::as_str)
            .unwrap_or(variable);
        let mut data = self.reader.data(reader_variable)?;
        data.set_variable(variable);
        Ok(data)
    }

    fn stations(&self) -> Result<StationMap> {
        self.reader.stations()
    }

    fn variables(&self) -> Result<Vec<String>> {
        Ok(self
            .reader
            .variables()?
            .into_iter()
            .map(|v| self.reader_to_new.get(&v).cloned().unwrap_or(v))
            .collect())
    }

    fn metadata(&self) -> Result<BTreeMap<String, String>> {
        self.reader.metadata()
    }

    fn close(&mut self) -> Result<()> {
        self.reader.close()
    }
}
