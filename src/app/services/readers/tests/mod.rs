//! Test utilities for reader testing

use std::cell::Cell;
use std::rc::Rc;

use crate::app::models::{Data, StationMap};
use crate::app::services::readers::Reader;
use crate::{Error, Result};

pub use crate::app::services::filters::tests::{
    create_test_data, create_test_reader, create_test_stations, day,
};

mod filtered_tests;
mod memory_tests;
mod scoped_tests;
mod wrappers_tests;

/// Reader that counts how often it was closed
///
/// With `fail_close` set, closing reports an error after counting.
#[derive(Debug, Clone, Default)]
pub struct TrackingReader {
    pub closes: Rc<Cell<usize>>,
    pub fail_close: bool,
}

impl TrackingReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_close: true,
            ..Self::default()
        }
    }
}

impl Reader for TrackingReader {
    fn data(&self, variable: &str) -> Result<Data> {
        Ok(create_test_data(variable, "ug m-3"))
    }

    fn stations(&self) -> Result<StationMap> {
        Ok(create_test_stations())
    }

    fn variables(&self) -> Result<Vec<String>> {
        Ok(vec!["O3".to_string()])
    }

    fn close(&mut self) -> Result<()> {
        self.closes.set(self.closes.get() + 1);
        if self.fail_close {
            return Err(Error::configuration("close failed"));
        }
        Ok(())
    }
}
