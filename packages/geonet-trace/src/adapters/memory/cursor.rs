//! Cursor over materialized records, counted while open

use crate::shared::models::FeatureRecord;
use crate::shared::ports::{FeatureCursor, NetworkResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub struct RecordCursor {
    records: std::vec::IntoIter<FeatureRecord>,
    open: Arc<AtomicUsize>,
    released: bool,
}

impl RecordCursor {
    pub fn new(records: Vec<FeatureRecord>, open: Arc<AtomicUsize>) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        Self {
            records: records.into_iter(),
            open,
            released: false,
        }
    }
}

impl FeatureCursor for RecordCursor {
    fn next_feature(&mut self) -> NetworkResult<Option<FeatureRecord>> {
        Ok(self.records.next())
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.open.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
