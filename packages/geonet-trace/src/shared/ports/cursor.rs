//! Scoped feature cursors
//!
//! Provider iteration handles are wrapped in [`ScopedCursor`], whose `Drop`
//! releases the handle. Early returns and `?` therefore never leak a cursor.

use super::network::NetworkResult;
use crate::shared::models::FeatureRecord;

/// Native iteration handle over feature records
pub trait FeatureCursor {
    fn next_feature(&mut self) -> NetworkResult<Option<FeatureRecord>>;

    /// Release the native handle. Called exactly once by [`ScopedCursor`].
    fn release(&mut self);
}

/// Cursor released on every exit path
pub struct ScopedCursor<'a> {
    inner: Box<dyn FeatureCursor + 'a>,
}

impl<'a> ScopedCursor<'a> {
    pub fn new(inner: impl FeatureCursor + 'a) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    pub fn next_feature(&mut self) -> NetworkResult<Option<FeatureRecord>> {
        self.inner.next_feature()
    }

    /// Drain the cursor; the handle is released when `self` drops
    pub fn collect_all(mut self) -> NetworkResult<Vec<FeatureRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.next_feature()? {
            records.push(record);
        }
        Ok(records)
    }
}

impl Drop for ScopedCursor<'_> {
    fn drop(&mut self) {
        self.inner.release();
    }
}

impl std::fmt::Debug for ScopedCursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedCursor").finish_non_exhaustive()
    }
}
