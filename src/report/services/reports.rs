//! Statistics retrieval.

use crate::{
    api::ApiError,
    report::{
        domain::{DashboardStats, ReportScope},
        ports::ReportApi,
    },
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors raised while fetching or exporting reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A CSV record could not be written.
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),

    /// The export destination could not be written.
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for reporting operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Reporting service.
pub struct ReportService<A>
where
    A: ReportApi,
{
    api: Arc<A>,
}

impl<A> ReportService<A>
where
    A: ReportApi,
{
    /// Creates a new reporting service.
    #[must_use]
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Fetches the figures of one view. No client-side aggregation happens.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Api`] when the backend call fails, including a
    /// 403 when the signed-in role may not read `scope`.
    pub async fn fetch(&self, scope: ReportScope) -> ReportResult<DashboardStats> {
        debug!(%scope, "fetching report figures");
        Ok(self.api.fetch(scope).await?)
    }
}
