//! Port for the statistics endpoints.

use crate::{
    api::ApiResult,
    report::domain::{DashboardStats, ReportScope},
};
use async_trait::async_trait;

/// Statistics backend contract.
#[async_trait]
pub trait ReportApi: Send + Sync {
    /// Fetches the figures of one view.
    async fn fetch(&self, scope: ReportScope) -> ApiResult<DashboardStats>;
}
