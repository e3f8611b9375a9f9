//! HTTP adapter for the statistics endpoints.

use crate::{
    api::{ApiClient, ApiResult},
    report::{
        domain::{DashboardStats, ReportScope},
        ports::ReportApi,
    },
};
use async_trait::async_trait;
use serde::Deserialize;

/// Statistics backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpReportApi {
    client: ApiClient,
}

impl HttpReportApi {
    /// Creates the adapter on top of a shared client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

/// Views answer either `{stats}` or the bare figures.
#[derive(Deserialize)]
#[serde(untagged)]
enum StatsBody {
    Wrapped { stats: DashboardStats },
    Bare(DashboardStats),
}

impl StatsBody {
    fn into_stats(self) -> DashboardStats {
        match self {
            Self::Wrapped { stats } | Self::Bare(stats) => stats,
        }
    }
}

#[async_trait]
impl ReportApi for HttpReportApi {
    async fn fetch(&self, scope: ReportScope) -> ApiResult<DashboardStats> {
        let body: StatsBody = self.client.get(scope.path(), &[]).await?;
        Ok(body.into_stats())
    }
}
