//! In-memory statistics backend.

use crate::{
    api::{ApiError, ApiResult},
    report::{
        domain::{DashboardStats, ReportScope},
        ports::ReportApi,
    },
    session::SessionHandle,
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

/// Statistics backend emulated in memory.
///
/// Figures are published per scope. Reads require a session whose role may
/// see the scope; unpublished scopes read as all zeroes.
#[derive(Debug, Clone)]
pub struct InMemoryReportApi {
    session: SessionHandle,
    figures: Arc<RwLock<HashMap<ReportScope, DashboardStats>>>,
}

fn poisoned(err: impl ToString) -> ApiError {
    ApiError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryReportApi {
    /// Creates a backend with no published figures.
    #[must_use]
    pub fn new(session: SessionHandle) -> Self {
        Self {
            session,
            figures: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Publishes the figures of one scope, replacing earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when lock acquisition fails.
    pub fn publish(&self, scope: ReportScope, stats: DashboardStats) -> ApiResult<()> {
        self.figures.write().map_err(poisoned)?.insert(scope, stats);
        Ok(())
    }
}

#[async_trait]
impl ReportApi for InMemoryReportApi {
    async fn fetch(&self, scope: ReportScope) -> ApiResult<DashboardStats> {
        let user = self
            .session
            .user()
            .ok_or_else(|| ApiError::Unauthorized("No token provided".to_owned()))?;
        if !scope.permits(user.role) {
            return Err(ApiError::Status {
                status: 403,
                message: "Access denied".to_owned(),
            });
        }
        let figures = self.figures.read().map_err(poisoned)?;
        Ok(figures.get(&scope).cloned().unwrap_or_default())
    }
}
