//! Wiring of transport, persistence and stores

use std::sync::Arc;

use crate::attendance::AttendanceStore;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::AttendanceApi;
use crate::route::{self, RouteDecision};
use crate::session::SessionStore;
use crate::storage::SessionStorage;
use crate::types::StalePolicy;

/// Attendance client
///
/// Owns one [`SessionStore`] and one [`AttendanceStore`] sharing a transport.
/// Clone freely; clones share state.
#[derive(Debug, Clone)]
pub struct AttendanceClient {
    session: Arc<SessionStore>,
    attendance: Arc<AttendanceStore>,
}

impl AttendanceClient {
    /// Build the reqwest transport and storage backend described by `config`
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let api = Arc::new(config.build_http_client()?);
        tracing::info!(
            base_url = %config.base_url,
            persisted = config.session_dir.is_some(),
            stale_policy = ?config.stale_policy,
            "Attendance client configured"
        );
        Ok(Self::with_parts(api, config.session_storage(), config.stale_policy))
    }

    /// Assemble from explicit parts
    pub fn with_parts(
        api: Arc<dyn AttendanceApi>,
        storage: Arc<dyn SessionStorage>,
        stale_policy: StalePolicy,
    ) -> Self {
        let session = Arc::new(SessionStore::new(Arc::clone(&api), storage, stale_policy));
        let attendance = Arc::new(AttendanceStore::new(
            api,
            Arc::clone(&session),
            stale_policy,
        ));
        Self {
            session,
            attendance,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn attendance(&self) -> &AttendanceStore {
        &self.attendance
    }

    /// Route decision for `path` against the current session
    pub fn route(&self, path: &str) -> RouteDecision {
        route::resolve(path, &self.session.snapshot())
    }
}
