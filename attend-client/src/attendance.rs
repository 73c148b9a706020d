//! AttendanceStore - domain queries and commands
//!
//! Every operation follows the same flow:
//!
//! ```text
//! operation()
//!     ├─ 1. QueryState -> Pending, generation += 1, notify
//!     ├─ 2. Read bearer token from the SessionStore (missing -> Error)
//!     ├─ 3. One HTTP call
//!     ├─ 4. Superseded? (StalePolicy::DiscardStale drops it)
//!     ├─ 5. Ok  -> replace data wholesale, phase Idle
//!     │    Err -> keep data, record message, phase Error
//!     └─ 6. notify
//! ```

use std::future::Future;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::{
    AttendanceRecord, AttendanceSummary, ManagerOverview, MessageResponse, MonthFilter,
    TeamFilters,
};
use tokio::sync::broadcast;

use crate::error::{ClientError, ClientResult};
use crate::http::AttendanceApi;
use crate::session::{EVENT_CHANNEL_CAPACITY, SessionStore};
use crate::types::{Outcome, Phase, QueryKind, QueryState, StalePolicy, StateChange};

/// Snapshot of fetched and derived attendance data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceState {
    pub summary: AttendanceSummary,
    pub history: Vec<AttendanceRecord>,
    pub team_records: Vec<AttendanceRecord>,
    pub overview: Option<ManagerOverview>,
    /// CSV text of the last successful export
    pub last_export: Option<String>,
    /// Confirmation from the last successful check-in/out
    pub message: Option<String>,
    queries: [QueryState; 7],
}

impl AttendanceState {
    pub fn query(&self, kind: QueryKind) -> &QueryState {
        &self.queries[kind.index()]
    }

    fn query_mut(&mut self, kind: QueryKind) -> &mut QueryState {
        &mut self.queries[kind.index()]
    }

    /// Whether any operation is in flight
    pub fn is_loading(&self) -> bool {
        self.queries.iter().any(|q| q.phase.is_pending())
    }
}

/// Attendance store
pub struct AttendanceStore {
    api: Arc<dyn AttendanceApi>,
    session: Arc<SessionStore>,
    state: RwLock<AttendanceState>,
    stale_policy: StalePolicy,
    events: broadcast::Sender<StateChange>,
}

impl std::fmt::Debug for AttendanceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("AttendanceStore")
            .field("history", &state.history.len())
            .field("team_records", &state.team_records.len())
            .field("stale_policy", &self.stale_policy)
            .finish()
    }
}

impl AttendanceStore {
    pub fn new(
        api: Arc<dyn AttendanceApi>,
        session: Arc<SessionStore>,
        stale_policy: StalePolicy,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api,
            session,
            state: RwLock::new(AttendanceState::default()),
            stale_policy,
            events,
        }
    }

    // ========== Reads ==========

    pub fn snapshot(&self) -> AttendanceState {
        self.state.read().clone()
    }

    pub fn query(&self, kind: QueryKind) -> QueryState {
        self.state.read().query(kind).clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.events.subscribe()
    }

    // ========== Commands ==========

    pub async fn check_in(&self) -> Outcome {
        let api = Arc::clone(&self.api);
        self.run(
            QueryKind::CheckIn,
            |token| async move { api.check_in(&token).await },
            |state, resp: MessageResponse| state.message = Some(resp.msg),
        )
        .await
    }

    pub async fn check_out(&self) -> Outcome {
        let api = Arc::clone(&self.api);
        self.run(
            QueryKind::CheckOut,
            |token| async move { api.check_out(&token).await },
            |state, resp: MessageResponse| state.message = Some(resp.msg),
        )
        .await
    }

    // ========== Queries ==========

    pub async fn fetch_summary(&self) -> Outcome {
        let api = Arc::clone(&self.api);
        self.run(
            QueryKind::Summary,
            |token| async move { api.my_summary(&token).await },
            |state, summary| state.summary = summary,
        )
        .await
    }

    /// Personal history; `None` lets the server pick its default period
    pub async fn fetch_history(&self, month: Option<MonthFilter>) -> Outcome {
        let api = Arc::clone(&self.api);
        self.run(
            QueryKind::History,
            |token| async move { api.my_history(&token, month).await },
            |state, history| state.history = history,
        )
        .await
    }

    pub async fn fetch_team_records(&self, filters: TeamFilters) -> Outcome {
        let api = Arc::clone(&self.api);
        self.run(
            QueryKind::Team,
            |token| async move { api.team_records(&token, &filters).await },
            |state, records| state.team_records = records,
        )
        .await
    }

    pub async fn fetch_manager_overview(&self) -> Outcome {
        let api = Arc::clone(&self.api);
        self.run(
            QueryKind::Overview,
            |token| async move { api.manager_overview(&token).await },
            |state, overview| state.overview = Some(overview),
        )
        .await
    }

    pub async fn export_team_csv(&self, filters: TeamFilters) -> Outcome {
        let api = Arc::clone(&self.api);
        self.run(
            QueryKind::Export,
            |token| async move { api.export_team_csv(&token, &filters).await },
            |state, csv| state.last_export = Some(csv),
        )
        .await
    }

    /// Return every operation to idle and drop the confirmation message.
    /// Fetched data is kept.
    pub fn reset(&self) {
        {
            let mut state = self.state.write();
            for query in state.queries.iter_mut() {
                query.clear();
            }
            state.message = None;
        }
        for kind in QueryKind::ALL {
            self.notify(kind, Phase::Idle);
        }
    }

    // ========== Transition machinery ==========

    async fn run<T, F, Fut>(
        &self,
        kind: QueryKind,
        call: F,
        apply: impl FnOnce(&mut AttendanceState, T),
    ) -> Outcome
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let generation = self.begin(kind);
        let result = match self.session.token() {
            Some(token) => call(token).await,
            None => Err(ClientError::NotAuthenticated),
        };
        self.settle(kind, generation, result, apply)
    }

    fn begin(&self, kind: QueryKind) -> u64 {
        let generation = self.state.write().query_mut(kind).begin();
        tracing::debug!(%kind, generation, "Request started");
        self.notify(kind, Phase::Pending);
        generation
    }

    fn settle<T>(
        &self,
        kind: QueryKind,
        generation: u64,
        result: ClientResult<T>,
        apply: impl FnOnce(&mut AttendanceState, T),
    ) -> Outcome {
        let mut state = self.state.write();
        let latest = state.query(kind).generation();
        if self.stale_policy.discards(generation, latest) {
            tracing::debug!(%kind, generation, latest, "Dropping superseded response");
            return Outcome::Superseded;
        }

        let (outcome, phase) = match result {
            Ok(value) => {
                apply(&mut state, value);
                state.query_mut(kind).fulfil();
                (Outcome::Fulfilled, Phase::Idle)
            }
            Err(e) => {
                let message = e.user_message(kind.fallback_message());
                tracing::warn!(%kind, error = %e, "Request failed");
                state.query_mut(kind).reject(message.clone());
                (Outcome::Rejected(message), Phase::Error)
            }
        };
        drop(state);

        self.notify(kind, phase);
        outcome
    }

    fn notify(&self, kind: QueryKind, phase: Phase) {
        let _ = self.events.send(StateChange::Attendance(kind, phase));
    }
}
