// attend-client/tests/common/mod.rs
// Scripted AttendanceApi for store tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use attend_client::{
    AttendanceApi, AttendanceClient, ClientError, ClientResult, MemorySessionStorage,
    SessionStorage, StalePolicy,
};
use parking_lot::Mutex;
use shared::{
    AttendanceRecord, AttendanceStatus, AttendanceSummary, Identity, LoginRequest, ManagerOverview,
    MessageResponse, MonthFilter, RegisterRequest, Role, TeamFilters,
};
use tokio::sync::{Notify, oneshot};

/// Canned reply for one call
#[derive(Debug)]
pub enum Reply {
    Identity(Identity),
    Message(String),
    Summary(AttendanceSummary),
    Records(Vec<AttendanceRecord>),
    Overview(ManagerOverview),
    Csv(String),
    Fail(ClientError),
}

impl Reply {
    /// Failure carrying a server message
    pub fn api_error(status: u16, message: &str) -> Self {
        Reply::Fail(ClientError::Api {
            status,
            message: message.to_string(),
        })
    }

    /// Failure without a server message
    pub fn server_error() -> Self {
        Reply::Fail(ClientError::Internal("boom".to_string()))
    }
}

/// A recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub endpoint: &'static str,
    pub token: Option<String>,
    pub detail: String,
}

struct Scripted {
    reply: Reply,
    gate: Option<oneshot::Receiver<()>>,
}

#[derive(Default)]
pub struct MockApi {
    replies: Mutex<HashMap<&'static str, VecDeque<Scripted>>>,
    calls: Mutex<Vec<Call>>,
    called: Notify,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, endpoint: &'static str, reply: Reply) {
        self.replies
            .lock()
            .entry(endpoint)
            .or_default()
            .push_back(Scripted { reply, gate: None });
    }

    /// Queue a reply held back until the returned sender fires (or drops)
    pub fn push_gated(&self, endpoint: &'static str, reply: Reply) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.replies
            .lock()
            .entry(endpoint)
            .or_default()
            .push_back(Scripted {
                reply,
                gate: Some(rx),
            });
        tx
    }

    pub fn calls(&self, endpoint: &str) -> Vec<Call> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.endpoint == endpoint)
            .cloned()
            .collect()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }

    /// Resolve once `endpoint` has been called at least `n` times
    pub async fn wait_for_calls(&self, endpoint: &str, n: usize) {
        loop {
            let notified = self.called.notified();
            if self.calls(endpoint).len() >= n {
                return;
            }
            notified.await;
        }
    }

    async fn reply(
        &self,
        endpoint: &'static str,
        token: Option<&str>,
        detail: String,
    ) -> ClientResult<Reply> {
        let scripted = self
            .replies
            .lock()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front);
        self.calls.lock().push(Call {
            endpoint,
            token: token.map(str::to_string),
            detail,
        });
        self.called.notify_waiters();

        let Some(Scripted { reply, gate }) = scripted else {
            return Err(ClientError::Internal(format!("no reply scripted for {endpoint}")));
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        match reply {
            Reply::Fail(e) => Err(e),
            other => Ok(other),
        }
    }
}

#[async_trait]
impl AttendanceApi for MockApi {
    async fn register(&self, profile: &RegisterRequest) -> ClientResult<Identity> {
        match self.reply("register", None, profile.email.clone()).await? {
            Reply::Identity(identity) => Ok(identity),
            other => panic!("unexpected register reply: {other:?}"),
        }
    }

    async fn login(&self, credentials: &LoginRequest) -> ClientResult<Identity> {
        match self.reply("login", None, credentials.email.clone()).await? {
            Reply::Identity(identity) => Ok(identity),
            other => panic!("unexpected login reply: {other:?}"),
        }
    }

    async fn check_in(&self, token: &str) -> ClientResult<MessageResponse> {
        match self.reply("checkin", Some(token), String::new()).await? {
            Reply::Message(msg) => Ok(MessageResponse { msg }),
            other => panic!("unexpected checkin reply: {other:?}"),
        }
    }

    async fn check_out(&self, token: &str) -> ClientResult<MessageResponse> {
        match self.reply("checkout", Some(token), String::new()).await? {
            Reply::Message(msg) => Ok(MessageResponse { msg }),
            other => panic!("unexpected checkout reply: {other:?}"),
        }
    }

    async fn my_summary(&self, token: &str) -> ClientResult<AttendanceSummary> {
        match self.reply("summary", Some(token), String::new()).await? {
            Reply::Summary(summary) => Ok(summary),
            other => panic!("unexpected summary reply: {other:?}"),
        }
    }

    async fn my_history(
        &self,
        token: &str,
        month: Option<MonthFilter>,
    ) -> ClientResult<Vec<AttendanceRecord>> {
        let detail = month.map(|m| m.to_string()).unwrap_or_default();
        match self.reply("history", Some(token), detail).await? {
            Reply::Records(records) => Ok(records),
            other => panic!("unexpected history reply: {other:?}"),
        }
    }

    async fn team_records(
        &self,
        token: &str,
        filters: &TeamFilters,
    ) -> ClientResult<Vec<AttendanceRecord>> {
        let detail = format!("{:?}", filters.query_pairs());
        match self.reply("team", Some(token), detail).await? {
            Reply::Records(records) => Ok(records),
            other => panic!("unexpected team reply: {other:?}"),
        }
    }

    async fn manager_overview(&self, token: &str) -> ClientResult<ManagerOverview> {
        match self.reply("overview", Some(token), String::new()).await? {
            Reply::Overview(overview) => Ok(overview),
            other => panic!("unexpected overview reply: {other:?}"),
        }
    }

    async fn export_team_csv(&self, token: &str, filters: &TeamFilters) -> ClientResult<String> {
        let detail = format!("{:?}", filters.query_pairs());
        match self.reply("export", Some(token), detail).await? {
            Reply::Csv(csv) => Ok(csv),
            other => panic!("unexpected export reply: {other:?}"),
        }
    }
}

// ========== Fixtures ==========

pub fn identity(id: &str, role: Role, token: &str) -> Identity {
    Identity {
        id: id.to_string(),
        name: format!("User {id}"),
        email: Some("a@b.com".to_string()),
        role,
        token: token.to_string(),
    }
}

pub fn record(id: &str, date: &str, status: AttendanceStatus) -> AttendanceRecord {
    AttendanceRecord {
        id: id.to_string(),
        date: date.to_string(),
        check_in_time: None,
        check_out_time: None,
        status,
        total_hours: 0.0,
        owner: None,
    }
}

/// Client with nothing persisted
pub fn anonymous_client(api: Arc<MockApi>, policy: StalePolicy) -> (AttendanceClient, Arc<MemorySessionStorage>) {
    let storage = Arc::new(MemorySessionStorage::new());
    let client = AttendanceClient::with_parts(api, storage.clone(), policy);
    (client, storage)
}

/// Client rehydrated with `identity`
pub fn signed_in_client(
    api: Arc<MockApi>,
    identity: &Identity,
    policy: StalePolicy,
) -> (AttendanceClient, Arc<MemorySessionStorage>) {
    let storage = Arc::new(MemorySessionStorage::new());
    storage.save(identity).unwrap();
    let client = AttendanceClient::with_parts(api, storage.clone(), policy);
    (client, storage)
}
