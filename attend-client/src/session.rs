//! SessionStore - authenticated identity and auth transitions
//!
//! Holds who is logged in and the phase of the latest login/registration.
//! Login and registration run `pending -> idle | error`; logout and reset are
//! local and immediate. A successful auth call writes the identity to the
//! [`SessionStorage`] port, logout erases it, and construction rehydrates
//! from it.

use std::sync::Arc;

use parking_lot::RwLock;
use shared::{Identity, LoginRequest, RegisterRequest};
use tokio::sync::broadcast;

use crate::error::{ClientError, ClientResult};
use crate::http::AttendanceApi;
use crate::storage::SessionStorage;
use crate::types::{Outcome, Phase, StalePolicy, StateChange};

/// Change notification channel capacity
pub(crate) const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Snapshot of the session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// `None` means unauthenticated
    pub identity: Option<Identity>,
    pub phase: Phase,
    /// Last failure description, cleared by `reset`
    pub error_message: Option<String>,
    pub(crate) generation: u64,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.token.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
enum AuthOp {
    Login,
    Register,
}

impl AuthOp {
    fn fallback_message(self) -> &'static str {
        match self {
            AuthOp::Login => "Login failed",
            AuthOp::Register => "Registration failed",
        }
    }

    /// Server message, else the transport's description, else the fallback
    fn failure_message(self, err: &ClientError) -> String {
        if let Some(message) = err.server_message() {
            return message.to_string();
        }
        if err.is_transport() {
            return err.to_string();
        }
        self.fallback_message().to_string()
    }
}

/// Session store
pub struct SessionStore {
    api: Arc<dyn AttendanceApi>,
    storage: Arc<dyn SessionStorage>,
    state: RwLock<SessionState>,
    stale_policy: StalePolicy,
    events: broadcast::Sender<StateChange>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("storage", &self.storage)
            .field("authenticated", &self.is_authenticated())
            .field("stale_policy", &self.stale_policy)
            .finish()
    }
}

impl SessionStore {
    /// Create a store, rehydrating the identity from `storage`
    pub fn new(
        api: Arc<dyn AttendanceApi>,
        storage: Arc<dyn SessionStorage>,
        stale_policy: StalePolicy,
    ) -> Self {
        let identity = Self::load_persisted(storage.as_ref());
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api,
            storage,
            state: RwLock::new(SessionState {
                identity,
                ..SessionState::default()
            }),
            stale_policy,
            events,
        }
    }

    fn load_persisted(storage: &dyn SessionStorage) -> Option<Identity> {
        match storage.load() {
            Ok(Some(identity)) => {
                tracing::info!(user_id = %identity.id, role = %identity.role, "Restored persisted session");
                Some(identity)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Ignoring unreadable persisted session: {}", e);
                None
            }
        }
    }

    /// Re-read the persisted identity, replacing the in-memory one.
    ///
    /// Returns whether a valid record was found.
    pub fn restore(&self) -> bool {
        let identity = Self::load_persisted(self.storage.as_ref());
        let restored = identity.is_some();
        let phase = {
            let mut state = self.state.write();
            state.identity = identity;
            state.phase
        };
        self.notify(phase);
        restored
    }

    // ========== Reads ==========

    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.read().identity.clone()
    }

    /// Current bearer token
    pub fn token(&self) -> Option<String> {
        self.state.read().token().map(str::to_string)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    pub fn phase(&self) -> Phase {
        self.state.read().phase
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.events.subscribe()
    }

    // ========== Auth transitions ==========

    pub async fn register(&self, profile: &RegisterRequest) -> Outcome {
        let generation = self.begin();
        let result = self.api.register(profile).await;
        self.settle(AuthOp::Register, generation, result)
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Outcome {
        let generation = self.begin();
        let result = self.api.login(credentials).await;
        self.settle(AuthOp::Login, generation, result)
    }

    /// Forget the session locally and in storage. Never fails.
    pub fn logout(&self) {
        if let Err(e) = self.storage.clear() {
            tracing::warn!("Failed to clear persisted session: {}", e);
        }
        let phase = {
            let mut state = self.state.write();
            // in-flight auth calls must not bring the session back
            state.generation += 1;
            state.identity = None;
            if state.phase.is_pending() {
                state.phase = Phase::Idle;
            }
            state.phase
        };
        tracing::info!("Logged out");
        self.notify(phase);
    }

    /// Clear phase and error without touching the identity
    pub fn reset(&self) {
        {
            let mut state = self.state.write();
            state.phase = Phase::Idle;
            state.error_message = None;
        }
        self.notify(Phase::Idle);
    }

    fn begin(&self) -> u64 {
        let generation = {
            let mut state = self.state.write();
            state.generation += 1;
            state.phase = Phase::Pending;
            state.generation
        };
        self.notify(Phase::Pending);
        generation
    }

    fn settle(&self, op: AuthOp, generation: u64, result: ClientResult<Identity>) -> Outcome {
        let mut state = self.state.write();
        if self.stale_policy.discards(generation, state.generation) {
            tracing::debug!(?op, generation, latest = state.generation, "Dropping superseded auth response");
            return Outcome::Superseded;
        }

        let (outcome, phase) = match result {
            Ok(identity) => {
                tracing::info!(user_id = %identity.id, role = %identity.role, ?op, "Authenticated");
                if let Err(e) = self.storage.save(&identity) {
                    tracing::warn!("Failed to persist session: {}", e);
                }
                state.identity = Some(identity);
                state.phase = Phase::Idle;
                (Outcome::Fulfilled, Phase::Idle)
            }
            Err(e) => {
                let message = op.failure_message(&e);
                tracing::warn!(?op, error = %e, "Authentication failed");
                state.identity = None;
                state.phase = Phase::Error;
                state.error_message = Some(message.clone());
                (Outcome::Rejected(message), Phase::Error)
            }
        };
        drop(state);

        self.notify(phase);
        outcome
    }

    fn notify(&self, phase: Phase) {
        // no subscribers is fine
        let _ = self.events.send(StateChange::Session(phase));
    }
}
