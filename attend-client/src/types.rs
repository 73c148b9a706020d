//! Phase and request-tracking types shared by the stores.
//!
//! Every asynchronous operation moves its [`QueryState`] from `Idle` or
//! `Error` to `Pending` and back to a terminal phase. Each start bumps a
//! per-kind generation so a response can tell whether it still belongs to
//! the latest request of its kind.

use std::fmt;
use std::str::FromStr;

// ============================================================================
// Phase
// ============================================================================

/// Lifecycle of an asynchronous operation. Fulfilled collapses into `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Error,
}

impl Phase {
    pub fn is_pending(&self) -> bool {
        matches!(self, Phase::Pending)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Phase::Error)
    }
}

// ============================================================================
// Query kinds
// ============================================================================

/// Attendance operations tracked independently of each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    CheckIn,
    CheckOut,
    Summary,
    History,
    Team,
    Overview,
    Export,
}

impl QueryKind {
    pub const ALL: [QueryKind; 7] = [
        QueryKind::CheckIn,
        QueryKind::CheckOut,
        QueryKind::Summary,
        QueryKind::History,
        QueryKind::Team,
        QueryKind::Overview,
        QueryKind::Export,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::CheckIn => "check_in",
            QueryKind::CheckOut => "check_out",
            QueryKind::Summary => "summary",
            QueryKind::History => "history",
            QueryKind::Team => "team",
            QueryKind::Overview => "overview",
            QueryKind::Export => "export",
        }
    }

    /// Message recorded when the server gives no reason of its own
    pub fn fallback_message(&self) -> &'static str {
        match self {
            QueryKind::CheckIn => "Check-in failed",
            QueryKind::CheckOut => "Check-out failed",
            QueryKind::Summary => "Failed to fetch summary",
            QueryKind::History => "Failed to fetch history",
            QueryKind::Team => "Failed to fetch all attendance",
            QueryKind::Overview => "Failed to fetch dashboard stats",
            QueryKind::Export => "CSV export failed",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Query state
// ============================================================================

/// Phase tracking for one operation kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub phase: Phase,
    /// Description of the most recent failure
    pub last_error: Option<String>,
    generation: u64,
}

impl QueryState {
    /// Latest request number issued for this kind
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The failure message while the phase is `Error`
    pub fn error_message(&self) -> Option<&str> {
        if self.phase.is_error() {
            self.last_error.as_deref()
        } else {
            None
        }
    }

    pub(crate) fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.phase = Phase::Pending;
        self.generation
    }

    pub(crate) fn fulfil(&mut self) {
        self.phase = Phase::Idle;
    }

    pub(crate) fn reject(&mut self, message: String) {
        self.phase = Phase::Error;
        self.last_error = Some(message);
    }

    pub(crate) fn clear(&mut self) {
        self.phase = Phase::Idle;
        self.last_error = None;
    }
}

// ============================================================================
// Outcome and stale handling
// ============================================================================

/// How an operation instance ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Response applied; phase is `Idle`
    Fulfilled,
    /// Failure recorded; phase is `Error`
    Rejected(String),
    /// A newer request of the same kind was issued; response dropped
    Superseded,
}

impl Outcome {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Outcome::Fulfilled)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Rejected(message) => Some(message),
            _ => None,
        }
    }
}

/// What to do with a response whose request has been superseded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Drop responses older than the latest request of their kind
    #[default]
    DiscardStale,
    /// Apply every response in arrival order
    LastResponseWins,
}

impl StalePolicy {
    pub(crate) fn discards(&self, generation: u64, latest: u64) -> bool {
        matches!(self, StalePolicy::DiscardStale) && generation != latest
    }
}

impl FromStr for StalePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard" | "discard-stale" => Ok(StalePolicy::DiscardStale),
            "last-wins" | "last-response-wins" => Ok(StalePolicy::LastResponseWins),
            other => Err(format!("unknown stale policy: {other}")),
        }
    }
}

// ============================================================================
// Change notifications
// ============================================================================

/// Broadcast after every state transition; read a fresh snapshot on receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Session(Phase),
    Attendance(QueryKind, Phase),
}
