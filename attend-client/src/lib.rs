//! attend-client - Client core for the employee attendance API
//!
//! # Layout
//!
//! - [`http`]: the [`AttendanceApi`] seam and its reqwest implementation
//! - [`session`]: authenticated identity, login/register/logout
//! - [`attendance`]: check-in/out, personal and team queries
//! - [`route`]: role-based view authorization
//! - [`storage`]: persisted identity record
//!
//! # Example
//!
//! ```no_run
//! use attend_client::{AttendanceClient, ClientConfig};
//! use shared::LoginRequest;
//!
//! # async fn run() -> Result<(), attend_client::ClientError> {
//! let client = AttendanceClient::from_config(&ClientConfig::from_env())?;
//! client.session().login(&LoginRequest::new("a@b.com", "x")).await;
//! if client.session().is_authenticated() {
//!     client.attendance().fetch_summary().await;
//! }
//! # Ok(())
//! # }
//! ```

pub mod attendance;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod route;
pub mod session;
pub mod storage;
pub mod types;

pub use attendance::{AttendanceState, AttendanceStore};
pub use client::AttendanceClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{AttendanceApi, NetworkHttpClient};
pub use route::{Route, RouteDecision, RoleRoutes, authorize, resolve};
pub use session::{SessionState, SessionStore};
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
pub use types::{Outcome, Phase, QueryKind, QueryState, StalePolicy, StateChange};
