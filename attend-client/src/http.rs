//! HTTP transport for the attendance API
//!
//! [`AttendanceApi`] is the seam the stores talk to; [`NetworkHttpClient`] is
//! the reqwest implementation. Tests substitute their own implementation.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use shared::{
    AttendanceRecord, AttendanceSummary, Identity, LoginRequest, ManagerOverview, MessageResponse,
    MonthFilter, RegisterRequest, TeamFilters,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Attendance API operations
///
/// Authenticated calls take the bearer token explicitly; the transport holds
/// no session of its own.
#[async_trait]
pub trait AttendanceApi: Send + Sync {
    async fn register(&self, profile: &RegisterRequest) -> ClientResult<Identity>;
    async fn login(&self, credentials: &LoginRequest) -> ClientResult<Identity>;
    async fn check_in(&self, token: &str) -> ClientResult<MessageResponse>;
    async fn check_out(&self, token: &str) -> ClientResult<MessageResponse>;
    async fn my_summary(&self, token: &str) -> ClientResult<AttendanceSummary>;
    async fn my_history(
        &self,
        token: &str,
        month: Option<MonthFilter>,
    ) -> ClientResult<Vec<AttendanceRecord>>;
    async fn team_records(
        &self,
        token: &str,
        filters: &TeamFilters,
    ) -> ClientResult<Vec<AttendanceRecord>>;
    async fn manager_overview(&self, token: &str) -> ClientResult<ManagerOverview>;
    async fn export_team_csv(&self, token: &str, filters: &TeamFilters) -> ClientResult<String>;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    /// Fails with [`ClientError::Config`] unless `base_url` is an absolute http(s) URL
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = config.base_url.trim_end_matches('/');
        let parsed = Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "unsupported scheme '{}' in base URL",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(req: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => req.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token)),
            None => req,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let req = self.client.get(self.url(path)).query(query);
        let response = Self::authorized(req, Some(token)).send().await?;
        Self::handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.client.post(self.url(path)).json(body);
        let response = Self::authorized(req, token).send().await?;
        Self::handle_response(response).await
    }

    async fn error_for(response: reqwest::Response) -> ClientError {
        let status = response.status();
        match response.text().await {
            Ok(text) => ClientError::from_status(status, &text),
            Err(e) => e.into(),
        }
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        Ok(response.json().await?)
    }

    async fn handle_text(response: reqwest::Response) -> ClientResult<String> {
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl AttendanceApi for NetworkHttpClient {
    async fn register(&self, profile: &RegisterRequest) -> ClientResult<Identity> {
        tracing::debug!(email = %profile.email, "POST /api/auth/register");
        self.post("/api/auth/register", None, profile).await
    }

    async fn login(&self, credentials: &LoginRequest) -> ClientResult<Identity> {
        tracing::debug!(email = %credentials.email, "POST /api/auth/login");
        self.post("/api/auth/login", None, credentials).await
    }

    async fn check_in(&self, token: &str) -> ClientResult<MessageResponse> {
        self.post("/api/attendance/checkin", Some(token), &serde_json::json!({}))
            .await
    }

    async fn check_out(&self, token: &str) -> ClientResult<MessageResponse> {
        self.post("/api/attendance/checkout", Some(token), &serde_json::json!({}))
            .await
    }

    async fn my_summary(&self, token: &str) -> ClientResult<AttendanceSummary> {
        self.get("/api/attendance/my-summary", token, &[]).await
    }

    async fn my_history(
        &self,
        token: &str,
        month: Option<MonthFilter>,
    ) -> ClientResult<Vec<AttendanceRecord>> {
        let query: Vec<(&str, String)> = month
            .map(|m| vec![("month", m.to_string())])
            .unwrap_or_default();
        self.get("/api/attendance/my-history", token, &query).await
    }

    async fn team_records(
        &self,
        token: &str,
        filters: &TeamFilters,
    ) -> ClientResult<Vec<AttendanceRecord>> {
        self.get("/api/attendance/all", token, &filters.query_pairs())
            .await
    }

    async fn manager_overview(&self, token: &str) -> ClientResult<ManagerOverview> {
        self.get("/api/dashboard/manager", token, &[]).await
    }

    async fn export_team_csv(&self, token: &str, filters: &TeamFilters) -> ClientResult<String> {
        let req = self
            .client
            .get(self.url("/api/attendance/export"))
            .query(&filters.query_pairs())
            .header(reqwest::header::ACCEPT, "text/csv");
        let response = Self::authorized(req, Some(token)).send().await?;
        Self::handle_text(response).await
    }
}
