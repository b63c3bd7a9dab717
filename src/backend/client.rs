//! HTTP client for the progress backend.
//!
//! A thin typed wrapper over the six REST operations the ledger consumes.
//! No retries and no deadlines: a failed call surfaces as a typed error
//! and the caller decides what degrades.

use tracing::debug;

use super::types::{NewFocusSession, NewTask, RemoteSession, RemoteTask, StatsResponse};
use crate::error::{Error, Result};

/// Typed client for one backend base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Client for the given base URL (trailing slashes are trimmed).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Map a non-2xx response to a typed error, logging the body.
    async fn ensure_success(response: reqwest::Response, path: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(path, status = status.as_u16(), body, "backend rejected request");
        Err(Error::BackendStatus {
            status: status.as_u16(),
            path: path.to_string(),
        })
    }

    /// `GET /stats`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an
    /// unparseable body.
    pub async fn fetch_stats(&self) -> Result<StatsResponse> {
        let response = self.client.get(self.url("/stats")).send().await?;
        let response = Self::ensure_success(response, "/stats").await?;
        Ok(response.json().await?)
    }

    /// `GET /tasks/`, the pending task list.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an
    /// unparseable body.
    pub async fn fetch_tasks(&self) -> Result<Vec<RemoteTask>> {
        let response = self.client.get(self.url("/tasks/")).send().await?;
        let response = Self::ensure_success(response, "/tasks/").await?;
        Ok(response.json().await?)
    }

    /// `GET /focus-sessions`, the completed-session log.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an
    /// unparseable body.
    pub async fn fetch_sessions(&self) -> Result<Vec<RemoteSession>> {
        let response = self.client.get(self.url("/focus-sessions")).send().await?;
        let response = Self::ensure_success(response, "/focus-sessions").await?;
        Ok(response.json().await?)
    }

    /// `POST /tasks/`, creating a pending task.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn create_task(&self, task: &NewTask<'_>) -> Result<()> {
        let response = self
            .client
            .post(self.url("/tasks/"))
            .json(task)
            .send()
            .await?;
        Self::ensure_success(response, "/tasks/").await?;
        Ok(())
    }

    /// `POST /focus-sessions/`, recording a completion.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn log_session(&self, session: &NewFocusSession<'_>) -> Result<()> {
        let response = self
            .client
            .post(self.url("/focus-sessions/"))
            .json(session)
            .send()
            .await?;
        Self::ensure_success(response, "/focus-sessions/").await?;
        Ok(())
    }

    /// `DELETE /tasks/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        let path = format!("/tasks/{id}");
        let response = self.client.delete(self.url(&path)).send().await?;
        Self::ensure_success(response, &path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mood;

    #[tokio::test]
    async fn test_fetch_stats() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/stats")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"total_xp": 130, "current_level": 2, "current_streak": 4,
                    "longest_streak": 6, "last_active_date": "2025-06-02"}"#,
            )
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let stats = client.fetch_stats().await.unwrap();

        assert_eq!(stats.total_xp, 130);
        assert_eq!(stats.current_level, 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_tasks() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/tasks/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id": 7, "title": "Write report", "step": "Open your doc",
                     "mood": "Focused", "created_at": "2025-06-02T10:30:00Z"}]"#,
            )
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let tasks = client.fetch_tasks().await.unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 7);
        assert_eq!(tasks[0].mood, Mood::Focused);
    }

    #[tokio::test]
    async fn test_create_task_posts_expected_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/tasks/")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "title": "Write report",
                "step": "Open your doc",
                "mood": "Focused",
                "is_chunked": false,
            })))
            .with_status(200)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        client
            .create_task(&NewTask {
                title: "Write report",
                step: "Open your doc",
                mood: Mood::Focused,
                is_chunked: false,
                created_at: chrono::Utc::now(),
            })
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_2xx_maps_to_backend_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/tasks/7")
            .with_status(404)
            .with_body(r#"{"detail": "Task not found"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let err = client.delete_task("7").await.unwrap_err();

        match err {
            Error::BackendStatus { status, path } => {
                assert_eq!(status, 404);
                assert_eq!(path, "/tasks/7");
            }
            other => panic!("expected BackendStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_sessions_tolerates_nulls() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/focus-sessions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"task_title": "Do taxes", "chunk_title": null,
                     "mood": null, "timestamp": "2025-06-02T10:30:00Z"}]"#,
            )
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let sessions = client.fetch_sessions().await.unwrap();

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].task_title, "Do taxes");
        assert_eq!(sessions[0].chunk_title, None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = BackendClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/stats"), "http://localhost:8000/stats");
    }
}
