//! Wire types for the progress backend.
//!
//! These mirror the backend's REST contract exactly; the ledger maps them
//! into [`crate::model`] types and applies the stats derivation
//! (`xp = total_xp % 50`) on every read.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Mood;

/// `GET /stats` response.
///
/// `total_xp` is cumulative and server-owned; clients store only its
/// remainder modulo the level threshold.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    pub total_xp: u64,
    pub current_level: u32,
    pub current_streak: u32,
    #[serde(default)]
    pub last_active_date: Option<NaiveDate>,
}

/// One entry of the `GET /tasks/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteTask {
    pub id: i64,
    pub title: String,
    pub step: String,
    pub mood: Mood,
    pub created_at: DateTime<Utc>,
}

/// One entry of the `GET /focus-sessions` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSession {
    pub task_title: String,
    #[serde(default)]
    pub chunk_title: Option<String>,
    #[serde(default)]
    pub mood: Option<Mood>,
    pub timestamp: DateTime<Utc>,
}

/// `POST /tasks/` request body.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask<'a> {
    pub title: &'a str,
    pub step: &'a str,
    pub mood: Mood,
    pub is_chunked: bool,
    pub created_at: DateTime<Utc>,
}

/// `POST /focus-sessions/` request body.
#[derive(Debug, Clone, Serialize)]
pub struct NewFocusSession<'a> {
    pub task_title: &'a str,
    pub chunk_title: &'a str,
    pub duration: u32,
    pub xp_earned: u32,
    pub mood: Mood,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_response_parses_null_date() {
        let json = r#"{
            "total_xp": 130,
            "current_level": 2,
            "current_streak": 4,
            "longest_streak": 6,
            "last_active_date": null
        }"#;

        let stats: StatsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_xp, 130);
        assert_eq!(stats.current_level, 2);
        assert_eq!(stats.current_streak, 4);
        assert_eq!(stats.last_active_date, None);
    }

    #[test]
    fn test_stats_response_parses_date() {
        let json = r#"{
            "total_xp": 50,
            "current_level": 1,
            "current_streak": 1,
            "last_active_date": "2025-06-02"
        }"#;

        let stats: StatsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            stats.last_active_date.unwrap().to_string(),
            "2025-06-02".to_string()
        );
    }

    #[test]
    fn test_remote_session_tolerates_missing_optionals() {
        let json = r#"{
            "task_title": "Write report",
            "timestamp": "2025-06-02T10:30:00Z"
        }"#;

        let session: RemoteSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.chunk_title, None);
        assert_eq!(session.mood, None);
    }

    #[test]
    fn test_new_task_body_shape() {
        let task = NewTask {
            title: "Write report",
            step: "Open your doc and write the first sentence.",
            mood: Mood::Focused,
            is_chunked: false,
            created_at: "2025-06-02T10:30:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["title"], "Write report");
        assert_eq!(json["mood"], "Focused");
        assert_eq!(json["is_chunked"], false);
        assert!(json.get("created_at").is_some());
    }
}
