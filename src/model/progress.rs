//! Progress model for Easely.
//!
//! `Progress` is the root aggregate the ledger owns: XP, level, streak,
//! and the pending task history. It is pure data; all mutation goes
//! through the ledger.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// XP threshold at which `xp` wraps and `level` increments.
pub const XP_PER_LEVEL: u32 = 50;

/// Mood values driving step generation.
///
/// Serialized with the wire strings the snapshot and backend use
/// (`"Low Energy"`, `"Stressed"`, `"Focused"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "Low Energy")]
    LowEnergy,
    Stressed,
    Focused,
}

impl Mood {
    /// Wire string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LowEnergy => "Low Energy",
            Self::Stressed => "Stressed",
            Self::Focused => "Focused",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mood {
    type Err = Error;

    /// Parse a mood, ignoring case and `-`/`_`/space separators
    /// (`low-energy`, `Low Energy`, and `LOW_ENERGY` all parse).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "lowenergy" => Ok(Self::LowEnergy),
            "stressed" => Ok(Self::Stressed),
            "focused" => Ok(Self::Focused),
            _ => Err(Error::InvalidMood {
                value: s.to_string(),
            }),
        }
    }
}

/// A pending task in the progress history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEntry {
    /// Stable identity. Locally issued (`task_` prefix) or the backend's
    /// integer id rendered as a string. Lookups always key on this,
    /// never on position.
    pub id: String,

    /// The user's goal text.
    pub title: String,

    /// The generated actionable first step.
    pub step: String,

    /// Mood the task was captured under.
    pub mood: Mood,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TaskEntry {
    /// Create a task entry with a fresh locally-issued id.
    pub fn new(title: String, step: String, mood: Mood) -> Self {
        let id = format!("task_{}", &uuid::Uuid::new_v4().to_string()[..12]);

        Self {
            id,
            title,
            step,
            mood,
            created_at: Utc::now(),
        }
    }
}

/// The progress aggregate.
///
/// Invariants (maintained by the ledger, not this type):
/// - `0 <= xp < XP_PER_LEVEL`
/// - `level >= 1`, never decreases for the lifetime of an instance
/// - `history` is most-recent-first and has no duplicate ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Points accumulated since the last level-up.
    pub xp: u32,

    /// Current level, starts at 1.
    pub level: u32,

    /// Consecutive active days. Maintained by the backend stats source;
    /// never recomputed client-side.
    pub streak: u32,

    /// Last day an activity was recorded, if any.
    #[serde(rename = "lastDate")]
    pub last_date: Option<NaiveDate>,

    /// Pending tasks, most recent first.
    pub history: Vec<TaskEntry>,
}

impl Default for Progress {
    /// The documented zero-state: `{xp: 0, level: 1, streak: 0,
    /// lastDate: null, history: []}`.
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            streak: 0,
            last_date: None,
            history: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_state_default() {
        let p = Progress::default();
        assert_eq!(p.xp, 0);
        assert_eq!(p.level, 1);
        assert_eq!(p.streak, 0);
        assert_eq!(p.last_date, None);
        assert!(p.history.is_empty());
    }

    #[test]
    fn test_mood_parsing() {
        assert_eq!("low-energy".parse::<Mood>().unwrap(), Mood::LowEnergy);
        assert_eq!("Low Energy".parse::<Mood>().unwrap(), Mood::LowEnergy);
        assert_eq!("LOW_ENERGY".parse::<Mood>().unwrap(), Mood::LowEnergy);
        assert_eq!("stressed".parse::<Mood>().unwrap(), Mood::Stressed);
        assert_eq!("Focused".parse::<Mood>().unwrap(), Mood::Focused);
        assert!("sleepy".parse::<Mood>().is_err());
    }

    #[test]
    fn test_mood_wire_strings() {
        assert_eq!(
            serde_json::to_string(&Mood::LowEnergy).unwrap(),
            "\"Low Energy\""
        );
        assert_eq!(
            serde_json::from_str::<Mood>("\"Stressed\"").unwrap(),
            Mood::Stressed
        );
    }

    #[test]
    fn test_new_task_entry() {
        let entry = TaskEntry::new(
            "Write report".to_string(),
            "Open your doc".to_string(),
            Mood::Focused,
        );

        assert!(entry.id.starts_with("task_"));
        assert_eq!(entry.title, "Write report");
        assert_eq!(entry.step, "Open your doc");
        assert_eq!(entry.mood, Mood::Focused);
    }

    #[test]
    fn test_snapshot_wire_names() {
        let p = Progress::default();
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("lastDate").is_some());
        assert_eq!(json["xp"], 0);
        assert_eq!(json["level"], 1);
        assert_eq!(json["history"], serde_json::json!([]));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut p = Progress::default();
        p.xp = 40;
        p.level = 3;
        p.history.push(TaskEntry::new(
            "Clean desk".to_string(),
            "Take one minute to gather your tools.".to_string(),
            Mood::LowEnergy,
        ));

        let json = serde_json::to_string(&p).unwrap();
        let back: Progress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
