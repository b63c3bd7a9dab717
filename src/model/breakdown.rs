//! Breakdown plan model for Easely.
//!
//! A breakdown plan splits one big task into five sequential steps worked
//! through a cursor. Plans live beside (not inside) `Progress`: finishing
//! a plan awards no XP and never touches the ledger history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::progress::Mood;

/// One step of a breakdown plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    /// 1-based position, stable for the plan's lifetime.
    pub id: u32,

    /// What to do.
    pub description: String,

    /// Whether the step has been completed.
    pub completed: bool,
}

/// A big task broken into sequential steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownPlan {
    /// The big task being broken down.
    pub big_task: String,

    /// Mood the plan was generated under.
    pub mood: Mood,

    /// The generated steps, in order.
    pub steps: Vec<PlanStep>,

    /// Index of the step currently being worked.
    pub current_step: usize,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl BreakdownPlan {
    /// Create a plan from generated step descriptions.
    pub fn new(big_task: String, mood: Mood, descriptions: Vec<String>) -> Self {
        let steps = descriptions
            .into_iter()
            .enumerate()
            .map(|(i, description)| PlanStep {
                id: u32::try_from(i).unwrap_or(u32::MAX).saturating_add(1),
                description,
                completed: false,
            })
            .collect();

        Self {
            big_task,
            mood,
            steps,
            current_step: 0,
            created_at: Utc::now(),
        }
    }

    /// The step under the cursor, if the plan has any steps.
    #[must_use]
    pub fn current(&self) -> Option<&PlanStep> {
        self.steps.get(self.current_step)
    }

    /// Mark the current step completed and advance the cursor, unless
    /// this was the final step. Returns the completed step's id, or
    /// `None` if there was nothing left to complete.
    pub fn complete_current(&mut self) -> Option<u32> {
        let last = self.steps.len().checked_sub(1)?;
        let step = self.steps.get_mut(self.current_step)?;
        if step.completed {
            return None;
        }
        step.completed = true;
        let id = step.id;

        if self.current_step < last {
            self.current_step += 1;
        }
        Some(id)
    }

    /// Whether every step is completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !self.steps.is_empty() && self.steps.iter().all(|s| s.completed)
    }

    /// Count of completed steps.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> BreakdownPlan {
        BreakdownPlan::new(
            "Write thesis".to_string(),
            Mood::Focused,
            vec![
                "one".to_string(),
                "two".to_string(),
                "three".to_string(),
                "four".to_string(),
                "five".to_string(),
            ],
        )
    }

    #[test]
    fn test_new_plan_numbers_steps() {
        let p = plan();
        assert_eq!(p.steps.len(), 5);
        assert_eq!(p.steps[0].id, 1);
        assert_eq!(p.steps[4].id, 5);
        assert_eq!(p.current_step, 0);
        assert!(!p.is_finished());
    }

    #[test]
    fn test_complete_advances_cursor() {
        let mut p = plan();
        assert_eq!(p.complete_current(), Some(1));
        assert_eq!(p.current_step, 1);
        assert_eq!(p.current().unwrap().description, "two");
    }

    #[test]
    fn test_final_step_does_not_advance() {
        let mut p = plan();
        for _ in 0..4 {
            p.complete_current();
        }
        assert_eq!(p.current_step, 4);
        assert_eq!(p.complete_current(), Some(5));
        assert_eq!(p.current_step, 4);
        assert!(p.is_finished());
        assert_eq!(p.complete_current(), None);
    }

    #[test]
    fn test_completed_count() {
        let mut p = plan();
        assert_eq!(p.completed_count(), 0);
        p.complete_current();
        p.complete_current();
        assert_eq!(p.completed_count(), 2);
    }
}
