//! Data models for Easely.
//!
//! This module contains all domain models:
//! - Progress (root aggregate: XP, level, streak, history)
//! - TaskEntry
//! - Mood
//! - BreakdownPlan / PlanStep

pub mod breakdown;
pub mod progress;

pub use breakdown::{BreakdownPlan, PlanStep};
pub use progress::{Mood, Progress, TaskEntry, XP_PER_LEVEL};
