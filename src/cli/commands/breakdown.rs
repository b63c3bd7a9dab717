//! Breakdown command implementation.
//!
//! Five small steps for one big task. One plan at a time, stored on
//! this device only; finishing a plan awards no XP.

use crate::cli::BreakdownCommands;
use crate::error::{Error, Result};
use crate::model::{BreakdownPlan, Mood};
use crate::stepgen;
use crate::storage::LocalStore;
use colored::Colorize;
use serde::Serialize;

/// Output for breakdown start/show.
#[derive(Serialize)]
struct PlanOutput<'a> {
    plan: &'a BreakdownPlan,
    completed: usize,
    total: usize,
    finished: bool,
}

/// Output for breakdown done.
#[derive(Serialize)]
struct DoneOutput<'a> {
    step_completed: Option<u32>,
    next_step: Option<&'a str>,
    completed: usize,
    total: usize,
    finished: bool,
}

/// Output for breakdown reset.
#[derive(Serialize)]
struct ResetOutput {
    cleared: bool,
}

/// Execute a breakdown subcommand.
///
/// # Errors
///
/// Returns an error for an empty task, an unknown mood, a missing plan,
/// or a failed plan write.
pub fn execute(command: &BreakdownCommands, json: bool) -> Result<()> {
    let store = LocalStore::open();
    match command {
        BreakdownCommands::Start { task, mood, force } => start(&store, task, mood, *force, json),
        BreakdownCommands::Show => show(&store, json),
        BreakdownCommands::Done => done(&store, json),
        BreakdownCommands::Reset => reset(&store, json),
    }
}

fn start(store: &LocalStore, task: &str, mood: &str, force: bool, json: bool) -> Result<()> {
    let task = task.trim();
    if task.is_empty() {
        return Err(Error::InvalidArgument("task must not be empty".to_string()));
    }
    let mood: Mood = mood.parse()?;

    // A finished plan can be replaced freely; an unfinished one needs --force
    if !force {
        if let Some(existing) = store.load_plan() {
            if !existing.is_finished() {
                return Err(Error::InvalidArgument(format!(
                    "a plan for \"{}\" is already in progress (pass --force to replace it)",
                    existing.big_task
                )));
            }
        }
    }

    let steps = stepgen::breakdown_steps(task, mood);
    let plan = BreakdownPlan::new(task.to_string(), mood, steps);
    persist(store, &plan)?;

    if json {
        return print_plan_json(&plan);
    }

    print_header(&plan);
    println!();
    print_steps(&plan);
    println!();
    println!("Do just step 1. Then: {}", "ez breakdown done".cyan());
    Ok(())
}

fn show(store: &LocalStore, json: bool) -> Result<()> {
    let plan = store.load_plan().ok_or(Error::PlanNotFound)?;

    if json {
        return print_plan_json(&plan);
    }

    print_header(&plan);
    println!();
    print_steps(&plan);
    println!();
    if plan.is_finished() {
        println!("All {} steps done. You did it!", plan.steps.len());
    } else {
        println!(
            "{} of {} done. Next: {}",
            plan.completed_count(),
            plan.steps.len(),
            "ez breakdown done".cyan()
        );
    }
    Ok(())
}

fn done(store: &LocalStore, json: bool) -> Result<()> {
    let mut plan = store.load_plan().ok_or(Error::PlanNotFound)?;

    let completed_id = plan.complete_current();
    if completed_id.is_some() {
        persist(store, &plan)?;
    }

    let next = if plan.is_finished() {
        None
    } else {
        plan.current().map(|s| s.description.as_str())
    };

    if json {
        let output = DoneOutput {
            step_completed: completed_id,
            next_step: next,
            completed: plan.completed_count(),
            total: plan.steps.len(),
            finished: plan.is_finished(),
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    match completed_id {
        None => {
            println!("Plan is already finished.");
            println!(
                "  Start the next one with: {}",
                "ez breakdown start \"...\"".cyan()
            );
        }
        Some(id) if plan.is_finished() => {
            println!("{} Step {id} done.", "✓".green());
            println!(
                "{}",
                format!("All {} steps done. You did it!", plan.steps.len())
                    .yellow()
                    .bold()
            );
        }
        Some(id) => {
            println!("{} Step {id} done.", "✓".green());
            if let Some(next) = next {
                println!("  Next: {}", next.cyan());
            }
        }
    }
    Ok(())
}

fn reset(store: &LocalStore, json: bool) -> Result<()> {
    let existed = store.load_plan().is_some();
    if existed && !store.clear_plan().is_saved() {
        return Err(Error::Other(
            "could not clear the breakdown plan".to_string(),
        ));
    }

    if json {
        println!("{}", serde_json::to_string(&ResetOutput { cleared: existed })?);
        return Ok(());
    }

    if existed {
        println!("Plan cleared.");
    } else {
        println!("No plan in progress.");
    }
    Ok(())
}

fn persist(store: &LocalStore, plan: &BreakdownPlan) -> Result<()> {
    let status = store.save_plan(plan);
    if status.is_saved() {
        Ok(())
    } else {
        Err(Error::Other(format!(
            "could not persist the breakdown plan (status: {})",
            status.as_str()
        )))
    }
}

fn print_plan_json(plan: &BreakdownPlan) -> Result<()> {
    let output = PlanOutput {
        plan,
        completed: plan.completed_count(),
        total: plan.steps.len(),
        finished: plan.is_finished(),
    };
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn print_header(plan: &BreakdownPlan) {
    println!(
        "Plan: {} {}",
        plan.big_task.bold(),
        format!("[{}]", plan.mood).dimmed()
    );
}

fn print_steps(plan: &BreakdownPlan) {
    for (i, step) in plan.steps.iter().enumerate() {
        if step.completed {
            println!("  {} {}. {}", "✓".green(), step.id, step.description.dimmed());
        } else if i == plan.current_step {
            println!("  {} {}. {}", "→".cyan(), step.id, step.description.bold());
        } else {
            println!("    {}. {}", step.id, step.description);
        }
    }
}
