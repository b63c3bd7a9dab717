//! Easely CLI - tiny first steps against task paralysis
//!
//! This crate provides the core functionality for the `ez` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Progress, TaskEntry, Mood, BreakdownPlan)
//! - [`ledger`] - Progress mutations: add/complete/remove, XP and levels
//! - [`stepgen`] - Mood-aware first-step and five-step suggestions
//! - [`storage`] - JSON snapshot persistence behind a store trait
//! - [`backend`] - REST client for the Easely backend
//! - [`config`] - Configuration management
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod model;
pub mod stepgen;
pub mod storage;

pub use error::{Error, Result};
