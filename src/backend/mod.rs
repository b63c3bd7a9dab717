//! Progress backend client.
//!
//! Remote-backed mode speaks to a small REST service:
//! three reads (`/stats`, `/tasks/`, `/focus-sessions`) and three writes
//! (create task, log completion, delete task). The service owns all
//! derived stats; see [`crate::ledger`] for the resync policy.

pub mod client;
pub mod types;

pub use client::BackendClient;
pub use types::{NewFocusSession, NewTask, RemoteSession, RemoteTask, StatsResponse};
