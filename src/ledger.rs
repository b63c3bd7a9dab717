//! The progress ledger.
//!
//! Owns the canonical [`Progress`] aggregate and every mutation of it:
//! - `add_task` prepends to history; no XP change.
//! - `complete_task` removes exactly one entry and awards XP, wrapping
//!   into a level-up at [`XP_PER_LEVEL`].
//! - `remove_task` discards an entry with no award.
//!
//! Two modes behind one API:
//! - **Local**: mutate in place, persist through the [`ProgressStore`].
//! - **Remote**: write to the backend, then resync wholesale from
//!   authoritative reads. Server-computed xp/level/streak always win;
//!   the local aggregate is a read-through cache. A failed write leaves
//!   the in-memory state untouched.
//!
//! One ledger instance per process, mutated only through `&mut self`.
//! No locks, no background work.

use tracing::{debug, warn};

use crate::backend::{
    BackendClient, NewFocusSession, NewTask, RemoteSession, RemoteTask, StatsResponse,
};
use crate::error::{Error, Result};
use crate::model::{Mood, Progress, TaskEntry, XP_PER_LEVEL};
use crate::storage::{ProgressStore, SaveStatus};

/// XP awarded for one completed task.
pub const XP_PER_COMPLETION: u32 = 10;

/// Minutes recorded on a remote focus-session entry.
const SESSION_DURATION_MIN: u32 = 5;

/// Which source populated the ledger at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationSource {
    Remote,
    Local,
}

impl HydrationSource {
    /// Lowercase string form for output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
        }
    }
}

/// Receipt for a completed task.
#[derive(Debug, Clone)]
pub struct Completion {
    /// The entry that left the history.
    pub task: TaskEntry,
    /// Fixed award, see [`XP_PER_COMPLETION`].
    pub xp_awarded: u32,
    /// Whether the award carried into a level-up.
    pub leveled_up: bool,
    /// False when a remote resync failed after the write and the local
    /// view may lag the server.
    pub synced: bool,
}

/// The progress controller.
pub struct Ledger {
    progress: Progress,
    store: Box<dyn ProgressStore>,
    backend: Option<BackendClient>,
    source: HydrationSource,
}

impl Ledger {
    /// Local-only ledger, hydrated from the store.
    #[must_use]
    pub fn open_local(store: Box<dyn ProgressStore>) -> Self {
        let progress = store.load();
        Self {
            progress,
            store,
            backend: None,
            source: HydrationSource::Local,
        }
    }

    /// Ledger with a backend attached but not yet hydrated from it.
    ///
    /// Starts from the local snapshot; call [`Ledger::resync`] to pull
    /// server truth and surface the error if the pull fails.
    #[must_use]
    pub fn with_backend(store: Box<dyn ProgressStore>, client: BackendClient) -> Self {
        let progress = store.load();
        Self {
            progress,
            store,
            backend: Some(client),
            source: HydrationSource::Local,
        }
    }

    /// Ledger hydrated from the backend when one is configured.
    ///
    /// Stats and task list are fetched concurrently. On any fetch or
    /// parse failure the ledger falls back to the local snapshot and
    /// records [`HydrationSource::Local`]; the failure is logged, never
    /// raised. A successful remote hydration is mirrored into the store
    /// so the offline fallback stays fresh.
    pub async fn bootstrap(store: Box<dyn ProgressStore>, backend: Option<BackendClient>) -> Self {
        let Some(client) = backend else {
            return Self::open_local(store);
        };

        match Self::hydrate(&client).await {
            Ok(progress) => {
                let status = store.save(&progress);
                if !status.is_saved() {
                    debug!(status = status.as_str(), "snapshot mirror not persisted");
                }
                Self {
                    progress,
                    store,
                    backend: Some(client),
                    source: HydrationSource::Remote,
                }
            }
            Err(e) => {
                warn!(error = %e, "remote hydration failed; using local snapshot");
                let progress = store.load();
                Self {
                    progress,
                    store,
                    backend: Some(client),
                    source: HydrationSource::Local,
                }
            }
        }
    }

    /// Fetch stats and pending tasks concurrently and assemble a
    /// `Progress` from them.
    async fn hydrate(client: &BackendClient) -> Result<Progress> {
        let (stats, tasks) = tokio::join!(client.fetch_stats(), client.fetch_tasks());
        Ok(Self::assemble(stats?, tasks?))
    }

    /// Apply the stats derivation and map pending tasks into history.
    ///
    /// `xp` keeps only the remainder of the server's cumulative total;
    /// level and streak are taken verbatim. History is ordered most
    /// recent first regardless of how the backend returned it.
    fn assemble(stats: StatsResponse, tasks: Vec<RemoteTask>) -> Progress {
        let mut history: Vec<TaskEntry> = tasks
            .into_iter()
            .map(|t| TaskEntry {
                id: t.id.to_string(),
                title: t.title,
                step: t.step,
                mood: t.mood,
                created_at: t.created_at,
            })
            .collect();
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Progress {
            xp: u32::try_from(stats.total_xp % u64::from(XP_PER_LEVEL)).unwrap_or_default(),
            level: stats.current_level,
            streak: stats.current_streak,
            last_date: stats.last_active_date,
            history,
        }
    }

    /// Replace the aggregate after a successful resync and mirror it.
    fn replace(&mut self, progress: Progress) {
        self.progress = progress;
        let status = self.store.save(&self.progress);
        if !status.is_saved() {
            debug!(status = status.as_str(), "snapshot mirror not persisted");
        }
    }

    /// The current aggregate.
    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Which source populated the ledger at startup.
    #[must_use]
    pub const fn source(&self) -> HydrationSource {
        self.source
    }

    /// Whether a backend is attached.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.backend.is_some()
    }

    /// A read-only prefix of history: the `min(limit, len)` most recent
    /// tasks. Pure.
    #[must_use]
    pub fn recent_tasks(&self, limit: usize) -> &[TaskEntry] {
        let n = limit.min(self.progress.history.len());
        &self.progress.history[..n]
    }

    /// Persist the current snapshot through the store, best-effort.
    pub fn save(&self) -> SaveStatus {
        self.store.save(&self.progress)
    }

    /// Prepend a new task to history. No XP, level, or streak change.
    ///
    /// Remote mode posts the task and resyncs from authoritative reads;
    /// the returned entry carries the server-issued id.
    ///
    /// # Errors
    ///
    /// Remote mode: the create or the following resync failed. The
    /// in-memory state is unchanged when the create itself failed.
    pub async fn add_task(&mut self, title: &str, step: &str, mood: Mood) -> Result<TaskEntry> {
        match &self.backend {
            Some(client) => {
                let created_at = chrono::Utc::now();
                client
                    .create_task(&NewTask {
                        title,
                        step,
                        mood,
                        is_chunked: false,
                        created_at,
                    })
                    .await?;

                let progress = Self::hydrate(client).await?;
                self.replace(progress);

                self.progress
                    .history
                    .iter()
                    .find(|t| t.title == title && t.step == step)
                    .cloned()
                    .ok_or_else(|| {
                        Error::Other("backend did not list the created task".to_string())
                    })
            }
            None => {
                let entry = TaskEntry::new(title.to_string(), step.to_string(), mood);
                self.progress.history.insert(0, entry.clone());
                self.persist_local("add_task");
                Ok(entry)
            }
        }
    }

    /// Complete the task with the given id (or unique id prefix).
    ///
    /// Local mode: remove the entry, award [`XP_PER_COMPLETION`], wrap
    /// at [`XP_PER_LEVEL`] into a single level increment, persist.
    ///
    /// Remote mode: log a focus-session (the award), delete the source
    /// task, then resync wholesale. A failed session write aborts with
    /// the in-memory state untouched. A failed resync leaves the view
    /// stale (`synced: false`) until the next successful hydration.
    ///
    /// # Errors
    ///
    /// Unknown or ambiguous id, or a failed remote write.
    pub async fn complete_task(&mut self, id: &str) -> Result<Completion> {
        let pos = self.resolve_task(id)?;

        match &self.backend {
            Some(client) => {
                let task = self.progress.history[pos].clone();
                client
                    .log_session(&NewFocusSession {
                        task_title: &task.title,
                        chunk_title: &task.step,
                        duration: SESSION_DURATION_MIN,
                        xp_earned: XP_PER_COMPLETION,
                        mood: task.mood,
                    })
                    .await?;

                let level_before = self.progress.level;
                let delete_result = client.delete_task(&task.id).await;

                // The award is on the server either way; resync before
                // surfacing a delete failure.
                let resynced = Self::hydrate(client).await;
                let synced = match resynced {
                    Ok(progress) => {
                        self.replace(progress);
                        true
                    }
                    Err(e) => {
                        warn!(error = %e, "resync after completion failed; view may be stale");
                        false
                    }
                };
                delete_result?;

                Ok(Completion {
                    task,
                    xp_awarded: XP_PER_COMPLETION,
                    leveled_up: self.progress.level > level_before,
                    synced,
                })
            }
            None => {
                let task = self.progress.history.remove(pos);
                let gained = self.progress.xp + XP_PER_COMPLETION;
                let leveled_up = gained >= XP_PER_LEVEL;
                if leveled_up {
                    self.progress.xp = gained - XP_PER_LEVEL;
                    self.progress.level += 1;
                } else {
                    self.progress.xp = gained;
                }
                self.persist_local("complete_task");

                Ok(Completion {
                    task,
                    xp_awarded: XP_PER_COMPLETION,
                    leveled_up,
                    synced: true,
                })
            }
        }
    }

    /// Discard a pending task without completing it. No award.
    ///
    /// # Errors
    ///
    /// Unknown or ambiguous id, or a failed remote delete.
    pub async fn remove_task(&mut self, id: &str) -> Result<TaskEntry> {
        let pos = self.resolve_task(id)?;

        match &self.backend {
            Some(client) => {
                let task = self.progress.history[pos].clone();
                client.delete_task(&task.id).await?;

                let resynced = Self::hydrate(client).await;
                match resynced {
                    Ok(progress) => self.replace(progress),
                    Err(e) => {
                        warn!(error = %e, "resync after removal failed; view may be stale");
                    }
                }
                Ok(task)
            }
            None => {
                let task = self.progress.history.remove(pos);
                self.persist_local("remove_task");
                Ok(task)
            }
        }
    }

    /// Force a fresh remote hydration and mirror it locally.
    ///
    /// # Errors
    ///
    /// No backend is attached, or the fetch failed (state unchanged).
    pub async fn resync(&mut self) -> Result<SaveStatus> {
        let client = self
            .backend
            .as_ref()
            .ok_or(Error::BackendNotConfigured)?;

        let progress = Self::hydrate(client).await?;
        self.progress = progress;
        self.source = HydrationSource::Remote;
        Ok(self.store.save(&self.progress))
    }

    /// The backend's completed-session log.
    ///
    /// # Errors
    ///
    /// No backend is attached, or the fetch failed.
    pub async fn session_log(&self) -> Result<Vec<RemoteSession>> {
        let client = self
            .backend
            .as_ref()
            .ok_or(Error::BackendNotConfigured)?;
        client.fetch_sessions().await
    }

    /// Persist after a local mutation. Best-effort by contract; a miss
    /// is logged and the in-memory state stays authoritative.
    fn persist_local(&self, op: &str) {
        let status = self.store.save(&self.progress);
        if !status.is_saved() {
            debug!(op, status = status.as_str(), "snapshot not persisted");
        }
    }

    /// Resolve an id or unique id prefix to a history position.
    fn resolve_task(&self, query: &str) -> Result<usize> {
        if let Some(pos) = self.progress.history.iter().position(|t| t.id == query) {
            return Ok(pos);
        }

        let matches: Vec<usize> = self
            .progress
            .history
            .iter()
            .enumerate()
            .filter(|(_, t)| t.id.starts_with(query))
            .map(|(i, _)| i)
            .collect();

        match matches.as_slice() {
            [pos] => Ok(*pos),
            [] => {
                let similar: Vec<String> = self
                    .progress
                    .history
                    .iter()
                    .filter(|t| t.id.contains(query))
                    .map(|t| t.id.clone())
                    .take(3)
                    .collect();

                if similar.is_empty() {
                    Err(Error::TaskNotFound {
                        id: query.to_string(),
                    })
                } else {
                    Err(Error::TaskNotFoundSimilar {
                        id: query.to_string(),
                        similar,
                    })
                }
            }
            many => Err(Error::AmbiguousTask {
                id: query.to_string(),
                matches: many
                    .iter()
                    .map(|&i| self.progress.history[i].id.clone())
                    .collect(),
            }),
        }
    }
}
