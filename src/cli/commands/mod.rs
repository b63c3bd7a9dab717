//! Command implementations.

pub mod add;
pub mod backend;
pub mod breakdown;
pub mod complete;
pub mod completions;
pub mod log;
pub mod recent;
pub mod remove;
pub mod stats;
pub mod sync;
pub mod version;

use crate::backend::BackendClient;
use crate::config;
use crate::ledger::Ledger;
use crate::storage::LocalStore;

/// Open the ledger for a command: hydrated from the backend when a URL
/// resolves, from the local snapshot otherwise.
async fn open_ledger(backend: Option<&str>, local: bool) -> Ledger {
    let store = Box::new(LocalStore::open());
    let client = config::resolve_backend_url(backend, local).map(BackendClient::new);
    Ledger::bootstrap(store, client).await
}
