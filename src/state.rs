use crate::client::BackendClient;
use crate::config::Config;
use crate::store::Workspace;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared by every handler. The workspace lock is never held across a
/// backend call.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: BackendClient,
    pub workspace: Arc<Mutex<Workspace>>,
}

impl AppState {
    pub fn new(config: Config, client: BackendClient, workspace: Workspace) -> Self {
        Self {
            config: Arc::new(config),
            client,
            workspace: Arc::new(Mutex::new(workspace)),
        }
    }
}
