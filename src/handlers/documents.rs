use super::ReturnTo;
use crate::errors::AppError;
use crate::state::AppState;
use crate::store::Workspace;
use crate::store::documents::DocumentStatus;
use axum::extract::{Multipart, Path, Query, State};
use axum::response::Redirect;
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, info, warn};

const PROCESSING_AFTER: Duration = Duration::from_millis(1000);
const READY_AFTER: Duration = Duration::from_millis(2500);

/// Every file field becomes a document. Nothing leaves the process; the
/// status moves through processing to ready on a timer. A file that cannot
/// be read is listed with the error status.
pub async fn upload(
    State(state): State<AppState>,
    Query(back): Query<ReturnTo>,
    mut multipart: Multipart,
) -> Redirect {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                warn!("stopped reading document upload: {err}");
                break;
            }
        };
        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        match field.bytes().await {
            Ok(bytes) => {
                let id = {
                    let mut workspace = state.workspace.lock().await;
                    workspace
                        .documents
                        .add(&name, bytes.len() as u64, content_type, Local::now())
                };
                info!(%id, %name, size = bytes.len(), "document uploaded");
                tokio::spawn(simulate_processing(Arc::clone(&state.workspace), id));
            }
            Err(err) => {
                warn!(%name, "failed to read document: {err}");
                let mut workspace = state.workspace.lock().await;
                let id = workspace
                    .documents
                    .add(&name, 0, content_type, Local::now());
                workspace.documents.set_status(&id, DocumentStatus::Error);
                break;
            }
        }
    }
    Redirect::to(back.path())
}

async fn simulate_processing(workspace: Arc<Mutex<Workspace>>, id: String) {
    sleep(PROCESSING_AFTER).await;
    if !workspace
        .lock()
        .await
        .documents
        .set_status(&id, DocumentStatus::Processing)
    {
        debug!(%id, "document removed before processing");
        return;
    }
    sleep(READY_AFTER - PROCESSING_AFTER).await;
    workspace
        .lock()
        .await
        .documents
        .set_status(&id, DocumentStatus::Ready);
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(back): Query<ReturnTo>,
) -> Result<Redirect, AppError> {
    let mut workspace = state.workspace.lock().await;
    if !workspace.documents.delete(&id) {
        return Err(AppError::not_found(format!("no document {id}")));
    }
    info!(%id, "deleted document");
    Ok(Redirect::to(back.path()))
}
