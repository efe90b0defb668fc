use crate::errors::AppError;
use crate::state::AppState;
use crate::store::chat::connection_error_message;
use crate::ui::{self, Page};
use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use chrono::Local;
use serde::Deserialize;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct SendForm {
    #[serde(default)]
    pub content: String,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let workspace = state.workspace.lock().await;
    let body = ui::chat::page(&workspace);
    ui::render(ui::layout(&workspace, Page::Chat, body))
}

pub async fn send(State(state): State<AppState>, Form(form): Form<SendForm>) -> Redirect {
    let question = form.content.trim().to_string();
    if question.is_empty() {
        return Redirect::to(Page::Chat.path());
    }

    let chat_id = {
        let mut workspace = state.workspace.lock().await;
        workspace.chat.push_user_message(&question, Local::now())
    };

    // The answer is appended even if the browser leaves before it arrives.
    let task = tokio::spawn(answer(state.clone(), chat_id.clone(), question));
    if let Err(err) = task.await {
        error!("chat answer task failed: {err}");
        let message = connection_error_message(state.client.chat_url(), &err.to_string());
        let mut workspace = state.workspace.lock().await;
        workspace
            .chat
            .push_assistant_message(&chat_id, message, Local::now());
    }
    Redirect::to(Page::Chat.path())
}

async fn answer(state: AppState, chat_id: String, question: String) {
    let answer = match state.client.ask(&question).await {
        Ok(answer) => answer,
        Err(err) => {
            error!("chat query failed: {err}");
            connection_error_message(state.client.chat_url(), &err.to_string())
        }
    };

    let mut workspace = state.workspace.lock().await;
    workspace
        .chat
        .push_assistant_message(&chat_id, answer, Local::now());
}

pub async fn new_chat(State(state): State<AppState>) -> Redirect {
    let mut workspace = state.workspace.lock().await;
    let id = workspace.chat.new_chat(Local::now());
    info!(%id, "started chat");
    Redirect::to(Page::Chat.path())
}

pub async fn select(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let mut workspace = state.workspace.lock().await;
    if !workspace.chat.select_chat(&id) {
        return Err(AppError::not_found(format!("no chat {id}")));
    }
    Ok(Redirect::to(Page::Chat.path()))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let mut workspace = state.workspace.lock().await;
    if !workspace.chat.delete_chat(&id) {
        return Err(AppError::not_found(format!("no chat {id}")));
    }
    info!(%id, "deleted chat");
    Ok(Redirect::to(Page::Chat.path()))
}
