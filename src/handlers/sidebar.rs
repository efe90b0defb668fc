use super::ReturnTo;
use crate::state::AppState;
use crate::store::Sidebar;
use axum::extract::{Query, State};
use axum::response::Redirect;

async fn apply(state: &AppState, toggle: fn(&mut Sidebar)) {
    let mut workspace = state.workspace.lock().await;
    toggle(&mut workspace.sidebar);
}

pub async fn toggle_open(State(state): State<AppState>, Query(back): Query<ReturnTo>) -> Redirect {
    apply(&state, Sidebar::toggle_open).await;
    Redirect::to(back.path())
}

pub async fn toggle_theme(State(state): State<AppState>, Query(back): Query<ReturnTo>) -> Redirect {
    apply(&state, Sidebar::toggle_theme).await;
    Redirect::to(back.path())
}

pub async fn toggle_attendance(
    State(state): State<AppState>,
    Query(back): Query<ReturnTo>,
) -> Redirect {
    apply(&state, Sidebar::toggle_attendance).await;
    Redirect::to(back.path())
}

pub async fn toggle_exams(State(state): State<AppState>, Query(back): Query<ReturnTo>) -> Redirect {
    apply(&state, Sidebar::toggle_exams).await;
    Redirect::to(back.path())
}
