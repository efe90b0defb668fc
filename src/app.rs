use crate::handlers::{self, attendance, chat, documents, exams, sidebar};
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

/// Largest document or attendance sheet accepted in one upload.
pub const UPLOAD_LIMIT: usize = 25 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(chat::index))
        .route("/api/state", get(handlers::state_snapshot))
        .route("/chat/send", post(chat::send))
        .route("/chat/new", post(chat::new_chat))
        .route("/chat/:id/select", post(chat::select))
        .route("/chat/:id/delete", post(chat::delete))
        .route(
            "/documents/upload",
            post(documents::upload).layer(DefaultBodyLimit::max(UPLOAD_LIMIT)),
        )
        .route("/documents/:id/delete", post(documents::delete))
        .route("/sidebar/toggle", post(sidebar::toggle_open))
        .route("/sidebar/theme", post(sidebar::toggle_theme))
        .route("/sidebar/attendance", post(sidebar::toggle_attendance))
        .route("/sidebar/exams", post(sidebar::toggle_exams))
        .route("/attendance", get(attendance::page))
        .route("/attendance/class", post(attendance::select_class))
        .route("/attendance/date", post(attendance::set_date))
        .route("/attendance/toggle/:student_id", post(attendance::toggle))
        .route("/attendance/mark-all", post(attendance::mark_all))
        .route("/attendance/submit", post(attendance::submit))
        .route(
            "/attendance/upload",
            post(attendance::upload).layer(DefaultBodyLimit::max(UPLOAD_LIMIT)),
        )
        .route("/attendance/monthly", get(attendance::monthly_page))
        .route("/attendance/monthly/select", post(attendance::monthly_select))
        .route("/attendance/monthly/prev", post(attendance::monthly_previous))
        .route("/attendance/monthly/next", post(attendance::monthly_next))
        .route("/exams", get(exams::page))
        .route("/exams/class", post(exams::select_class))
        .route("/exams/details", post(exams::set_details))
        .route("/exams/marks", post(exams::set_marks))
        .route("/exams/set-all", post(exams::set_all))
        .route("/exams/submit", post(exams::submit))
        .route("/exams/monthly", get(exams::monthly_page))
        .route("/exams/monthly/select", post(exams::monthly_select))
        .route("/exams/monthly/prev", post(exams::monthly_previous))
        .route("/exams/monthly/next", post(exams::monthly_next))
        .with_state(state)
}
