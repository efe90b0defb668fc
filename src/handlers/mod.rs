pub mod attendance;
pub mod chat;
pub mod documents;
pub mod exams;
pub mod sidebar;

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::Workspace;
use axum::{Json, extract::State};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::error;

pub const CLASSES_ERROR: &str = "Failed to load classes. Please try again.";
pub const STUDENTS_ERROR: &str = "Failed to load students. Please try again.";

/// Class dropdown contents, or the message shown when they could not be loaded.
#[derive(Debug, Default)]
pub struct ClassOptions {
    pub names: Vec<String>,
    pub error: Option<&'static str>,
}

pub async fn class_options(state: &AppState) -> ClassOptions {
    match state.client.classes().await {
        Ok(classes) => ClassOptions {
            names: classes.into_iter().map(|class| class.class_section).collect(),
            error: None,
        },
        Err(err) => {
            error!("failed to fetch classes: {err}");
            ClassOptions {
                names: Vec::new(),
                error: Some(CLASSES_ERROR),
            }
        }
    }
}

pub async fn state_snapshot(State(state): State<AppState>) -> Json<Workspace> {
    let workspace = state.workspace.lock().await;
    Json(workspace.clone())
}

/// Where a sidebar or document form sends the browser back to.
#[derive(Debug, Default, Deserialize)]
pub struct ReturnTo {
    pub return_to: Option<String>,
}

impl ReturnTo {
    /// Only local paths are honoured.
    pub fn path(&self) -> &str {
        match self.return_to.as_deref() {
            Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
            _ => "/",
        }
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::bad_request(format!("invalid date {value:?}")))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses an optional form field, treating blank as absent.
fn parse_field<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn return_to(path: &str) -> ReturnTo {
        ReturnTo {
            return_to: Some(path.to_string()),
        }
    }

    #[test]
    fn return_to_accepts_local_paths_only() {
        assert_eq!(return_to("/attendance").path(), "/attendance");
        assert_eq!(return_to("//evil.example").path(), "/");
        assert_eq!(return_to("https://evil.example").path(), "/");
        assert_eq!(ReturnTo::default().path(), "/");
    }

    #[test]
    fn dates_use_iso_format() {
        assert_eq!(
            parse_date("2024-01-08").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
        );
        assert!(parse_date("08/01/2024").is_err());
    }

    #[test]
    fn blank_fields_are_absent() {
        assert_eq!(parse_field::<i32>(Some(" 2024 ")), Some(2024));
        assert_eq!(parse_field::<i32>(Some("")), None);
        assert_eq!(parse_field::<i32>(Some("x")), None);
        assert_eq!(parse_field::<i32>(None), None);
    }
}
