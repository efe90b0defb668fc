use super::{STUDENTS_ERROR, class_options, parse_date, parse_field};
use crate::errors::AppError;
use crate::models::AttendanceStatus;
use crate::state::AppState;
use crate::stats::attendance_grid;
use crate::ui::{self, Page};
use axum::Form;
use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use tracing::{error, info, warn};

pub const EXCEL_ONLY: &str = "Please choose an Excel file (.xlsx or .xls).";
const SUBMIT_ERROR: &str = "Failed to submit attendance. Please try again.";
const UPLOAD_ERROR: &str = "Failed to upload attendance file. Please try again.";
pub const READ_ERROR: &str = "The file could not be read. It may be larger than the upload limit.";
const MONTHLY_ERROR: &str = "Failed to load attendance data. Please try again.";

#[derive(Debug, Deserialize)]
pub struct ClassForm {
    #[serde(default)]
    pub class_section: String,
}

#[derive(Debug, Deserialize)]
pub struct DateForm {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct MarkAllForm {
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthlySelectForm {
    pub class_section: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

pub async fn page(State(state): State<AppState>) -> Html<String> {
    let classes = class_options(&state).await;
    let workspace = state.workspace.lock().await;
    let body = ui::attendance::page(&workspace.attendance, &classes);
    ui::render(ui::layout(&workspace, Page::Attendance, body))
}

pub async fn select_class(State(state): State<AppState>, Form(form): Form<ClassForm>) -> Redirect {
    let class_section = form.class_section.trim().to_string();
    {
        let mut workspace = state.workspace.lock().await;
        workspace.attendance.select_class(Some(class_section.clone()));
    }
    if class_section.is_empty() {
        return Redirect::to(Page::Attendance.path());
    }

    let result = state.client.students(&class_section).await;
    let mut workspace = state.workspace.lock().await;
    let form = &mut workspace.attendance;
    if form.class_section.as_deref() != Some(class_section.as_str()) {
        // Another class was picked while this roster was loading.
        return Redirect::to(Page::Attendance.path());
    }
    match result {
        Ok(students) => {
            info!(class = %class_section, count = students.len(), "loaded students");
            form.load_students(students);
        }
        Err(err) => {
            error!("failed to fetch students for {class_section}: {err}");
            form.flash.fail(STUDENTS_ERROR);
        }
    }
    Redirect::to(Page::Attendance.path())
}

pub async fn set_date(
    State(state): State<AppState>,
    Form(form): Form<DateForm>,
) -> Result<Redirect, AppError> {
    let date = parse_date(&form.date)?;
    let mut workspace = state.workspace.lock().await;
    workspace.attendance.set_date(date);
    Ok(Redirect::to(Page::Attendance.path()))
}

pub async fn toggle(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Redirect, AppError> {
    let mut workspace = state.workspace.lock().await;
    if !workspace.attendance.toggle(student_id) {
        return Err(AppError::not_found(format!("no student {student_id}")));
    }
    Ok(Redirect::to(Page::Attendance.path()))
}

pub async fn mark_all(
    State(state): State<AppState>,
    Form(form): Form<MarkAllForm>,
) -> Result<Redirect, AppError> {
    let status = AttendanceStatus::parse(form.status.trim())
        .ok_or_else(|| AppError::bad_request("status must be 'Present' or 'Absent'"))?;
    let mut workspace = state.workspace.lock().await;
    workspace.attendance.mark_all(status);
    Ok(Redirect::to(Page::Attendance.path()))
}

pub async fn submit(State(state): State<AppState>) -> Redirect {
    let payload = {
        let mut workspace = state.workspace.lock().await;
        let form = &mut workspace.attendance;
        form.flash.clear();
        match form.payload() {
            Ok(payload) => payload,
            Err(message) => {
                form.flash.fail(message);
                return Redirect::to(Page::Attendance.path());
            }
        }
    };

    let result = state.client.submit_attendance(&payload).await;
    let mut workspace = state.workspace.lock().await;
    match result {
        Ok(response) => {
            info!(class = %payload.class_section, date = %payload.date, "attendance submitted");
            workspace.attendance.flash.succeed(response.message);
        }
        Err(err) => {
            error!("failed to submit attendance: {err}");
            workspace.attendance.flash.fail(SUBMIT_ERROR);
        }
    }
    Redirect::to(Page::Attendance.path())
}

pub fn is_excel_file(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name.ends_with(".xlsx") || name.ends_with(".xls")
}

/// The `file` field of the upload form, if there is one.
async fn excel_field(
    multipart: &mut Multipart,
) -> Result<Option<(String, Bytes)>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        return Ok(Some((name, bytes)));
    }
    Ok(None)
}

pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Redirect {
    let file = match excel_field(&mut multipart).await {
        Ok(file) => file,
        Err(err) => {
            warn!("failed to read attendance upload: {err}");
            let mut workspace = state.workspace.lock().await;
            workspace.attendance.upload = None;
            workspace.attendance.flash.fail(READ_ERROR);
            return Redirect::to(Page::Attendance.path());
        }
    };

    let (name, bytes) = match file {
        Some((name, bytes)) if is_excel_file(&name) => (name, bytes),
        _ => {
            let mut workspace = state.workspace.lock().await;
            workspace.attendance.upload = None;
            workspace.attendance.flash.fail(EXCEL_ONLY);
            return Redirect::to(Page::Attendance.path());
        }
    };

    let result = state
        .client
        .upload_attendance_excel(name.clone(), bytes.to_vec())
        .await;
    let mut workspace = state.workspace.lock().await;
    let form = &mut workspace.attendance;
    match result {
        Ok(response) => {
            info!(file = %name, success = response.success, "attendance file uploaded");
            if response.success {
                form.flash.succeed(response.message.clone());
            } else {
                form.flash.fail(response.message.clone());
            }
            form.upload = Some(response);
        }
        Err(err) => {
            error!("failed to upload {name}: {err}");
            form.upload = None;
            form.flash.fail(UPLOAD_ERROR);
        }
    }
    Redirect::to(Page::Attendance.path())
}

/// Renders the grid from a fresh fetch; nothing is written back.
pub async fn monthly_page(State(state): State<AppState>) -> Html<String> {
    let classes = class_options(&state).await;
    let view = state.workspace.lock().await.monthly_attendance.clone();

    let grid = match view.class_section.as_deref() {
        Some(class_section) => {
            match state
                .client
                .monthly_attendance(class_section, view.month)
                .await
            {
                Ok(response) => Some(Ok(attendance_grid(view.month, response))),
                Err(err) => {
                    error!("failed to fetch monthly attendance for {class_section}: {err}");
                    Some(Err(MONTHLY_ERROR))
                }
            }
        }
        None => None,
    };

    let workspace = state.workspace.lock().await;
    let body = ui::attendance::monthly_page(&view, &classes, grid, super::today());
    ui::render(ui::layout(&workspace, Page::MonthlyAttendance, body))
}

pub async fn monthly_select(
    State(state): State<AppState>,
    Form(form): Form<MonthlySelectForm>,
) -> Redirect {
    let mut workspace = state.workspace.lock().await;
    let view = &mut workspace.monthly_attendance;
    if let Some(class_section) = form.class_section {
        view.select_class(Some(class_section.trim().to_string()));
    }
    let year = parse_field(form.year.as_deref()).unwrap_or(view.month.year);
    let month = parse_field(form.month.as_deref()).unwrap_or(view.month.month);
    view.select_month(year, month);
    Redirect::to(Page::MonthlyAttendance.path())
}

pub async fn monthly_previous(State(state): State<AppState>) -> Redirect {
    state.workspace.lock().await.monthly_attendance.previous();
    Redirect::to(Page::MonthlyAttendance.path())
}

pub async fn monthly_next(State(state): State<AppState>) -> Redirect {
    state.workspace.lock().await.monthly_attendance.next();
    Redirect::to(Page::MonthlyAttendance.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excel_extensions_are_case_insensitive() {
        assert!(is_excel_file("march.xlsx"));
        assert!(is_excel_file("MARCH.XLS"));
        assert!(!is_excel_file("march.csv"));
        assert!(!is_excel_file("xlsx"));
        assert!(!is_excel_file(""));
    }
}
