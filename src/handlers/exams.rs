use super::attendance::ClassForm;
use super::{STUDENTS_ERROR, class_options, parse_date, parse_field};
use crate::errors::AppError;
use crate::state::AppState;
use crate::stats::exam_grid;
use crate::store::ExamForm;
use crate::ui::{self, Page};
use axum::Form;
use axum::extract::State;
use axum::response::{Html, Redirect};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{error, info, warn};

const SUBMIT_ERROR: &str = "Failed to submit exam results. Please try again.";
const SUBJECTS_ERROR: &str = "Failed to load subjects. Please try again.";
const MONTHLY_ERROR: &str = "Failed to load exam data. Please try again.";
const MARK_FIELD_PREFIX: &str = "marks_";

#[derive(Debug, Deserialize)]
pub struct DetailsForm {
    pub date: String,
    #[serde(default)]
    pub subject: String,
}

#[derive(Debug, Deserialize)]
pub struct SetAllForm {
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthlySelectForm {
    pub class_section: Option<String>,
    pub subject: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

pub async fn page(State(state): State<AppState>) -> Html<String> {
    let classes = class_options(&state).await;
    let workspace = state.workspace.lock().await;
    let body = ui::exams::page(&workspace.exam, &classes);
    ui::render(ui::layout(&workspace, Page::Exams, body))
}

pub async fn select_class(State(state): State<AppState>, Form(form): Form<ClassForm>) -> Redirect {
    let class_section = form.class_section.trim().to_string();
    {
        let mut workspace = state.workspace.lock().await;
        workspace.exam.select_class(Some(class_section.clone()));
    }
    if class_section.is_empty() {
        return Redirect::to(Page::Exams.path());
    }

    let result = state.client.students(&class_section).await;
    let mut workspace = state.workspace.lock().await;
    let form = &mut workspace.exam;
    if form.class_section.as_deref() != Some(class_section.as_str()) {
        return Redirect::to(Page::Exams.path());
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
    Redirect::to(Page::Exams.path())
}

pub async fn set_details(
    State(state): State<AppState>,
    Form(form): Form<DetailsForm>,
) -> Result<Redirect, AppError> {
    let date = parse_date(&form.date)?;
    let mut workspace = state.workspace.lock().await;
    workspace
        .exam
        .set_details(date, Some(form.subject.trim().to_string()));
    Ok(Redirect::to(Page::Exams.path()))
}

/// Applies every `marks_{student_id}` field; input that is not a mark is
/// skipped and the previous value kept.
fn apply_marks(form: &mut ExamForm, fields: &HashMap<String, String>) {
    for (key, value) in fields {
        let Some(student_id) = key
            .strip_prefix(MARK_FIELD_PREFIX)
            .and_then(|id| id.parse::<i64>().ok())
        else {
            continue;
        };
        if !form.set_mark(student_id, value.trim()) {
            warn!(student_id, input = %value, "ignoring mark input");
        }
    }
}

pub async fn set_marks(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Redirect {
    let mut workspace = state.workspace.lock().await;
    apply_marks(&mut workspace.exam, &fields);
    Redirect::to(Page::Exams.path())
}

pub async fn set_all(
    State(state): State<AppState>,
    Form(form): Form<SetAllForm>,
) -> Result<Redirect, AppError> {
    let value = form
        .value
        .trim()
        .parse::<u32>()
        .map_err(|_| AppError::bad_request(format!("invalid mark {:?}", form.value)))?;
    let mut workspace = state.workspace.lock().await;
    workspace.exam.set_all(value);
    Ok(Redirect::to(Page::Exams.path()))
}

/// Takes the marks table as posted, so unsaved edits go out with it.
pub async fn submit(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Redirect {
    let payload = {
        let mut workspace = state.workspace.lock().await;
        let form = &mut workspace.exam;
        apply_marks(form, &fields);
        form.flash.clear();
        match form.payload() {
            Ok(payload) => payload,
            Err(message) => {
                form.flash.fail(message);
                return Redirect::to(Page::Exams.path());
            }
        }
    };

    let result = state.client.submit_exam_results(&payload).await;
    let mut workspace = state.workspace.lock().await;
    match result {
        Ok(response) => {
            info!(
                class = %payload.class_section,
                subject = %payload.subject,
                date = %payload.exam_date,
                "exam results submitted"
            );
            workspace.exam.flash.succeed(response.message);
        }
        Err(err) => {
            error!("failed to submit exam results: {err}");
            workspace.exam.flash.fail(SUBMIT_ERROR);
        }
    }
    Redirect::to(Page::Exams.path())
}

/// Renders the grid from a fresh fetch; nothing is written back.
pub async fn monthly_page(State(state): State<AppState>) -> Html<String> {
    let classes = class_options(&state).await;
    let view = state.workspace.lock().await.monthly_exam.clone();

    let grid = match (view.class_section.as_deref(), view.subject.as_deref()) {
        (Some(class_section), Some(subject)) => {
            match state
                .client
                .monthly_exams(class_section, view.month, subject)
                .await
            {
                Ok(response) => Some(Ok(exam_grid(view.month, response))),
                Err(err) => {
                    error!("failed to fetch monthly exams for {class_section}/{subject}: {err}");
                    Some(Err(MONTHLY_ERROR))
                }
            }
        }
        _ => None,
    };

    let workspace = state.workspace.lock().await;
    let body = ui::exams::monthly_page(&view, &classes, grid, super::today());
    ui::render(ui::layout(&workspace, Page::MonthlyExams, body))
}

/// A new class fetches its subjects and drops the old subject choice.
pub async fn monthly_select(
    State(state): State<AppState>,
    Form(form): Form<MonthlySelectForm>,
) -> Redirect {
    let changed_class = {
        let mut workspace = state.workspace.lock().await;
        let view = &mut workspace.monthly_exam;
        let year = parse_field(form.year.as_deref()).unwrap_or(view.month.year);
        let month = parse_field(form.month.as_deref()).unwrap_or(view.month.month);
        view.select_month(year, month);

        let changed = match form.class_section {
            Some(class_section) => view.select_class(Some(class_section.trim().to_string())),
            None => false,
        };
        if !changed && form.subject.is_some() {
            view.select_subject(form.subject.map(|subject| subject.trim().to_string()));
        }
        if changed { view.class_section.clone() } else { None }
    };

    let Some(class_section) = changed_class else {
        return Redirect::to(Page::MonthlyExams.path());
    };

    let result = state.client.subjects(&class_section).await;
    let mut workspace = state.workspace.lock().await;
    let view = &mut workspace.monthly_exam;
    if view.class_section.as_deref() != Some(class_section.as_str()) {
        return Redirect::to(Page::MonthlyExams.path());
    }
    match result {
        Ok(subjects) => view.set_subjects(subjects),
        Err(err) => {
            error!("failed to fetch subjects for {class_section}: {err}");
            view.flash.fail(SUBJECTS_ERROR);
        }
    }
    Redirect::to(Page::MonthlyExams.path())
}

pub async fn monthly_previous(State(state): State<AppState>) -> Redirect {
    state.workspace.lock().await.monthly_exam.previous();
    Redirect::to(Page::MonthlyExams.path())
}

pub async fn monthly_next(State(state): State<AppState>) -> Redirect {
    state.workspace.lock().await.monthly_exam.next();
    Redirect::to(Page::MonthlyExams.path())
}
