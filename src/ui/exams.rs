use super::grid::{legend, month_controls, table};
use super::{class_options, empty_state, flash, load_error};
use crate::handlers::ClassOptions;
use crate::stats::{ExamStats, MonthlyGrid};
use crate::store::exam::{COMMON_SUBJECTS, MAX_MARKS, grade};
use crate::store::{ExamForm, MonthlyView};
use chrono::NaiveDate;
use maud::{Markup, html};

fn grade_class(grade: &str) -> &'static str {
    match grade {
        "A+" | "A" => "badge grade-a",
        "B" => "badge grade-b",
        "C" => "badge grade-c",
        _ => "badge grade-f",
    }
}

pub fn page(form: &ExamForm, classes: &ClassOptions) -> Markup {
    let subject = form.subject.as_deref();
    html! {
        div.card {
            h2 { "Exam Details" }
            form.row method="post" action="/exams/class" {
                label {
                    "Class Section"
                    select name="class_section" {
                        (class_options(classes, form.class_section.as_deref()))
                    }
                }
                button.ghost type="submit" { "Load" }
            }
            form.row method="post" action="/exams/details" {
                label {
                    "Exam Date"
                    input type="date" name="date" value=(form.date.format("%Y-%m-%d"));
                }
                label {
                    "Subject"
                    select name="subject" {
                        option value="" { "Select a subject..." }
                        @for name in COMMON_SUBJECTS {
                            option value=(name) selected[subject == Some(name)] { (name) }
                        }
                    }
                }
                button.ghost type="submit" { "Set" }
            }
        }

        (load_error(classes))
        (flash(&form.flash))

        @if let Some(summary) = form.summary() {
            div.card {
                div.counters {
                    span { "Students: " (form.students.len()) }
                    span { "Average: " (format!("{:.1}", summary.average)) }
                    span { "Highest: " (summary.highest) }
                    span { "Lowest: " (summary.lowest) }
                }
            }
        }

        @if form.class_section.is_some() {
            div.card {
                div.row {
                    h2 { "Enter Marks" }
                    form.row method="post" action="/exams/set-all" {
                        input.mark type="number" name="value" min="0" max=(MAX_MARKS) placeholder="0-100";
                        button.ghost type="submit" { "Set for all" }
                    }
                }
                @if form.students.is_empty() {
                    p.muted { "No students found for this class" }
                } @else {
                    form method="post" action="/exams/marks" {
                        table {
                            thead {
                                tr { th.name { "Student" } th { "ID" } th { "Marks" } th { "Grade" } }
                            }
                            tbody {
                                @for student in &form.students {
                                    @let mark = form.mark_of(student.student_id);
                                    tr {
                                        td.name { (student.name) }
                                        td { (student.student_id) }
                                        td {
                                            input.mark type="text" inputmode="numeric"
                                                name={ "marks_" (student.student_id) }
                                                value=(mark) placeholder="0";
                                        }
                                        td {
                                            @if !mark.is_empty() {
                                                @let grade = grade(form.numeric_mark(student.student_id));
                                                span class=(grade_class(grade)) { (grade) }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                        div.row {
                            button.ghost type="submit" { "Save Marks" }
                            button.primary type="submit" formaction="/exams/submit" {
                                "Submit Results"
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn monthly_page(
    view: &MonthlyView,
    classes: &ClassOptions,
    grid: Option<Result<MonthlyGrid<ExamStats>, &str>>,
    today: NaiveDate,
) -> Markup {
    let subject = view.subject.as_deref();
    let fields = html! {
        label {
            "Class"
            select name="class_section" {
                (class_options(classes, view.class_section.as_deref()))
            }
        }
        label {
            "Subject"
            select name="subject" disabled[view.subjects.is_empty()] {
                option value="" { "Select a subject" }
                @for name in &view.subjects {
                    option value=(name) selected[subject == Some(name.as_str())] { (name) }
                }
            }
        }
    };
    let prompt = if view.class_section.is_none() {
        "Select a class to view exam results"
    } else {
        "Select a subject to view exam results"
    };
    html! {
        (month_controls("/exams/monthly", view, today, fields))
        (load_error(classes))
        (flash(&view.flash))
        @match grid {
            None => {
                (empty_state(prompt))
            }
            Some(Err(message)) => {
                div.alert.error { (message) }
            }
            Some(Ok(grid)) => {
                (legend(&[
                    ("mark-high", "80+"),
                    ("mark-good", "60-79"),
                    ("mark-fair", "40-59"),
                    ("mark-low", "Below 40"),
                    ("mark-none", "- = No exam"),
                ]))
                (table(&grid, "No exam records found for this month"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grades_map_to_badges() {
        assert_eq!(grade_class(grade(95)), "badge grade-a");
        assert_eq!(grade_class(grade(60)), "badge grade-b");
        assert_eq!(grade_class(grade(10)), "badge grade-f");
    }
}
