use super::grid::{legend, month_controls, table};
use super::{class_options, empty_state, flash, load_error};
use crate::handlers::ClassOptions;
use crate::models::AttendanceStatus;
use crate::stats::{AttendanceStats, MonthlyGrid};
use crate::store::{AttendanceForm, MonthlyView};
use chrono::NaiveDate;
use maud::{Markup, html};

pub fn page(form: &AttendanceForm, classes: &ClassOptions) -> Markup {
    html! {
        div.card {
            h2 { "Select Class & Date" }
            div.row {
                form.row method="post" action="/attendance/class" {
                    label {
                        "Class Section"
                        select name="class_section" {
                            (class_options(classes, form.class_section.as_deref()))
                        }
                    }
                    button.ghost type="submit" { "Load" }
                }
                form.row method="post" action="/attendance/date" {
                    label {
                        "Date"
                        input type="date" name="date" value=(form.date.format("%Y-%m-%d"));
                    }
                    button.ghost type="submit" { "Set" }
                }
            }
        }

        (load_error(classes))
        (flash(&form.flash))

        @if form.class_section.is_some() {
            div.card {
                div.row {
                    h2 { "Students" }
                    div.counters {
                        span.badge.present { "Present: " (form.present_count()) }
                        span.badge.absent { "Absent: " (form.absent_count()) }
                    }
                    form method="post" action="/attendance/mark-all" {
                        input type="hidden" name="status" value="Present";
                        button.ghost type="submit" { "All Present" }
                    }
                    form method="post" action="/attendance/mark-all" {
                        input type="hidden" name="status" value="Absent";
                        button.ghost type="submit" { "All Absent" }
                    }
                }
                @if form.students.is_empty() {
                    p.muted { "No students found for this class" }
                } @else {
                    table {
                        thead { tr { th.name { "Student" } th { "ID" } th { "Status" } } }
                        tbody {
                            @for student in &form.students {
                                @let status = form.status_of(student.student_id);
                                tr {
                                    td.name { (student.name) }
                                    td { (student.student_id) }
                                    td {
                                        form method="post"
                                            action={ "/attendance/toggle/" (student.student_id) } {
                                            @if status == AttendanceStatus::Present {
                                                button.badge.present type="submit" { "Present" }
                                            } @else {
                                                button.badge.absent type="submit" { "Absent" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    form method="post" action="/attendance/submit" {
                        button.primary type="submit" { "Submit Attendance" }
                    }
                }
            }
        }

        div.card {
            h2 { "Bulk Upload" }
            p.muted { "Upload an Excel sheet of attendance records (.xlsx or .xls)." }
            form.row method="post" action="/attendance/upload" enctype="multipart/form-data" {
                input type="file" name="file" accept=".xlsx,.xls";
                button.secondary type="submit" { "Upload" }
            }
            @if let Some(upload) = &form.upload {
                div.counters {
                    @if let Some(total) = upload.total_records {
                        span { "Total: " (total) }
                    }
                    @if let Some(inserted) = upload.inserted_records {
                        span { "Inserted: " (inserted) }
                    }
                    @if let Some(updated) = upload.updated_records {
                        span { "Updated: " (updated) }
                    }
                    @if let Some(created) = upload.new_students_created {
                        span { "New students: " (created) }
                    }
                }
                @if let Some(errors) = &upload.errors {
                    @if !errors.is_empty() {
                        ul.errors {
                            @for error in errors {
                                li.alert.error { (error) }
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
    grid: Option<Result<MonthlyGrid<AttendanceStats>, &str>>,
    today: NaiveDate,
) -> Markup {
    let fields = html! {
        label {
            "Class"
            select name="class_section" {
                (class_options(classes, view.class_section.as_deref()))
            }
        }
    };
    html! {
        (month_controls("/attendance/monthly", view, today, fields))
        (load_error(classes))
        (flash(&view.flash))
        @match grid {
            None => {
                (empty_state("Select a class to view monthly attendance"))
            }
            Some(Err(message)) => {
                div.alert.error { (message) }
            }
            Some(Ok(grid)) => {
                (legend(&[
                    ("mark-present", "P = Present"),
                    ("mark-absent", "A = Absent"),
                    ("mark-none", "- = No record"),
                ]))
                (table(&grid, "No attendance records found for this month"))
            }
        }
    }
}
