use crate::calendar::{MONTH_NAMES, year_options};
use crate::stats::{AttendanceStats, ExamStats, MonthlyGrid, RowStats};
use crate::store::MonthlyView;
use chrono::{Datelike, NaiveDate};
use maud::{Markup, html};

/// Summary columns shown at the end of each grid row.
pub trait StatsColumns: RowStats {
    fn headers() -> &'static [&'static str];
    fn values(&self) -> Vec<String>;
}

impl StatsColumns for AttendanceStats {
    fn headers() -> &'static [&'static str] {
        &["Present", "Absent", "%"]
    }

    fn values(&self) -> Vec<String> {
        vec![
            self.present.to_string(),
            self.absent.to_string(),
            self.percentage_label(),
        ]
    }
}

impl StatsColumns for ExamStats {
    fn headers() -> &'static [&'static str] {
        &["Exams", "Avg", "High", "Low"]
    }

    fn values(&self) -> Vec<String> {
        vec![
            self.count.to_string(),
            self.average_label(),
            self.highest_label(),
            self.lowest_label(),
        ]
    }
}

pub fn table<S: StatsColumns>(grid: &MonthlyGrid<S>, empty_message: &str) -> Markup {
    let span = grid.day_count() + 1 + S::headers().len();
    html! {
        div.card.grid-wrap {
            table {
                thead {
                    tr {
                        th.name rowspan="2" { "Student Name" }
                        @for week in &grid.weeks {
                            th.week colspan=(week.days.len()) { "Week " (week.week_number) }
                        }
                        @for header in S::headers() {
                            th rowspan="2" { (header) }
                        }
                    }
                    tr {
                        @for day in grid.days() {
                            th {
                                span.day-name { (day.weekday_name) }
                                (day.day)
                            }
                        }
                    }
                }
                tbody {
                    @if grid.rows.is_empty() {
                        tr { td colspan=(span) { (empty_message) } }
                    }
                    @for row in &grid.rows {
                        tr {
                            td.name { (row.name) }
                            @for cell in &row.cells {
                                td class=(cell.class) { (cell.label) }
                            }
                            @for value in row.stats.values() {
                                td { (value) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Month navigation plus the selection form. `fields` holds the page's own
/// selects (class, and subject on the exam page).
pub fn month_controls(base: &str, view: &MonthlyView, today: NaiveDate, fields: Markup) -> Markup {
    html! {
        div.card {
            form.row method="post" action={ (base) "/select" } {
                (fields)
                label {
                    "Month"
                    select name="month" {
                        @for (index, name) in MONTH_NAMES.iter().enumerate() {
                            @let number = index as u32 + 1;
                            option value=(number) selected[number == view.month.month] { (name) }
                        }
                    }
                }
                label {
                    "Year"
                    select name="year" {
                        @for year in year_options(today.year()) {
                            option value=(year) selected[year == view.month.year] { (year) }
                        }
                    }
                }
                button.secondary type="submit" { "Show" }
            }
            div.row {
                form method="post" action={ (base) "/prev" } {
                    button.ghost type="submit" { "‹ Previous" }
                }
                h2 { (view.month.label()) }
                form method="post" action={ (base) "/next" } {
                    button.ghost type="submit" { "Next ›" }
                }
            }
        }
    }
}

pub fn legend(entries: &[(&str, &str)]) -> Markup {
    html! {
        div.legend {
            @for (class, label) in entries {
                span class=(class) { (label) }
            }
        }
    }
}
