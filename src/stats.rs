use crate::calendar::{DayInfo, MonthSpec, WeekGroup, build_weeks};
use crate::models::{AttendanceMark, MonthlyAttendanceResponse, MonthlyExamResponse};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Rendered for a day with no record, and for stats with nothing to reduce.
pub const NO_RECORD: &str = "-";

/// Sparse day → value records, keyed by the day number as the backend sends it.
pub type DailyRecordMap<V> = BTreeMap<String, V>;

pub fn lookup<V: Display>(records: &DailyRecordMap<V>, day: u32) -> String {
    records
        .get(&day.to_string())
        .map(ToString::to_string)
        .unwrap_or_else(|| NO_RECORD.to_string())
}

/// A per-student reduction over one month of records.
pub trait RowStats: Sized {
    type Value: Display;

    fn reduce<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Self::Value>,
        Self::Value: 'a;

    /// Style class for one day's cell.
    fn cell_class(value: &Self::Value) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceStats {
    pub present: usize,
    pub absent: usize,
    pub percentage: Option<f64>,
}

impl AttendanceStats {
    pub fn percentage_label(&self) -> String {
        one_decimal(self.percentage)
    }
}

impl RowStats for AttendanceStats {
    type Value = AttendanceMark;

    fn reduce<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a AttendanceMark>,
    {
        let (present, absent) = values
            .into_iter()
            .fold((0, 0), |(present, absent), mark| match mark {
                AttendanceMark::Present => (present + 1, absent),
                AttendanceMark::Absent => (present, absent + 1),
            });
        let total = present + absent;
        let percentage = (total > 0).then(|| present as f64 / total as f64 * 100.0);
        Self {
            present,
            absent,
            percentage,
        }
    }

    fn cell_class(value: &AttendanceMark) -> &'static str {
        match value {
            AttendanceMark::Present => "mark-present",
            AttendanceMark::Absent => "mark-absent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamStats {
    pub count: usize,
    pub average: Option<f64>,
    pub highest: Option<i64>,
    pub lowest: Option<i64>,
}

impl ExamStats {
    pub fn average_label(&self) -> String {
        one_decimal(self.average)
    }

    pub fn highest_label(&self) -> String {
        optional_label(self.highest)
    }

    pub fn lowest_label(&self) -> String {
        optional_label(self.lowest)
    }
}

impl RowStats for ExamStats {
    type Value = i64;

    fn reduce<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a i64>,
    {
        let marks: Vec<i64> = values.into_iter().copied().collect();
        let count = marks.len();
        let average = (count > 0).then(|| marks.iter().sum::<i64>() as f64 / count as f64);
        Self {
            count,
            average,
            highest: marks.iter().max().copied(),
            lowest: marks.iter().min().copied(),
        }
    }

    fn cell_class(value: &i64) -> &'static str {
        match *value {
            v if v >= 80 => "mark-high",
            v if v >= 60 => "mark-good",
            v if v >= 40 => "mark-fair",
            _ => "mark-low",
        }
    }
}

/// One decimal place from the exact value of the float. The only values that
/// sit exactly between two tenths are odd quarters, and those round away from
/// zero.
fn one_decimal(value: Option<f64>) -> String {
    let Some(value) = value else {
        return NO_RECORD.to_string();
    };
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        format!("{:.1}", value + 0.05 * value.signum())
    } else {
        format!("{:.1}", value)
    }
}

fn optional_label(value: Option<i64>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| NO_RECORD.to_string())
}

#[derive(Debug, Clone, Serialize)]
pub struct GridCell {
    pub day: u32,
    pub label: String,
    pub class: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridRow<S> {
    pub student_id: i64,
    pub name: String,
    pub cells: Vec<GridCell>,
    pub stats: S,
}

/// Students × non-Sunday days for one month, with per-row stats.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyGrid<S> {
    pub month: MonthSpec,
    pub weeks: Vec<WeekGroup>,
    pub rows: Vec<GridRow<S>>,
}

impl<S: RowStats> MonthlyGrid<S> {
    pub fn build<I>(month: MonthSpec, days_in_month: i64, students: I) -> Self
    where
        I: IntoIterator<Item = (i64, String, DailyRecordMap<S::Value>)>,
    {
        let weeks = build_weeks(month.year, month.month, days_in_month);
        let rows = students
            .into_iter()
            .map(|(student_id, name, records)| {
                let cells = weeks
                    .iter()
                    .flat_map(|week| week.days.iter())
                    .map(|info| cell::<S>(&records, info))
                    .collect();
                GridRow {
                    student_id,
                    name,
                    cells,
                    stats: S::reduce(records.values()),
                }
            })
            .collect();

        Self { month, weeks, rows }
    }
}

impl<S> MonthlyGrid<S> {
    pub fn days(&self) -> impl Iterator<Item = &DayInfo> {
        self.weeks.iter().flat_map(|week| week.days.iter())
    }

    pub fn day_count(&self) -> usize {
        self.weeks.iter().map(|week| week.days.len()).sum()
    }
}

fn cell<S: RowStats>(records: &DailyRecordMap<S::Value>, info: &DayInfo) -> GridCell {
    let value = records.get(&info.day.to_string());
    GridCell {
        day: info.day,
        label: lookup(records, info.day),
        class: value.map(S::cell_class).unwrap_or("mark-none"),
    }
}

pub fn attendance_grid(
    month: MonthSpec,
    response: MonthlyAttendanceResponse,
) -> MonthlyGrid<AttendanceStats> {
    MonthlyGrid::build(
        month,
        response.days_in_month,
        response
            .students
            .into_iter()
            .map(|student| (student.student_id, student.name, student.attendance)),
    )
}

pub fn exam_grid(month: MonthSpec, response: MonthlyExamResponse) -> MonthlyGrid<ExamStats> {
    MonthlyGrid::build(
        month,
        response.days_in_month,
        response
            .students
            .into_iter()
            .map(|student| (student.student_id, student.name, student.exams)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthlyAttendanceStudent, MonthlyExamStudent};

    fn records<V>(entries: &[(u32, V)]) -> DailyRecordMap<V>
    where
        V: Clone,
    {
        entries
            .iter()
            .map(|(day, value)| (day.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn attendance_stats_round_to_one_decimal() {
        let map = records(&[
            (1, AttendanceMark::Present),
            (2, AttendanceMark::Present),
            (3, AttendanceMark::Absent),
        ]);
        let stats = AttendanceStats::reduce(map.values());
        assert_eq!(stats.present, 2);
        assert_eq!(stats.absent, 1);
        assert_eq!(stats.percentage_label(), "66.7");
    }

    #[test]
    fn attendance_stats_on_empty_map() {
        let map: DailyRecordMap<AttendanceMark> = DailyRecordMap::new();
        let stats = AttendanceStats::reduce(map.values());
        assert_eq!((stats.present, stats.absent), (0, 0));
        assert_eq!(stats.percentage_label(), "-");
    }

    #[test]
    fn exam_stats_summarise_marks() {
        let map = records(&[(1, 90), (2, 70)]);
        let stats = ExamStats::reduce(map.values());
        assert_eq!(stats.count, 2);
        assert_eq!(stats.average_label(), "80.0");
        assert_eq!(stats.highest_label(), "90");
        assert_eq!(stats.lowest_label(), "70");
    }

    #[test]
    fn exam_stats_on_empty_map() {
        let map: DailyRecordMap<i64> = DailyRecordMap::new();
        let stats = ExamStats::reduce(map.values());
        assert_eq!(stats.count, 0);
        assert_eq!(stats.average_label(), "-");
        assert_eq!(stats.highest_label(), "-");
        assert_eq!(stats.lowest_label(), "-");
    }

    #[test]
    fn exam_average_rounds_ties_up() {
        let map = records(&[(1, 1), (2, 2), (3, 2), (4, 2)]);
        assert_eq!(ExamStats::reduce(map.values()).average_label(), "1.8");

        let map = records(&[(1, 0), (2, 0), (3, 0), (4, 1)]);
        assert_eq!(ExamStats::reduce(map.values()).average_label(), "0.3");
    }

    #[test]
    fn exam_average_uses_the_stored_float() {
        // 1627 / 20 is stored just below 81.35.
        let mut entries: Vec<(u32, i64)> = (1..=19).map(|day| (day, 81)).collect();
        entries.push((20, 88));
        let map = records(&entries);
        let stats = ExamStats::reduce(map.values());
        assert_eq!(stats.count, 20);
        assert_eq!(stats.average_label(), "81.3");
    }

    #[test]
    fn lookup_marks_missing_days() {
        let map = records(&[(4, 55)]);
        assert_eq!(lookup(&map, 4), "55");
        assert_eq!(lookup(&map, 5), "-");
    }

    #[test]
    fn exam_cells_are_banded() {
        assert_eq!(ExamStats::cell_class(&80), "mark-high");
        assert_eq!(ExamStats::cell_class(&79), "mark-good");
        assert_eq!(ExamStats::cell_class(&40), "mark-fair");
        assert_eq!(ExamStats::cell_class(&39), "mark-low");
    }

    #[test]
    fn attendance_grid_aligns_cells_with_days() {
        let month = MonthSpec::new(2024, 1).unwrap();
        let response = MonthlyAttendanceResponse {
            days_in_month: 31,
            students: vec![MonthlyAttendanceStudent {
                student_id: 1,
                name: "Asha".to_string(),
                attendance: records(&[
                    (1, AttendanceMark::Present),
                    (7, AttendanceMark::Absent),
                    (8, AttendanceMark::Absent),
                ]),
            }],
        };
        let grid = attendance_grid(month, response);
        let row = &grid.rows[0];

        assert_eq!(row.cells.len(), grid.day_count());
        assert_eq!(grid.day_count(), 27);
        assert_eq!(row.cells[0].label, "P");
        assert_eq!(row.cells[0].class, "mark-present");
        assert_eq!(row.cells[1].label, "-");
        assert_eq!(row.cells[1].class, "mark-none");
        // Day 7 is a Sunday and has no column, so day 8 follows day 6.
        assert_eq!(row.cells[6].day, 8);
        assert_eq!(row.cells[6].label, "A");
        // Stats still count the Sunday record.
        assert_eq!(row.stats.absent, 2);
    }

    #[test]
    fn exam_grid_with_no_students_keeps_weeks() {
        let month = MonthSpec::new(2024, 9).unwrap();
        let grid = exam_grid(
            month,
            MonthlyExamResponse {
                days_in_month: 30,
                students: Vec::<MonthlyExamStudent>::new(),
            },
        );
        assert!(grid.rows.is_empty());
        assert_eq!(grid.weeks[0].days[0].day, 2);
    }
}
