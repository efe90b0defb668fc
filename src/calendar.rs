use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const SUNDAY: u32 = 0;
const SATURDAY: u32 = 6;
const MAX_DAYS: i64 = 31;

/// A calendar month. Navigation returns a new value rather than mutating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSpec {
    pub year: i32,
    pub month: u32,
}

impl MonthSpec {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES[self.month.saturating_sub(1) as usize % 12]
    }

    pub fn label(self) -> String {
        format!("{} {}", self.name(), self.year)
    }

    /// Number of days in the month, or 0 when the year is outside chrono's range.
    pub fn days_in_month(self) -> u32 {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1);
        let next = self.next();
        let next_first = NaiveDate::from_ymd_opt(next.year, next.month, 1);
        match (first, next_first) {
            (Some(first), Some(next_first)) => (next_first - first).num_days() as u32,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayInfo {
    pub day: u32,
    pub weekday_name: &'static str,
    /// 0 = Sunday.
    pub weekday_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekGroup {
    pub week_number: u32,
    pub days: Vec<DayInfo>,
}

/// Groups the non-Sunday days of a month into weeks that close on Saturday or
/// on the month's last day.
///
/// `days_in_month` comes from the backend and is not trusted: a non-positive
/// value yields no weeks, and days that do not exist in the month are skipped.
pub fn build_weeks(year: i32, month: u32, days_in_month: i64) -> Vec<WeekGroup> {
    let mut weeks = Vec::new();
    let mut current: Vec<DayInfo> = Vec::new();
    let mut week_number = 1;

    for day in 1..=days_in_month.min(MAX_DAYS) {
        let Ok(day) = u32::try_from(day) else {
            break;
        };
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        let weekday_index = date.weekday().num_days_from_sunday();
        if weekday_index == SUNDAY {
            continue;
        }

        current.push(DayInfo {
            day,
            weekday_name: DAY_NAMES[weekday_index as usize],
            weekday_index,
        });

        if weekday_index == SATURDAY || i64::from(day) == days_in_month {
            weeks.push(WeekGroup {
                week_number,
                days: std::mem::take(&mut current),
            });
            week_number += 1;
        }
    }

    if !current.is_empty() {
        weeks.push(WeekGroup {
            week_number,
            days: current,
        });
    }

    weeks
}

/// Years offered by the month pickers: five back, one ahead.
pub fn year_options(current_year: i32) -> RangeInclusive<i32> {
    (current_year - 5)..=(current_year + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(weeks: &[WeekGroup]) -> Vec<u32> {
        weeks
            .iter()
            .flat_map(|week| week.days.iter().map(|info| info.day))
            .collect()
    }

    fn non_sundays(month: MonthSpec) -> Vec<u32> {
        (1..=month.days_in_month())
            .filter(|day| {
                NaiveDate::from_ymd_opt(month.year, month.month, *day)
                    .unwrap()
                    .weekday()
                    .num_days_from_sunday()
                    != 0
            })
            .collect()
    }

    #[test]
    fn january_2024_starts_on_monday() {
        let weeks = build_weeks(2024, 1, 31);
        let first = &weeks[0];
        assert_eq!(first.week_number, 1);
        let names: Vec<_> = first.days.iter().map(|d| (d.weekday_name, d.day)).collect();
        assert_eq!(
            names,
            vec![
                ("Mon", 1),
                ("Tue", 2),
                ("Wed", 3),
                ("Thu", 4),
                ("Fri", 5),
                ("Sat", 6)
            ]
        );
        assert_eq!(weeks[1].days[0].day, 8);
        assert!(!flatten(&weeks).contains(&7));
    }

    #[test]
    fn month_starting_on_sunday_drops_day_one() {
        let weeks = build_weeks(2024, 9, 30);
        assert_eq!(weeks[0].days[0].day, 2);
        assert_eq!(weeks[0].days[0].weekday_name, "Mon");
    }

    #[test]
    fn month_ending_on_sunday_closes_on_saturday() {
        // March 2024 ends on Sunday the 31st.
        let weeks = build_weeks(2024, 3, 31);
        let last = weeks.last().unwrap();
        assert_eq!(last.days.last().unwrap().day, 30);
        assert_eq!(last.days.last().unwrap().weekday_index, 6);
        assert!(weeks.iter().all(|week| !week.days.is_empty()));
        assert!(!flatten(&weeks).contains(&31));
    }

    #[test]
    fn short_final_week_closes_on_last_day() {
        // February 2024 ends on Thursday the 29th.
        let weeks = build_weeks(2024, 2, 29);
        let last = weeks.last().unwrap();
        let days: Vec<_> = last.days.iter().map(|d| d.day).collect();
        assert_eq!(days, vec![26, 27, 28, 29]);
    }

    #[test]
    fn invalid_day_count_yields_no_weeks() {
        assert!(build_weeks(2024, 1, 0).is_empty());
        assert!(build_weeks(2024, 1, -3).is_empty());
    }

    #[test]
    fn overlong_day_count_skips_missing_days() {
        let weeks = build_weeks(2024, 4, 31);
        assert_eq!(flatten(&weeks), non_sundays(MonthSpec::new(2024, 4).unwrap()));
    }

    #[test]
    fn weeks_cover_every_non_sunday_in_order() {
        for year in [1900, 1999, 2000, 2023, 2024, 2025, 2100] {
            for m in 1..=12 {
                let month = MonthSpec::new(year, m).unwrap();
                let weeks = build_weeks(year, m, i64::from(month.days_in_month()));

                assert_eq!(flatten(&weeks), non_sundays(month), "{}", month.label());
                for (index, week) in weeks.iter().enumerate() {
                    assert_eq!(week.week_number as usize, index + 1);
                    assert!(!week.days.is_empty() && week.days.len() <= 6);
                    if index + 1 < weeks.len() {
                        assert_eq!(week.days.last().unwrap().weekday_index, 6);
                    }
                }
            }
        }
    }

    #[test]
    fn navigation_wraps_year_boundaries() {
        let january = MonthSpec::new(2024, 1).unwrap();
        assert_eq!(january.previous(), MonthSpec::new(2023, 12).unwrap());
        assert_eq!(january.previous().next(), january);
        let december = MonthSpec::new(2024, 12).unwrap();
        assert_eq!(december.next(), MonthSpec::new(2025, 1).unwrap());
        assert!(MonthSpec::new(2024, 13).is_none());
        assert!(MonthSpec::new(2024, 0).is_none());
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(MonthSpec::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthSpec::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthSpec::new(1900, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthSpec::new(2024, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn year_options_span_five_back_one_ahead() {
        let years: Vec<_> = year_options(2026).collect();
        assert_eq!(years, vec![2021, 2022, 2023, 2024, 2025, 2026, 2027]);
    }
}
