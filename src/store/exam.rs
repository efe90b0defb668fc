use super::Flash;
use super::attendance::MISSING_CLASS;
use crate::models::{ExamPayload, ExamRecord, Student};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

pub const MISSING_SUBJECT: &str = "Please select a subject.";
pub const MAX_MARKS: u32 = 100;

pub const COMMON_SUBJECTS: [&str; 11] = [
    "Mathematics",
    "Science",
    "English",
    "Hindi",
    "Social Studies",
    "Computer Science",
    "Physics",
    "Chemistry",
    "Biology",
    "History",
    "Geography",
];

/// Class-wide summary of the marks being entered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarksSummary {
    pub average: f64,
    pub highest: i64,
    pub lowest: i64,
}

/// The enter-marks page. Marks are kept as typed so a blank box stays blank.
#[derive(Debug, Clone, Serialize)]
pub struct ExamForm {
    pub class_section: Option<String>,
    pub date: NaiveDate,
    pub subject: Option<String>,
    pub students: Vec<Student>,
    pub marks: BTreeMap<i64, String>,
    pub flash: Flash,
}

impl ExamForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            class_section: None,
            date: today,
            subject: None,
            students: Vec::new(),
            marks: BTreeMap::new(),
            flash: Flash::default(),
        }
    }

    pub fn select_class(&mut self, class_section: Option<String>) {
        self.class_section = class_section.filter(|class| !class.is_empty());
        self.students.clear();
        self.marks.clear();
        self.flash.clear();
    }

    pub fn load_students(&mut self, students: Vec<Student>) {
        self.marks = students
            .iter()
            .map(|student| (student.student_id, String::new()))
            .collect();
        self.students = students;
    }

    pub fn set_details(&mut self, date: NaiveDate, subject: Option<String>) {
        self.date = date;
        self.subject = subject.filter(|subject| !subject.is_empty());
    }

    /// Accepts blank or all-digit input and clamps anything above 100.
    /// Returns false, leaving the mark unchanged, for any other input.
    pub fn set_mark(&mut self, student_id: i64, input: &str) -> bool {
        let Some(mark) = self.marks.get_mut(&student_id) else {
            return false;
        };
        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        *mark = match input.parse::<u32>() {
            Ok(value) if value > MAX_MARKS => MAX_MARKS.to_string(),
            Err(_) if !input.is_empty() => MAX_MARKS.to_string(),
            _ => input.to_string(),
        };
        true
    }

    pub fn set_all(&mut self, value: u32) {
        let value = value.min(MAX_MARKS).to_string();
        self.marks = self
            .students
            .iter()
            .map(|student| (student.student_id, value.clone()))
            .collect();
    }

    pub fn mark_of(&self, student_id: i64) -> &str {
        self.marks.get(&student_id).map(String::as_str).unwrap_or("")
    }

    /// The mark that would be submitted; blank counts as 0.
    pub fn numeric_mark(&self, student_id: i64) -> i64 {
        self.mark_of(student_id).parse().unwrap_or(0)
    }

    pub fn summary(&self) -> Option<MarksSummary> {
        let marks: Vec<i64> = self
            .students
            .iter()
            .map(|student| self.numeric_mark(student.student_id))
            .collect();
        let highest = *marks.iter().max()?;
        let lowest = *marks.iter().min()?;
        Some(MarksSummary {
            average: marks.iter().sum::<i64>() as f64 / marks.len() as f64,
            highest,
            lowest,
        })
    }

    pub fn payload(&self) -> Result<ExamPayload, &'static str> {
        let class_section = match &self.class_section {
            Some(class) if !self.students.is_empty() => class.clone(),
            _ => return Err(MISSING_CLASS),
        };
        let subject = self.subject.clone().ok_or(MISSING_SUBJECT)?;
        let records = self
            .students
            .iter()
            .map(|student| ExamRecord {
                student_id: student.student_id,
                marks: self.numeric_mark(student.student_id),
            })
            .collect();
        Ok(ExamPayload {
            class_section,
            exam_date: self.date.format("%Y-%m-%d").to_string(),
            subject,
            records,
        })
    }
}

pub fn grade(marks: i64) -> &'static str {
    match marks {
        m if m >= 90 => "A+",
        m if m >= 75 => "A",
        m if m >= 50 => "B",
        m if m >= 35 => "C",
        _ => "F",
    }
}
