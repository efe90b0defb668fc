use super::Flash;
use crate::models::{
    AttendancePayload, AttendanceRecord, AttendanceStatus, Student, UploadResponse,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

pub const MISSING_CLASS: &str = "Please select a class and ensure students are loaded.";

/// The mark-attendance page: one class, one date, a status per student.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceForm {
    pub class_section: Option<String>,
    pub date: NaiveDate,
    pub students: Vec<Student>,
    pub statuses: BTreeMap<i64, AttendanceStatus>,
    pub flash: Flash,
    pub upload: Option<UploadResponse>,
}

impl AttendanceForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            class_section: None,
            date: today,
            students: Vec::new(),
            statuses: BTreeMap::new(),
            flash: Flash::default(),
            upload: None,
        }
    }

    /// Switching class drops the previous roster.
    pub fn select_class(&mut self, class_section: Option<String>) {
        self.class_section = class_section.filter(|class| !class.is_empty());
        self.students.clear();
        self.statuses.clear();
        self.flash.clear();
    }

    /// Everyone starts out present.
    pub fn load_students(&mut self, students: Vec<Student>) {
        self.statuses = students
            .iter()
            .map(|student| (student.student_id, AttendanceStatus::Present))
            .collect();
        self.students = students;
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn toggle(&mut self, student_id: i64) -> bool {
        match self.statuses.get_mut(&student_id) {
            Some(status) => {
                *status = status.toggled();
                true
            }
            None => false,
        }
    }

    pub fn mark_all(&mut self, status: AttendanceStatus) {
        self.statuses = self
            .students
            .iter()
            .map(|student| (student.student_id, status))
            .collect();
    }

    pub fn status_of(&self, student_id: i64) -> AttendanceStatus {
        self.statuses.get(&student_id).copied().unwrap_or_default()
    }

    pub fn present_count(&self) -> usize {
        self.count(AttendanceStatus::Present)
    }

    pub fn absent_count(&self) -> usize {
        self.count(AttendanceStatus::Absent)
    }

    fn count(&self, wanted: AttendanceStatus) -> usize {
        self.statuses.values().filter(|status| **status == wanted).count()
    }

    pub fn payload(&self) -> Result<AttendancePayload, &'static str> {
        let class_section = match &self.class_section {
            Some(class) if !self.students.is_empty() => class.clone(),
            _ => return Err(MISSING_CLASS),
        };
        let records = self
            .students
            .iter()
            .map(|student| AttendanceRecord {
                student_id: student.student_id,
                status: self.status_of(student.student_id),
            })
            .collect();
        Ok(AttendancePayload {
            class_section,
            date: self.date.format("%Y-%m-%d").to_string(),
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Student> {
        vec![
            Student {
                student_id: 1,
                name: "Asha".to_string(),
            },
            Student {
                student_id: 2,
                name: "Ravi".to_string(),
            },
        ]
    }

    fn form() -> AttendanceForm {
        let mut form = AttendanceForm::new(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        form.select_class(Some("5-A".to_string()));
        form.load_students(roster());
        form
    }

    #[test]
    fn students_default_to_present() {
        let form = form();
        assert_eq!(form.present_count(), 2);
        assert_eq!(form.absent_count(), 0);
    }

    #[test]
    fn toggle_flips_one_student() {
        let mut form = form();
        assert!(form.toggle(2));
        assert_eq!(form.status_of(2), AttendanceStatus::Absent);
        assert_eq!(form.status_of(1), AttendanceStatus::Present);
        assert!(form.toggle(2));
        assert_eq!(form.status_of(2), AttendanceStatus::Present);
        assert!(!form.toggle(99));
    }

    #[test]
    fn mark_all_overrides_individual_choices() {
        let mut form = form();
        form.toggle(1);
        form.mark_all(AttendanceStatus::Absent);
        assert_eq!(form.absent_count(), 2);
        form.mark_all(AttendanceStatus::Present);
        assert_eq!(form.present_count(), 2);
    }

    #[test]
    fn payload_carries_date_and_statuses() {
        let mut form = form();
        form.toggle(1);
        let payload = form.payload().unwrap();
        assert_eq!(payload.class_section, "5-A");
        assert_eq!(payload.date, "2024-01-08");
        assert_eq!(payload.records[0].status, AttendanceStatus::Absent);
        assert_eq!(payload.records[1].status, AttendanceStatus::Present);
    }

    #[test]
    fn payload_requires_class_and_roster() {
        let mut form = AttendanceForm::new(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(form.payload().unwrap_err(), MISSING_CLASS);
        form.select_class(Some("5-A".to_string()));
        assert_eq!(form.payload().unwrap_err(), MISSING_CLASS);
    }

    #[test]
    fn changing_class_clears_roster() {
        let mut form = form();
        form.select_class(Some("6-B".to_string()));
        assert!(form.students.is_empty());
        assert!(form.statuses.is_empty());
        form.select_class(Some(String::new()));
        assert!(form.class_section.is_none());
    }
}
