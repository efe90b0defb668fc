use super::Flash;
use crate::calendar::MonthSpec;
use chrono::NaiveDate;
use serde::Serialize;

/// Selection behind a monthly grid page. The exam page also uses the subject
/// fields; the attendance page leaves them empty.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyView {
    pub class_section: Option<String>,
    pub subjects: Vec<String>,
    pub subject: Option<String>,
    pub month: MonthSpec,
    pub flash: Flash,
}

impl MonthlyView {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            class_section: None,
            subjects: Vec::new(),
            subject: None,
            month: MonthSpec::containing(today),
            flash: Flash::default(),
        }
    }

    /// Returns true when the class actually changed; a new class forgets the
    /// subject list that belonged to the old one.
    pub fn select_class(&mut self, class_section: Option<String>) -> bool {
        let class_section = class_section.filter(|class| !class.is_empty());
        if class_section == self.class_section {
            return false;
        }
        self.class_section = class_section;
        self.subjects.clear();
        self.subject = None;
        self.flash.clear();
        true
    }

    pub fn set_subjects(&mut self, subjects: Vec<String>) {
        self.subjects = subjects;
        self.subject = None;
    }

    pub fn select_subject(&mut self, subject: Option<String>) {
        self.subject = subject.filter(|subject| !subject.is_empty());
    }

    /// Ignores a month outside 1..=12.
    pub fn select_month(&mut self, year: i32, month: u32) -> bool {
        match MonthSpec::new(year, month) {
            Some(spec) => {
                self.month = spec;
                true
            }
            None => false,
        }
    }

    pub fn previous(&mut self) {
        self.month = self.month.previous();
    }

    pub fn next(&mut self) {
        self.month = self.month.next();
    }
}
