//! In-memory state behind every page. Each container is changed only through
//! its own methods, so page behaviour can be tested without a server.

pub mod attendance;
pub mod chat;
pub mod documents;
pub mod exam;
pub mod monthly;
pub mod sidebar;

use chrono::NaiveDate;
use serde::Serialize;

pub use attendance::AttendanceForm;
pub use chat::ChatStore;
pub use documents::DocumentStore;
pub use exam::ExamForm;
pub use monthly::MonthlyView;
pub use sidebar::Sidebar;

/// The outcome of the last action on a page. Starting a new action clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Flash {
    pub fn clear(&mut self) {
        self.error = None;
        self.success = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.success = None;
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.error = None;
        self.success = Some(message.into());
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Workspace {
    pub sidebar: Sidebar,
    pub chat: ChatStore,
    pub documents: DocumentStore,
    pub attendance: AttendanceForm,
    pub exam: ExamForm,
    pub monthly_attendance: MonthlyView,
    pub monthly_exam: MonthlyView,
}

impl Workspace {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            sidebar: Sidebar::default(),
            chat: ChatStore::default(),
            documents: DocumentStore::default(),
            attendance: AttendanceForm::new(today),
            exam: ExamForm::new(today),
            monthly_attendance: MonthlyView::new(today),
            monthly_exam: MonthlyView::new(today),
        }
    }
}
