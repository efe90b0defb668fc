use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    pub open: bool,
    pub dark_mode: bool,
    pub attendance_expanded: bool,
    pub exams_expanded: bool,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            open: true,
            dark_mode: true,
            attendance_expanded: false,
            exams_expanded: false,
        }
    }
}

impl Sidebar {
    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn toggle_attendance(&mut self) {
        self.attendance_expanded = !self.attendance_expanded;
    }

    pub fn toggle_exams(&mut self) {
        self.exams_expanded = !self.exams_expanded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_open_and_dark() {
        let sidebar = Sidebar::default();
        assert!(sidebar.open && sidebar.dark_mode);
        assert!(!sidebar.attendance_expanded && !sidebar.exams_expanded);
    }

    #[test]
    fn toggles_are_independent() {
        let mut sidebar = Sidebar::default();
        sidebar.toggle_theme();
        sidebar.toggle_exams();
        assert!(!sidebar.dark_mode);
        assert!(sidebar.exams_expanded);
        assert!(sidebar.open);
        assert!(!sidebar.attendance_expanded);
    }
}
