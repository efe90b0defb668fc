use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSection {
    pub class_section: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Present => Self::Absent,
            Self::Absent => Self::Present,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Present" => Some(Self::Present),
            "Absent" => Some(Self::Absent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub student_id: i64,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendancePayload {
    pub class_section: String,
    pub date: String,
    pub records: Vec<AttendanceRecord>,
}

/// Reply of both submit endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub total_records: Option<u64>,
    pub inserted_records: Option<u64>,
    pub updated_records: Option<u64>,
    pub new_students_created: Option<u64>,
    pub errors: Option<Vec<String>>,
}

/// One day's mark in the monthly attendance view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceMark {
    #[serde(rename = "P")]
    Present,
    #[serde(rename = "A")]
    Absent,
}

impl fmt::Display for AttendanceMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => f.write_str("P"),
            Self::Absent => f.write_str("A"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyAttendanceStudent {
    pub student_id: i64,
    pub name: String,
    #[serde(default)]
    pub attendance: BTreeMap<String, AttendanceMark>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyAttendanceResponse {
    pub days_in_month: i64,
    #[serde(default)]
    pub students: Vec<MonthlyAttendanceStudent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamRecord {
    pub student_id: i64,
    pub marks: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamPayload {
    pub class_section: String,
    pub exam_date: String,
    pub subject: String,
    pub records: Vec<ExamRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyExamStudent {
    pub student_id: i64,
    pub name: String,
    #[serde(default)]
    pub exams: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyExamResponse {
    pub days_in_month: i64,
    #[serde(default)]
    pub students: Vec<MonthlyExamStudent>,
}

#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub question: &'a str,
}

/// Picks the reply text out of a Q&A response: the first non-empty of
/// `answer`, `response` and `message`, else the whole body as JSON.
pub fn answer_text(body: &serde_json::Value) -> String {
    ["answer", "response", "message"]
        .iter()
        .filter_map(|key| body.get(key).and_then(serde_json::Value::as_str))
        .find(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn answer_text_prefers_answer_then_response_then_message() {
        assert_eq!(answer_text(&json!({"answer": "a", "message": "m"})), "a");
        assert_eq!(answer_text(&json!({"answer": "", "response": "r"})), "r");
        assert_eq!(answer_text(&json!({"message": "m"})), "m");
    }

    #[test]
    fn answer_text_falls_back_to_raw_json() {
        assert_eq!(answer_text(&json!({"data": 1})), r#"{"data":1}"#);
    }

    #[test]
    fn monthly_attendance_decodes_sparse_marks() {
        let body = r#"{"days_in_month": 31, "students": [
            {"student_id": 7, "name": "Asha", "attendance": {"1": "P", "3": "A"}}
        ]}"#;
        let parsed: MonthlyAttendanceResponse = serde_json::from_str(body).unwrap();
        let marks = &parsed.students[0].attendance;
        assert_eq!(marks.get("1"), Some(&AttendanceMark::Present));
        assert_eq!(marks.get("3"), Some(&AttendanceMark::Absent));
        assert!(marks.get("2").is_none());
    }

    #[test]
    fn attendance_payload_uses_full_status_names() {
        let payload = AttendancePayload {
            class_section: "5-A".to_string(),
            date: "2024-01-08".to_string(),
            records: vec![AttendanceRecord {
                student_id: 1,
                status: AttendanceStatus::Absent,
            }],
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["records"][0]["status"], "Absent");
    }
}
