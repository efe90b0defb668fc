use crate::calendar::MonthSpec;
use crate::config::Config;
use crate::errors::ApiError;
use crate::models::{
    AttendancePayload, ClassSection, ExamPayload, MonthlyAttendanceResponse, MonthlyExamResponse,
    QueryRequest, Student, SubmitResponse, UploadResponse, answer_text,
};
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Typed access to the school backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
    chat_url: Url,
}

impl BackendClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.backend_url)
            .map_err(|err| ApiError::new(format!("invalid backend url: {err}")))?;
        let chat_url = Url::parse(&config.chat_url)
            .map_err(|err| ApiError::new(format!("invalid chat url: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::new("backend url cannot be a base"));
        }
        Ok(Self {
            http: Client::new(),
            base_url,
            chat_url,
        })
    }

    pub fn chat_url(&self) -> &str {
        self.chat_url.as_str()
    }

    /// Joins percent-encoded path segments onto the backend base.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn ask(&self, question: &str) -> Result<String, ApiError> {
        let request = self
            .http
            .post(self.chat_url.clone())
            .json(&QueryRequest { question });
        let body: serde_json::Value = send(request).await?;
        Ok(answer_text(&body))
    }

    pub async fn classes(&self) -> Result<Vec<ClassSection>, ApiError> {
        let url = self.endpoint(&["api", "attendance", "classes"]);
        send(self.http.get(url)).await
    }

    pub async fn students(&self, class_section: &str) -> Result<Vec<Student>, ApiError> {
        let url = self.endpoint(&["api", "attendance", "students", class_section]);
        send(self.http.get(url)).await
    }

    pub async fn submit_attendance(
        &self,
        payload: &AttendancePayload,
    ) -> Result<SubmitResponse, ApiError> {
        let url = self.endpoint(&["api", "attendance", "attendance"]);
        self.post_json(url, payload).await
    }

    pub async fn upload_attendance_excel(
        &self,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, ApiError> {
        let url = self.endpoint(&["api", "attendance", "upload-excel"]);
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        send(self.http.post(url).multipart(form)).await
    }

    pub async fn monthly_attendance(
        &self,
        class_section: &str,
        month: MonthSpec,
    ) -> Result<MonthlyAttendanceResponse, ApiError> {
        let url = self.endpoint(&["api", "attendance", "monthly", class_section]);
        let request = self
            .http
            .get(url)
            .query(&[("year", month.year.to_string()), ("month", month.month.to_string())]);
        send(request).await
    }

    pub async fn submit_exam_results(
        &self,
        payload: &ExamPayload,
    ) -> Result<SubmitResponse, ApiError> {
        let url = self.endpoint(&["api", "exams", "results"]);
        self.post_json(url, payload).await
    }

    pub async fn subjects(&self, class_section: &str) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(&["api", "exams", "subjects", class_section]);
        send(self.http.get(url)).await
    }

    pub async fn monthly_exams(
        &self,
        class_section: &str,
        month: MonthSpec,
        subject: &str,
    ) -> Result<MonthlyExamResponse, ApiError> {
        let url = self.endpoint(&["api", "exams", "monthly", class_section]);
        let request = self.http.get(url).query(&[
            ("year", month.year.to_string()),
            ("month", month.month.to_string()),
            ("subject", subject.to_string()),
        ]);
        send(request).await
    }

    async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        send(self.http.post(url).json(body)).await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request.header(ACCEPT, "application/json").send().await?;
    debug!(url = %response.url(), status = %response.status(), "backend response");
    let response = response.error_for_status()?;
    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(backend_url: &str) -> BackendClient {
        BackendClient::new(&Config {
            backend_url: backend_url.to_string(),
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoint_encodes_class_sections() {
        let client = client("http://localhost:8000");
        let url = client.endpoint(&["api", "attendance", "students", "5 A/B"]);
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/attendance/students/5%20A%2FB"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let client = client("http://school.local/backend/");
        let url = client.endpoint(&["api", "exams", "results"]);
        assert_eq!(url.as_str(), "http://school.local/backend/api/exams/results");
    }

    #[test]
    fn rejects_unparseable_urls() {
        let config = Config {
            backend_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(BackendClient::new(&config).is_err());
    }
}
