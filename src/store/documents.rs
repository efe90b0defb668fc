use chrono::{DateTime, Local};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Uploading,
    Processing,
    Ready,
    Error,
}

impl DocumentStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Uploading => "uploading",
            Self::Processing => "processing",
            Self::Ready => "ready",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub content_type: String,
    pub uploaded_at: DateTime<Local>,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentStore {
    pub documents: Vec<Document>,
}

impl DocumentStore {
    pub fn add(
        &mut self,
        name: impl Into<String>,
        size: u64,
        content_type: impl Into<String>,
        now: DateTime<Local>,
    ) -> String {
        let document = Document {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            size,
            content_type: content_type.into(),
            uploaded_at: now,
            status: DocumentStatus::Uploading,
        };
        let id = document.id.clone();
        self.documents.push(document);
        id
    }

    /// False when the document has been deleted in the meantime.
    pub fn set_status(&mut self, id: &str, status: DocumentStatus) -> bool {
        match self.documents.iter_mut().find(|doc| doc.id == id) {
            Some(doc) => {
                doc.status = status;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.documents.len();
        self.documents.retain(|doc| doc.id != id);
        self.documents.len() != before
    }
}

pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_start_uploading_and_advance() {
        let mut store = DocumentStore::default();
        let id = store.add("notes.pdf", 2048, "application/pdf", Local::now());
        assert_eq!(store.documents[0].status, DocumentStatus::Uploading);

        assert!(store.set_status(&id, DocumentStatus::Processing));
        assert!(store.set_status(&id, DocumentStatus::Ready));
        assert_eq!(store.documents[0].status, DocumentStatus::Ready);
    }

    #[test]
    fn status_updates_after_delete_are_ignored() {
        let mut store = DocumentStore::default();
        let id = store.add("notes.pdf", 10, "application/pdf", Local::now());
        assert!(store.delete(&id));
        assert!(!store.set_status(&id, DocumentStatus::Ready));
        assert!(store.documents.is_empty());
    }

    #[test]
    fn unreadable_documents_are_marked() {
        let mut store = DocumentStore::default();
        let id = store.add("scan.pdf", 0, "application/pdf", Local::now());
        assert!(store.set_status(&id, DocumentStatus::Error));
        assert_eq!(store.documents[0].status.label(), "error");
    }

    #[test]
    fn ids_are_unique() {
        let mut store = DocumentStore::default();
        let now = Local::now();
        let a = store.add("a.txt", 1, "text/plain", now);
        let b = store.add("a.txt", 1, "text/plain", now);
        assert_ne!(a, b);
    }

    #[test]
    fn file_sizes_are_human_readable() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
    }
}
