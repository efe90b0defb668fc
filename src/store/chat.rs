use chrono::{DateTime, Local};
use serde::Serialize;
use uuid::Uuid;

const TITLE_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl Message {
    fn new(role: Role, content: String, now: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content,
            timestamp: now,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Chat {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

impl Chat {
    fn new(title: String, now: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Chats newest first, plus which one is on screen.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatStore {
    pub chats: Vec<Chat>,
    pub current_chat_id: Option<String>,
    /// Questions sent and not yet answered.
    pub pending: usize,
}

impl ChatStore {
    pub fn new_chat(&mut self, now: DateTime<Local>) -> String {
        let chat = Chat::new("New Chat".to_string(), now);
        let id = chat.id.clone();
        self.chats.insert(0, chat);
        self.current_chat_id = Some(id.clone());
        id
    }

    pub fn select_chat(&mut self, id: &str) -> bool {
        let found = self.chats.iter().any(|chat| chat.id == id);
        if found {
            self.current_chat_id = Some(id.to_string());
        }
        found
    }

    pub fn delete_chat(&mut self, id: &str) -> bool {
        let before = self.chats.len();
        self.chats.retain(|chat| chat.id != id);
        if self.current_chat_id.as_deref() == Some(id) {
            self.current_chat_id = None;
        }
        self.chats.len() != before
    }

    pub fn current_chat(&self) -> Option<&Chat> {
        let id = self.current_chat_id.as_deref()?;
        self.chats.iter().find(|chat| chat.id == id)
    }

    /// Messages of the chat on screen; empty when none is selected.
    pub fn messages(&self) -> &[Message] {
        self.current_chat()
            .map(|chat| chat.messages.as_slice())
            .unwrap_or(&[])
    }

    /// Appends a question to the current chat, starting one if needed, and
    /// returns the id of the chat the answer belongs to. The first question
    /// of a chat becomes its title.
    pub fn push_user_message(&mut self, content: &str, now: DateTime<Local>) -> String {
        let current = self.current_chat().map(|chat| chat.id.clone());
        let id = match current {
            Some(id) => id,
            None => self.new_chat(now),
        };
        let message = Message::new(Role::User, content.to_string(), now);
        if let Some(chat) = self.chat_mut(&id) {
            if chat.messages.is_empty() {
                chat.title = chat_title(content);
            }
            chat.messages.push(message);
            chat.updated_at = now;
        }
        self.pending += 1;
        id
    }

    /// Appends a reply to the chat that asked, even if another chat is now on
    /// screen. A reply for a deleted chat is dropped.
    pub fn push_assistant_message(&mut self, chat_id: &str, content: String, now: DateTime<Local>) {
        self.pending = self.pending.saturating_sub(1);
        if let Some(chat) = self.chat_mut(chat_id) {
            chat.messages.push(Message::new(Role::Assistant, content, now));
            chat.updated_at = now;
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.pending > 0
    }

    fn chat_mut(&mut self, id: &str) -> Option<&mut Chat> {
        self.chats.iter_mut().find(|chat| chat.id == id)
    }
}

pub fn chat_title(content: &str) -> String {
    if content.chars().count() > TITLE_CHARS {
        let head: String = content.chars().take(TITLE_CHARS).collect();
        format!("{head}...")
    } else {
        content.to_string()
    }
}

pub fn connection_error_message(chat_url: &str, error: &str) -> String {
    format!(
        "Sorry, I couldn't connect to the server. Please make sure the backend is running at {chat_url}\n\nError: {error}"
    )
}
