use crate::store::Workspace;
use crate::store::chat::Role;
use maud::{Markup, html};

pub const SUGGESTIONS: [&str; 4] = [
    "Summarize the uploaded document",
    "What are the key points?",
    "Explain the main concepts",
    "Find specific information",
];

pub fn page(workspace: &Workspace) -> Markup {
    let messages = workspace.chat.messages();
    html! {
        @if messages.is_empty() {
            div.empty {
                h2 { "How can I help you today?" }
                p {
                    "Upload documents in the sidebar and ask me questions about them, "
                    "or just start a conversation."
                }
                div.suggestions {
                    @for suggestion in SUGGESTIONS {
                        form method="post" action="/chat/send" {
                            input type="hidden" name="content" value=(suggestion);
                            button type="submit" { (suggestion) }
                        }
                    }
                }
            }
        } @else {
            div.messages {
                @for message in messages {
                    @let user = message.role == Role::User;
                    div.message.user[user] {
                        span.muted {
                            @if user { "You" } @else { "Assistant" }
                            " · " (message.timestamp.format("%H:%M"))
                        }
                        div.bubble { (message.content) }
                    }
                }
                @if workspace.chat.is_waiting() {
                    p.muted { "Thinking..." }
                }
            }
        }
        form.composer method="post" action="/chat/send" {
            textarea name="content" rows="2" placeholder="Ask a question..." required {}
            button.primary type="submit" { "Send" }
        }
    }
}
