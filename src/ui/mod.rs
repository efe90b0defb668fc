pub mod attendance;
pub mod chat;
pub mod exams;
pub mod grid;

use crate::handlers::ClassOptions;
use crate::store::documents::format_file_size;
use crate::store::{Flash, Workspace};
use axum::response::Html;
use maud::{DOCTYPE, Markup, PreEscaped, html};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Chat,
    Attendance,
    MonthlyAttendance,
    Exams,
    MonthlyExams,
}

impl Page {
    pub fn path(self) -> &'static str {
        match self {
            Self::Chat => "/",
            Self::Attendance => "/attendance",
            Self::MonthlyAttendance => "/attendance/monthly",
            Self::Exams => "/exams",
            Self::MonthlyExams => "/exams/monthly",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Chat => "Assistant",
            Self::Attendance => "Attendance Management",
            Self::MonthlyAttendance => "Monthly Attendance",
            Self::Exams => "Exam Results Entry",
            Self::MonthlyExams => "Monthly Exam Results",
        }
    }
}

pub fn render(markup: Markup) -> Html<String> {
    Html(markup.into_string())
}

/// Sidebar forms carry the page they came from so the redirect lands back there.
fn from(action: &str, page: Page) -> String {
    format!("{action}?return_to={}", page.path())
}

pub fn layout(workspace: &Workspace, page: Page, body: Markup) -> Markup {
    let sidebar = &workspace.sidebar;
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (page.title()) " · School Assistant" }
                style { (PreEscaped(STYLESHEET)) }
            }
            body.dark[sidebar.dark_mode] {
                div.shell {
                    @if sidebar.open {
                        (side_panel(workspace, page))
                    }
                    main.main {
                        header.topbar {
                            form method="post" action=(from("/sidebar/toggle", page)) {
                                button.ghost type="submit" {
                                    @if sidebar.open { "Hide sidebar" } @else { "Show sidebar" }
                                }
                            }
                            h1 { (page.title()) }
                        }
                        div.content { (body) }
                    }
                }
            }
        }
    }
}

fn nav_link(target: Page, current: Page, label: &str) -> Markup {
    html! {
        a.nav-link.active[target == current] href=(target.path()) { (label) }
    }
}

fn side_panel(workspace: &Workspace, page: Page) -> Markup {
    let sidebar = &workspace.sidebar;
    let current_chat = workspace.chat.current_chat_id.as_deref();
    html! {
        aside.sidebar {
            form method="post" action="/chat/new" {
                button.primary.wide type="submit" { "+ New Chat" }
            }

            nav.section {
                (nav_link(Page::Chat, page, "Chat"))
                form method="post" action=(from("/sidebar/attendance", page)) {
                    button.section-toggle type="submit" {
                        "Attendance " @if sidebar.attendance_expanded { "▾" } @else { "▸" }
                    }
                }
                @if sidebar.attendance_expanded {
                    div.sub-nav {
                        (nav_link(Page::Attendance, page, "Mark Attendance"))
                        (nav_link(Page::MonthlyAttendance, page, "Monthly View"))
                    }
                }
                form method="post" action=(from("/sidebar/exams", page)) {
                    button.section-toggle type="submit" {
                        "Exams " @if sidebar.exams_expanded { "▾" } @else { "▸" }
                    }
                }
                @if sidebar.exams_expanded {
                    div.sub-nav {
                        (nav_link(Page::Exams, page, "Enter Marks"))
                        (nav_link(Page::MonthlyExams, page, "Monthly View"))
                    }
                }
            }

            div.section {
                h3 { "Chat History" }
                @if workspace.chat.chats.is_empty() {
                    p.muted { "No conversations yet" }
                }
                ul.list {
                    @for chat in &workspace.chat.chats {
                        li.item.active[current_chat == Some(chat.id.as_str())] {
                            form method="post" action={ "/chat/" (chat.id) "/select" } {
                                button.link type="submit" title=(chat.title) { (chat.title) }
                            }
                            form method="post" action={ "/chat/" (chat.id) "/delete" } {
                                button.icon type="submit" title="Delete chat" { "×" }
                            }
                        }
                    }
                }
            }

            div.section {
                h3 { "Documents" }
                form.upload method="post" enctype="multipart/form-data"
                    action=(from("/documents/upload", page)) {
                    input type="file" name="files" multiple;
                    button.ghost type="submit" { "Upload" }
                }
                ul.list {
                    @for document in &workspace.documents.documents {
                        li.item {
                            div.doc {
                                span.doc-name title=(document.name) { (document.name) }
                                span.muted { (format_file_size(document.size)) }
                            }
                            span class={ "badge status-" (document.status.label()) } {
                                (document.status.label())
                            }
                            form method="post"
                                action=(from(&format!("/documents/{}/delete", document.id), page)) {
                                button.icon type="submit" title="Remove document" { "×" }
                            }
                        }
                    }
                }
            }

            form.footer method="post" action=(from("/sidebar/theme", page)) {
                button.ghost.wide type="submit" {
                    @if sidebar.dark_mode { "Light mode" } @else { "Dark mode" }
                }
            }
        }
    }
}

pub fn flash(flash: &Flash) -> Markup {
    html! {
        @if let Some(error) = &flash.error {
            div.alert.error { (error) }
        }
        @if let Some(success) = &flash.success {
            div.alert.success { (success) }
        }
    }
}

pub fn class_options(options: &ClassOptions, selected: Option<&str>) -> Markup {
    html! {
        option value="" { "Select a class..." }
        @for name in &options.names {
            option value=(name) selected[selected == Some(name.as_str())] { (name) }
        }
    }
}

pub fn load_error(options: &ClassOptions) -> Markup {
    html! {
        @if let Some(error) = options.error {
            div.alert.error { (error) }
        }
    }
}

pub fn empty_state(message: &str) -> Markup {
    html! {
        div.empty { p { (message) } }
    }
}

const STYLESHEET: &str = r#"
@import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

:root {
  --bg: #f8f3e6;
  --panel: rgba(255, 255, 255, 0.86);
  --ink: #2b2a28;
  --muted: #8b857d;
  --border: rgba(47, 72, 88, 0.12);
  --accent: #ff6b4a;
  --accent-2: #2f4858;
  --green: #2e9d5b;
  --blue: #3a78c2;
  --yellow: #c99a1d;
  --red: #d4483b;
  --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
}

body.dark {
  --bg: #1d1f22;
  --panel: #26292d;
  --ink: #ececec;
  --muted: #9aa0a6;
  --border: rgba(255, 255, 255, 0.1);
  --accent-2: #8fb3c9;
  --shadow: none;
}

* { box-sizing: border-box; }

body {
  margin: 0;
  min-height: 100vh;
  background: var(--bg);
  color: var(--ink);
  font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
}

h1, h2 { font-family: "Fraunces", "Georgia", serif; font-weight: 600; margin: 0; }
h3 { font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.12em; color: var(--muted); }

.shell { display: flex; min-height: 100vh; }
.main { flex: 1; min-width: 0; display: flex; flex-direction: column; }
.topbar { display: flex; align-items: center; gap: 16px; padding: 16px 24px; border-bottom: 1px solid var(--border); }
.content { padding: 24px; display: grid; gap: 20px; }

.sidebar {
  width: 280px;
  flex-shrink: 0;
  padding: 16px;
  display: flex;
  flex-direction: column;
  gap: 16px;
  background: var(--panel);
  border-right: 1px solid var(--border);
}
.sidebar .footer { margin-top: auto; }
.nav-link { display: block; padding: 8px 12px; border-radius: 12px; color: inherit; text-decoration: none; }
.nav-link.active, .item.active { background: rgba(255, 107, 74, 0.14); }
.sub-nav { padding-left: 12px; }
.list { list-style: none; margin: 0; padding: 0; display: grid; gap: 4px; }
.item { display: flex; align-items: center; gap: 6px; padding: 4px 8px; border-radius: 12px; }
.item form:first-child { flex: 1; min-width: 0; }
.doc { flex: 1; min-width: 0; display: grid; }
.doc-name, .link { overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
.muted { color: var(--muted); font-size: 0.85rem; }

button {
  appearance: none;
  border: none;
  border-radius: 999px;
  padding: 10px 18px;
  font: inherit;
  font-weight: 600;
  cursor: pointer;
  transition: transform 150ms ease;
}
button:active { transform: scale(0.98); }
button:disabled { opacity: 0.5; cursor: default; }
.primary { background: var(--accent); color: white; }
.secondary { background: var(--accent-2); color: white; }
.ghost, .section-toggle { background: transparent; color: inherit; border: 1px solid var(--border); }
.section-toggle { width: 100%; text-align: left; border: none; padding: 8px 12px; }
.link { background: none; color: inherit; padding: 4px; width: 100%; text-align: left; font-weight: 400; }
.icon { background: none; color: var(--muted); padding: 4px 8px; }
.wide { width: 100%; }

.card {
  background: var(--panel);
  border: 1px solid var(--border);
  border-radius: 18px;
  padding: 20px;
  box-shadow: var(--shadow);
  display: grid;
  gap: 14px;
}
.row { display: flex; flex-wrap: wrap; align-items: end; gap: 12px; }
label { display: grid; gap: 6px; font-size: 0.85rem; color: var(--muted); }
select, input, textarea {
  font: inherit;
  color: var(--ink);
  background: transparent;
  border: 1px solid var(--border);
  border-radius: 12px;
  padding: 10px 12px;
}
input.mark { width: 80px; text-align: center; }

.alert { padding: 12px 16px; border-radius: 12px; }
.alert.error { background: rgba(212, 72, 59, 0.12); color: var(--red); }
.alert.success { background: rgba(46, 157, 91, 0.12); color: var(--green); }
.empty { text-align: center; color: var(--muted); padding: 48px 0; }

.counters { display: flex; gap: 16px; }
.badge { display: inline-block; padding: 2px 10px; border-radius: 999px; font-size: 0.75rem; font-weight: 600; }
.status-uploading, .status-processing { background: rgba(201, 154, 29, 0.18); color: var(--yellow); }
.status-ready, .present, .grade-a { background: rgba(46, 157, 91, 0.18); color: var(--green); }
.status-error, .absent, .grade-f { background: rgba(212, 72, 59, 0.18); color: var(--red); }
.grade-b { background: rgba(58, 120, 194, 0.18); color: var(--blue); }
.grade-c { background: rgba(201, 154, 29, 0.18); color: var(--yellow); }

table { width: 100%; border-collapse: collapse; }
th, td { padding: 8px; border-bottom: 1px solid var(--border); text-align: center; }
th.name, td.name { text-align: left; position: sticky; left: 0; background: var(--panel); }
th.week { color: var(--accent); border-right: 1px solid var(--border); }
.day-name { display: block; font-size: 0.7rem; color: var(--muted); }
.grid-wrap { overflow-x: auto; }
.mark-present, .mark-high { color: var(--green); font-weight: 600; }
.mark-absent, .mark-low { color: var(--red); font-weight: 600; }
.mark-good { color: var(--blue); font-weight: 600; }
.mark-fair { color: var(--yellow); font-weight: 600; }
.mark-none { color: var(--muted); }
.legend { display: flex; gap: 16px; font-size: 0.85rem; }

.messages { display: grid; gap: 16px; max-width: 760px; width: 100%; margin: 0 auto; }
.message { display: grid; gap: 4px; max-width: 85%; }
.message.user { justify-self: end; text-align: right; }
.bubble { padding: 12px 16px; border-radius: 18px; background: var(--panel); border: 1px solid var(--border); white-space: pre-wrap; }
.message.user .bubble { background: var(--accent-2); color: white; }
.suggestions { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 12px; }
.suggestions button { width: 100%; border-radius: 14px; background: var(--panel); color: inherit; border: 1px solid var(--border); font-weight: 400; text-align: left; }
.composer { display: flex; gap: 12px; max-width: 760px; width: 100%; margin: 0 auto; }
.composer textarea { flex: 1; resize: vertical; }
"#;
