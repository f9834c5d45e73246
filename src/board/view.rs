use crate::adapters::messages_api::MessageApi;
use crate::board::input::{Command, HELP};
use crate::models::messages::{Message, MessageInput};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Loaded(Vec<Message>),
    Failed(String),
}

/// The form being edited. An empty `id` means the draft is a new message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub id: String,
    pub name: String,
    pub content: String,
}

impl Draft {
    pub fn is_editing(&self) -> bool {
        !self.id.is_empty()
    }

    fn to_input(&self) -> MessageInput {
        MessageInput::new(self.name.clone(), self.content.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Board<A> {
    api: A,
    list: ListState,
    draft: Draft,
    notice: Option<String>,
}

impl<A: MessageApi> Board<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            list: ListState::Loading,
            draft: Draft::default(),
            notice: None,
        }
    }

    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub async fn handle(&mut self, command: Command) -> Flow {
        self.notice = None;
        match command {
            Command::Name(name) => self.draft.name = name,
            Command::Content(content) => self.draft.content = content,
            Command::Edit(position) => self.edit(position),
            Command::Delete(position) => self.delete(position).await,
            Command::Submit => self.submit().await,
            Command::Clear => self.draft = Draft::default(),
            Command::Refresh => self.refresh().await,
            Command::Help => self.notice = Some(HELP.to_owned()),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    pub async fn refresh(&mut self) {
        self.list = ListState::Loading;
        self.list = match self.api.get_messages().await {
            Ok(messages) => ListState::Loaded(messages),
            Err(e) => ListState::Failed(e.to_string()),
        };
    }

    /// Creates or updates depending on the draft id. On success the draft is
    /// discarded and the list reloaded; on failure the draft is kept and the
    /// error shown as a notice.
    pub async fn submit(&mut self) {
        let input = self.draft.to_input();
        let result = match self.draft.is_editing() {
            true => self.api.update_message(&self.draft.id, input).await,
            false => self.api.create_message(input).await,
        };
        match result {
            Ok(_) => {
                self.draft = Draft::default();
                self.refresh().await;
            }
            Err(e) => self.notice = Some(format!("Error: {e}")),
        }
    }

    pub fn edit(&mut self, position: usize) {
        match self.message_at(position).cloned() {
            Some(message) => {
                self.draft = Draft {
                    id: message.id,
                    name: message.name,
                    content: message.content,
                }
            }
            None => self.notice = Some(format!("No message #{position}")),
        }
    }

    pub async fn delete(&mut self, position: usize) {
        let Some(id) = self.message_at(position).map(|message| message.id.clone()) else {
            self.notice = Some(format!("No message #{position}"));
            return;
        };
        match self.api.delete_message(&id).await {
            Ok(_) => {
                if self.draft.id == id {
                    self.draft = Draft::default();
                }
                self.refresh().await;
            }
            Err(e) => self.notice = Some(format!("Error: {e}")),
        }
    }

    fn message_at(&self, position: usize) -> Option<&Message> {
        match &self.list {
            ListState::Loaded(messages) => messages.get(position.checked_sub(1)?),
            _ => None,
        }
    }

    /// Loading and list failures replace the whole screen.
    pub fn render(&self) -> String {
        let messages = match &self.list {
            ListState::Loading => return "Loading...\n".to_owned(),
            ListState::Failed(error) => return format!("Error: {error}\n"),
            ListState::Loaded(messages) => messages,
        };

        let mut out = String::new();
        let _ = writeln!(out, "== Messages ==");
        let _ = writeln!(out, "  name:    {}", self.draft.name);
        let _ = writeln!(out, "  content: {}", self.draft.content);
        let action = match self.draft.is_editing() {
            true => "Update Message",
            false => "Create Message",
        };
        let _ = writeln!(out, "  [submit: {action}]");
        if let Some(notice) = &self.notice {
            let _ = writeln!(out, "{notice}");
        }
        let _ = writeln!(out);
        if messages.is_empty() {
            let _ = writeln!(out, "(no messages)");
        }
        for (i, message) in messages.iter().enumerate() {
            let _ = writeln!(out, "{:>3}. {}", i + 1, message.name);
            let _ = writeln!(out, "     {}", message.content);
        }
        out
    }
}
