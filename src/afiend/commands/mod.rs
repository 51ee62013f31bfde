use crate::model::AliasRecord;
use chrono::TimeDelta;

pub mod add;
pub mod delete;
pub mod list;
pub mod source;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_aliases: Vec<AliasRecord>,
    pub reminders: Option<TimeDelta>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_aliases(mut self, aliases: Vec<AliasRecord>) -> Self {
        self.listed_aliases = aliases;
        self
    }

    pub fn with_reminders(mut self, reminders: TimeDelta) -> Self {
        self.reminders = Some(reminders);
        self
    }
}
