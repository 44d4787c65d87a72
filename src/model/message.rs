use serde::Serialize;

/// History entries beyond this are trimmed (keeping the system message)
/// to bound token usage.
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One entry of the conversation sent to the model. Serializes directly
/// into the chat-completions wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Keep the system message plus the most recent entries when the history
/// grows past [`HISTORY_LIMIT`].
pub fn trim_history(messages: &mut Vec<ChatMessage>) {
    if messages.len() <= HISTORY_LIMIT {
        return;
    }
    let tail = messages.split_off(messages.len() - (HISTORY_LIMIT - 1));
    messages.truncate(1);
    messages.extend(tail);
}
