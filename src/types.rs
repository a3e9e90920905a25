//! Common types shared by the handler and the agent runtime.

use serde::{Deserialize, Serialize};

/// Role of a message in the host's conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the human user
    User,
    /// Reply produced by the agent
    Assistant,
    /// Instructions injected by the host
    System,
    /// Output of a tool run by the host
    Tool,
}

/// One entry of the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_host_history() -> Result<(), serde_json::Error> {
        let history: Vec<ChatMessage> = serde_json::from_str(
            r#"[{"role":"system","content":"be nice"},{"role":"user","content":"hello"}]"#,
        )?;
        assert_eq!(history[0].role, MessageRole::System);
        assert_eq!(history[1], ChatMessage::user("hello"));
        Ok(())
    }

    #[test]
    fn serializes_roles_lowercase() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&ChatMessage::assistant("hi"))?;
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
        Ok(())
    }
}
