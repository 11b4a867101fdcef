//! Completion service request and response model
//!
//! The envelope mirrors the chat-completions wire shape. Message content is
//! either a plain string or a list of typed parts, and text extraction is a
//! total function over that union.
//!
//! Parsing is lenient below the envelope: a choice, message or part that does
//! not fit its shape degrades to "no text" instead of failing the response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Role of a chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions framing the conversation
    System,
    /// The caller's prompt
    User,
    /// A model reply
    Assistant,
}

/// A single outbound chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author of the message
    pub role: Role,
    /// Message body
    pub content: String,
}

impl ChatMessage {
    /// System message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request sent to the completion service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier (e.g., "grok-beta")
    pub model: String,

    /// Conversation to complete
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Maximum tokens to generate (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Single user prompt sampled at `temperature`, as used by swarm members
    pub fn prompt(model: impl Into<String>, prompt: impl Into<String>, temperature: f64) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: Some(temperature),
            max_tokens: None,
        }
    }

    /// System plus user prompt, as used by the chaos agents
    pub fn chat(
        model: impl Into<String>,
        system: impl Into<String>,
        user: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature: None,
            max_tokens: Some(max_tokens),
        }
    }
}

/// Response envelope from the completion service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEnvelope {
    /// Generated alternatives; entries that fail to parse become empty choices
    #[serde(default, deserialize_with = "lenient_choices")]
    pub choices: Vec<Choice>,
}

/// One generated alternative
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Message, absent when missing or malformed
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<ChoiceMessage>,
}

/// Message carried by a choice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceMessage {
    /// Content, absent when missing or neither a string nor a list
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<Content>,
}

/// Message content: a plain string or a sequence of typed parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    /// Bare string content
    PlainText(String),
    /// List of parts; any JSON value is accepted as a part
    PartList(Vec<ContentPart>),
}

/// A typed content part with optional text
///
/// Deserializes from any JSON value. Only an object contributes, and only its
/// string-valued `type` and `text` members are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentPart {
    /// Part type, e.g. "text" or "image_url"
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Text of the part, when it carries a string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl<'de> Deserialize<'de> for ContentPart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let member = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Ok(Self {
            kind: member("type"),
            text: member("text"),
        })
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_choices<'de, D>(deserializer: D) -> Result<Vec<Choice>, D::Error>
where
    D: Deserializer<'de>,
{
    let choices = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    };
    Ok(choices)
}

impl ContentPart {
    /// Text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: Some("text".to_string()),
            text: Some(text.into()),
        }
    }
}

impl Content {
    /// Extract trimmed, non-empty text.
    ///
    /// Part lists are joined with a newline, skipping parts without text.
    pub fn extract_text(&self) -> Option<String> {
        let joined = match self {
            Self::PlainText(text) => text.trim().to_string(),
            Self::PartList(parts) => parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string(),
        };
        (!joined.is_empty()).then_some(joined)
    }
}

impl CompletionEnvelope {
    /// Envelope with a single plain-text choice
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                message: Some(ChoiceMessage {
                    content: Some(Content::PlainText(text.into())),
                }),
            }],
        }
    }

    /// Text of the first choice, if it has any
    pub fn first_text(&self) -> Option<String> {
        self.choices
            .first()?
            .message
            .as_ref()?
            .content
            .as_ref()?
            .extract_text()
    }
}
