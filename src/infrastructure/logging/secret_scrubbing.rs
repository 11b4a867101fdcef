//! Redaction of API keys and bearer tokens

use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

/// Replacement for a message that could not be scrubbed
const FULLY_REDACTED: &str = "[REDACTED]";

static SCRUBBER: LazyLock<Option<SecretScrubber>> = LazyLock::new(|| SecretScrubber::new().ok());

/// Scrub `message` with the shared scrubber.
///
/// If the patterns failed to compile the whole message is redacted.
pub fn scrub(message: &str) -> String {
    SCRUBBER.as_ref().map_or_else(
        || FULLY_REDACTED.to_string(),
        |scrubber| scrubber.scrub_message(message),
    )
}

/// Show the first and last four characters of a key, nothing for short keys
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Regex-based redaction of keys and tokens in log text
#[derive(Clone)]
pub struct SecretScrubber {
    api_key_pattern: Regex,
    field_pattern: Regex,
    bearer_pattern: Regex,
}

impl SecretScrubber {
    /// Compile the redaction patterns
    ///
    /// # Errors
    /// Only if a built-in pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            // OpenRouter (sk-or-v1-...) and other sk- style keys
            api_key_pattern: Regex::new(r"sk-(?:or-)?[a-zA-Z0-9_-]{16,}")?,
            field_pattern: Regex::new(
                r#"["']?(?:api_key|apikey|token|secret)["']?\s*[:=]\s*["']?[a-zA-Z0-9_.\-]{16,}["']?"#,
            )?,
            bearer_pattern: Regex::new(r"Bearer\s+[a-zA-Z0-9_.\-]+")?,
        })
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = self
            .bearer_pattern
            .replace_all(message, "Bearer [TOKEN_REDACTED]");
        let scrubbed = self
            .field_pattern
            .replace_all(&scrubbed, |caps: &Captures| {
                let full = &caps[0];
                full.find([':', '='])
                    .map_or_else(
                        || FULLY_REDACTED.to_string(),
                        |pos| format!("{}{FULLY_REDACTED}", &full[..=pos]),
                    )
            })
            .into_owned();
        self.api_key_pattern
            .replace_all(&scrubbed, "[API_KEY_REDACTED]")
            .into_owned()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
