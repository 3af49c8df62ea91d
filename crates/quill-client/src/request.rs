//! Generation request parameters and validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Minimum requested content length, in words.
pub const MIN_CONTENT_LENGTH: u32 = 50;
/// Maximum requested content length, in words.
pub const MAX_CONTENT_LENGTH: u32 = 1000;
/// Default requested content length, in words.
pub const DEFAULT_CONTENT_LENGTH: u32 = 200;

/// Maximum topic length kept after trimming, in characters.
const MAX_TOPIC_LEN: usize = 500;
/// Maximum keyword-list length kept after trimming, in characters.
const MAX_KEYWORDS_LEN: usize = 200;

/// Tone of voice for generated content.
///
/// Serialized as the user-facing label the backend expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[serde(rename = "Professional")]
    Professional,
    #[serde(rename = "Casual")]
    Casual,
    #[serde(rename = "Enthusiastic")]
    Enthusiastic,
    #[serde(rename = "Informative")]
    Informative,
    #[serde(rename = "Humorous/Funny")]
    Humorous,
    #[serde(rename = "Persuasive")]
    Persuasive,
}

impl Tone {
    /// All selectable tones, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Professional,
        Self::Casual,
        Self::Enthusiastic,
        Self::Informative,
        Self::Humorous,
        Self::Persuasive,
    ];

    /// User-facing label, as the backend expects it.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Professional => "Professional",
            Self::Casual => "Casual",
            Self::Enthusiastic => "Enthusiastic",
            Self::Informative => "Informative",
            Self::Humorous => "Humorous/Funny",
            Self::Persuasive => "Persuasive",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = RequestError;

    /// Parse a tone from its variant name or full label, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "professional" => Ok(Self::Professional),
            "casual" => Ok(Self::Casual),
            "enthusiastic" => Ok(Self::Enthusiastic),
            "informative" => Ok(Self::Informative),
            "humorous" | "funny" | "humorous/funny" => Ok(Self::Humorous),
            "persuasive" => Ok(Self::Persuasive),
            _ => Err(RequestError::UnknownTone(s.trim().to_owned())),
        }
    }
}

/// Request validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// Topic missing or blank.
    #[error("topic is required and must be a non-empty string")]
    EmptyTopic,

    /// Requested length outside the supported range.
    #[error("content length must be between 50 and 1000 words, got {0}")]
    LengthOutOfRange(u32),

    /// Unrecognized tone name.
    #[error("unknown tone: {0}")]
    UnknownTone(String),
}

/// Validated, sanitized generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    /// Topic, trimmed and capped at 500 characters.
    pub topic: String,
    /// Tone of voice.
    pub tone: Tone,
    /// Keyword list, trimmed and capped at 200 characters. May be empty.
    pub keywords: String,
    /// Requested length in words (50-1000).
    pub content_length: u32,
}

impl GenerationRequest {
    /// Validate and sanitize request parameters.
    ///
    /// The topic must be non-blank; a missing length defaults to 200
    /// words. Topic and keywords are trimmed and truncated to their caps.
    pub fn new(
        topic: &str,
        tone: Tone,
        keywords: &str,
        content_length: Option<u32>,
    ) -> Result<Self, RequestError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(RequestError::EmptyTopic);
        }

        let content_length = content_length.unwrap_or(DEFAULT_CONTENT_LENGTH);
        if !(MIN_CONTENT_LENGTH..=MAX_CONTENT_LENGTH).contains(&content_length) {
            return Err(RequestError::LengthOutOfRange(content_length));
        }

        Ok(Self {
            topic: truncate_chars(topic, MAX_TOPIC_LEN),
            tone,
            keywords: truncate_chars(keywords.trim(), MAX_KEYWORDS_LEN),
            content_length,
        })
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
