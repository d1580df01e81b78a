//! Core data models for the unotes tutor service.
//!
//! Three layers live here:
//! - the loosely typed wire shape ([`InboundRequest`]) exactly as the notes UI
//!   sends it, legacy aliases included;
//! - the normalized, mode-specific request ([`CanonicalRequest`],
//!   [`ModeRequest`]) the orchestrator works with;
//! - the outbound [`ModelInvocation`] and the [`ResponseEnvelope`] returned to
//!   the caller.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

// =============================================================================
// MODE
// =============================================================================

/// Interaction mode governing template, required fields and model variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Unprompted slide explanation, requires an image.
    #[serde(rename = "AUTO_MODE")]
    Auto,
    /// User-driven question answering, requires a question.
    #[serde(rename = "CHAT_MODE")]
    Chat,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Auto => "AUTO_MODE",
            Mode::Chat => "CHAT_MODE",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "AUTO_MODE" => Ok(Mode::Auto),
            "CHAT_MODE" => Ok(Mode::Chat),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

// =============================================================================
// NOTES
// =============================================================================

/// A note owned by the notes collaborator. Read-only to the tutor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Ordered content fragments, space-joined for display.
    #[serde(default, deserialize_with = "deserialize_fragments")]
    pub content: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl NoteRef {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, fragment: impl Into<String>) -> Self {
        self.content.push(fragment.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Treat an explicit JSON `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Older UI builds send `content` as a single string (or null) instead of a list.
fn deserialize_fragments<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Fragments {
        Many(Vec<String>),
        One(String),
    }

    Ok(match Option::<Fragments>::deserialize(deserializer)? {
        Some(Fragments::Many(v)) => v,
        Some(Fragments::One(s)) => vec![s],
        None => Vec::new(),
    })
}

// =============================================================================
// INBOUND REQUEST (wire shape)
// =============================================================================

/// Request body as sent by the notes UI. No field is guaranteed present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundRequest {
    /// Explicit mode override (`AUTO_MODE` | `CHAT_MODE`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_question: Option<String>,
    /// Legacy alias for `userQuestion`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_text: Option<String>,
    /// Anything other than a non-negative integer (or numeric string) is
    /// dropped and renders as the "Current" placeholder.
    #[serde(
        default,
        deserialize_with = "deserialize_slide_index",
        skip_serializing_if = "Option::is_none"
    )]
    pub slide_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<NoteRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighted_text: Option<String>,
    /// Legacy alias for `highlightedText`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_name: Option<String>,
    /// Legacy AUTO trigger sent on slide navigation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_slide_analysis: Option<bool>,
}

fn deserialize_slide_index<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|i| u32::try_from(i).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Empty strings count as absent, matching how the UI clears fields.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl InboundRequest {
    /// Collapse legacy aliases and empty values into one canonical request.
    ///
    /// Fails only when an explicit `mode` is outside the known set.
    pub fn normalize(self) -> Result<CanonicalRequest> {
        let mode = present(self.mode).as_deref().map(Mode::from_str).transpose()?;

        Ok(CanonicalRequest {
            mode,
            question: present(self.user_question).or_else(|| present(self.question)),
            image_url: present(self.image_url),
            slide_text: present(self.slide_text),
            slide_index: self.slide_index.filter(|&i| i > 0),
            notes: self.notes.unwrap_or_default(),
            highlighted_text: present(self.highlighted_text).or_else(|| present(self.excerpt)),
            slide_name: present(self.slide_name),
            slide_analysis: self.is_slide_analysis.unwrap_or(false),
        })
    }
}

// =============================================================================
// CANONICAL / MODE-SPECIFIC REQUESTS
// =============================================================================

/// Inbound request after legacy fields are folded in. Input to mode resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalRequest {
    pub mode: Option<Mode>,
    /// `userQuestion`, else legacy `question`. May be whitespace only.
    pub question: Option<String>,
    pub image_url: Option<String>,
    pub slide_text: Option<String>,
    /// 1-based slide number; zero is folded to `None`.
    pub slide_index: Option<u32>,
    pub notes: Vec<NoteRef>,
    /// `highlightedText`, else legacy `excerpt`.
    pub highlighted_text: Option<String>,
    pub slide_name: Option<String>,
    pub slide_analysis: bool,
}

/// AUTO mode input: the image is guaranteed present.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoRequest {
    pub image_url: String,
    pub slide_text: Option<String>,
    pub slide_index: Option<u32>,
    pub notes: Vec<NoteRef>,
}

/// CHAT mode input: the question is guaranteed non-blank.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub question: String,
    pub image_url: Option<String>,
    pub slide_text: Option<String>,
    pub slide_index: Option<u32>,
    pub notes: Vec<NoteRef>,
    pub highlighted_text: Option<String>,
    pub slide_name: Option<String>,
}

/// A request bound to its resolved mode, carrying only the fields that mode uses.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeRequest {
    Auto(AutoRequest),
    Chat(ChatRequest),
}

impl ModeRequest {
    /// Bind a canonical request to `mode`, enforcing the mode's required field.
    pub fn bind(mode: Mode, req: CanonicalRequest) -> Result<Self> {
        match mode {
            Mode::Auto => {
                let image_url = req.image_url.ok_or(Error::MissingRequiredField {
                    mode,
                    field: "imageUrl",
                })?;
                Ok(ModeRequest::Auto(AutoRequest {
                    image_url,
                    slide_text: req.slide_text,
                    slide_index: req.slide_index,
                    notes: req.notes,
                }))
            }
            Mode::Chat => {
                let question = req
                    .question
                    .filter(|q| !q.trim().is_empty())
                    .ok_or(Error::MissingRequiredField {
                        mode,
                        field: "userQuestion",
                    })?;
                Ok(ModeRequest::Chat(ChatRequest {
                    question,
                    image_url: req.image_url,
                    slide_text: req.slide_text,
                    slide_index: req.slide_index,
                    notes: req.notes,
                    highlighted_text: req.highlighted_text,
                    slide_name: req.slide_name,
                }))
            }
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            ModeRequest::Auto(_) => Mode::Auto,
            ModeRequest::Chat(_) => Mode::Chat,
        }
    }
}

// =============================================================================
// MODEL INVOCATION
// =============================================================================

/// Model selection branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelVariant {
    /// Interprets images alongside text.
    Vision,
    /// Strongest text-only model.
    Text,
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelVariant::Vision => write!(f, "vision"),
            ModelVariant::Text => write!(f, "text"),
        }
    }
}

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

/// Processing detail requested for an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    Low,
    #[default]
    High,
    Auto,
}

/// Image reference attached to a user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub url: String,
    pub detail: ImageDetail,
}

impl ImageRef {
    /// Slides are text-dense, so every image goes out at high detail.
    pub fn high(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            detail: ImageDetail::High,
        }
    }
}

/// Body of a message: plain text, or text plus one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    Composite { text: String, image: ImageRef },
}

impl MessageContent {
    /// The text part, regardless of shape.
    pub fn text(&self) -> &str {
        match self {
            MessageContent::Text(text) | MessageContent::Composite { text, .. } => text,
        }
    }

    pub fn image(&self) -> Option<&ImageRef> {
        match self {
            MessageContent::Text(_) => None,
            MessageContent::Composite { image, .. } => Some(image),
        }
    }
}

/// One turn in the outbound conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_with_image(text: impl Into<String>, image: ImageRef) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Composite {
                text: text.into(),
                image,
            },
        }
    }
}

/// Sampling parameters for one call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Fully assembled outbound model call. Built once per request, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInvocation {
    /// System instructions: template plus context fragments.
    pub system: String,
    /// Conversation turns after the system instructions.
    pub messages: Vec<Message>,
    pub variant: ModelVariant,
    /// Concrete model identifier for `variant`.
    pub model: String,
    pub params: GenerationParams,
}

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Final response returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Model output, verbatim.
    pub response: String,
    pub mode: Mode,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl ResponseEnvelope {
    /// Wrap `response` and stamp it with the current time.
    pub fn new(response: String, mode: Mode) -> Self {
        Self::at(response, mode, Utc::now())
    }

    pub fn at(response: String, mode: Mode, timestamp: DateTime<Utc>) -> Self {
        Self {
            response,
            mode,
            timestamp,
        }
    }
}

/// `2024-05-01T12:00:00.000Z`, the shape browsers produce with `toISOString`.
fn serialize_iso_millis<S>(ts: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}
