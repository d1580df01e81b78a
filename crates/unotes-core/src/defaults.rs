//! Centralized default constants for the unotes tutor service.
//!
//! All crates reference these constants instead of defining their own magic
//! numbers. Organized by domain area.

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 5000;

/// Default bind address.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default CORS origin (the notes UI dev server).
pub const ALLOWED_ORIGINS: &str = "http://localhost:3000";

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;

/// Maximum request body size in bytes (20 MB, slide images may be inlined as data URLs).
pub const MAX_BODY_SIZE_BYTES: usize = 20 * 1024 * 1024;

// =============================================================================
// INFERENCE
// =============================================================================

/// Default OpenAI-compatible API endpoint.
pub const OPENAI_URL: &str = "https://api.openai.com/v1";

/// Vision-capable model used whenever an image must be interpreted.
pub const VISION_MODEL: &str = "gpt-4-vision-preview";

/// Strongest text-only model for image-less chat.
pub const TEXT_MODEL: &str = "gpt-4-turbo-preview";

/// HTTP transport timeout for model calls in seconds.
pub const GEN_TIMEOUT_SECS: u64 = 300;

/// Timeout for the inference health probe in seconds.
pub const HEALTH_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// GENERATION PARAMETERS
// =============================================================================

/// AUTO mode output ceiling; slide walkthroughs run long.
pub const AUTO_MAX_TOKENS: u32 = 1500;

/// AUTO mode temperature, balanced for consistent explanations.
pub const AUTO_TEMPERATURE: f32 = 0.7;

/// CHAT mode output ceiling; answers are more targeted.
pub const CHAT_MAX_TOKENS: u32 = 1200;

/// CHAT mode temperature, higher for exploratory answers.
pub const CHAT_TEMPERATURE: f32 = 0.8;

// =============================================================================
// PROMPT CONTEXT
// =============================================================================

/// Placeholder slide number when the caller sends no index.
pub const SLIDE_INDEX_PLACEHOLDER: &str = "Current";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_is_more_exploratory_than_auto() {
        assert!(CHAT_TEMPERATURE > AUTO_TEMPERATURE);
        assert!(CHAT_MAX_TOKENS < AUTO_MAX_TOKENS);
    }

    #[test]
    fn test_default_url_is_https() {
        assert!(OPENAI_URL.starts_with("https://"));
    }
}
