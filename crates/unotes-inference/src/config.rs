//! Model selection configuration.
//!
//! The catalog maps each [`ModelVariant`] to a concrete model identifier. It is
//! built once at startup (from environment variables or explicitly) and shared
//! read-only by every request.
//!
//! # Environment
//!
//! | Variable | Default |
//! |----------|---------|
//! | `OPENAI_VISION_MODEL` | `gpt-4-vision-preview` |
//! | `OPENAI_TEXT_MODEL` | `gpt-4-turbo-preview` |

use std::env;

use tracing::info;
use unotes_core::defaults::{TEXT_MODEL, VISION_MODEL};
use unotes_core::{Error, ModelVariant, Result};

pub const ENV_VISION_MODEL: &str = "OPENAI_VISION_MODEL";
pub const ENV_TEXT_MODEL: &str = "OPENAI_TEXT_MODEL";

/// Model identifiers per variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    /// Used whenever an image must be interpreted.
    pub vision_model: String,
    /// Used for image-less chat.
    pub text_model: String,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            vision_model: VISION_MODEL.to_string(),
            text_model: TEXT_MODEL.to_string(),
        }
    }
}

impl ModelCatalog {
    pub fn new(vision_model: impl Into<String>, text_model: impl Into<String>) -> Self {
        Self {
            vision_model: vision_model.into(),
            text_model: text_model.into(),
        }
    }

    /// Load from environment variables, falling back to defaults, and validate.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let catalog = Self {
            vision_model: env::var(ENV_VISION_MODEL).unwrap_or(defaults.vision_model),
            text_model: env::var(ENV_TEXT_MODEL).unwrap_or(defaults.text_model),
        };
        catalog.validate()?;

        info!(
            vision_model = %catalog.vision_model,
            text_model = %catalog.text_model,
            "Model catalog loaded"
        );
        Ok(catalog)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.vision_model.trim().is_empty() {
            return Err(Error::Config(format!(
                "{} cannot be empty",
                ENV_VISION_MODEL
            )));
        }
        if self.text_model.trim().is_empty() {
            return Err(Error::Config(format!("{} cannot be empty", ENV_TEXT_MODEL)));
        }
        Ok(())
    }

    /// Concrete model identifier for a variant.
    pub fn model_for(&self, variant: ModelVariant) -> &str {
        match variant {
            ModelVariant::Vision => &self.vision_model,
            ModelVariant::Text => &self.text_model,
        }
    }
}
