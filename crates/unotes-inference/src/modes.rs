//! Mode handlers: turn a bound [`ModeRequest`] into a [`ModelInvocation`].
//!
//! Handlers are pure. They assemble the system prompt from the mode template
//! and context fragments, shape the user turn, pick the model variant and fix
//! the generation parameters. Executing the invocation is the backend's job.

use unotes_core::defaults::{AUTO_MAX_TOKENS, AUTO_TEMPERATURE, CHAT_MAX_TOKENS, CHAT_TEMPERATURE};
use unotes_core::{
    AutoRequest, ChatRequest, GenerationParams, ImageRef, Message, ModeRequest, ModelInvocation,
    ModelVariant,
};

use crate::config::ModelCatalog;
use crate::context;
use crate::prompts::{AUTO_MODE_PROMPT, AUTO_MODE_TASK, CHAT_MODE_PROMPT};

/// Verbose and consistent walkthroughs.
pub const AUTO_PARAMS: GenerationParams = GenerationParams {
    max_tokens: AUTO_MAX_TOKENS,
    temperature: AUTO_TEMPERATURE,
};

/// Targeted, more exploratory answers.
pub const CHAT_PARAMS: GenerationParams = GenerationParams {
    max_tokens: CHAT_MAX_TOKENS,
    temperature: CHAT_TEMPERATURE,
};

/// Build the invocation for whichever mode the request is bound to.
pub fn build_invocation(request: &ModeRequest, catalog: &ModelCatalog) -> ModelInvocation {
    match request {
        ModeRequest::Auto(req) => auto_invocation(req, catalog),
        ModeRequest::Chat(req) => chat_invocation(req, catalog),
    }
}

/// Unprompted slide explanation. Always uses the vision variant.
pub fn auto_invocation(req: &AutoRequest, catalog: &ModelCatalog) -> ModelInvocation {
    let mut system = String::from(AUTO_MODE_PROMPT);
    system.push_str(&context::notes_context(&req.notes));
    system.push_str(&context::slide_context(
        req.slide_text.as_deref(),
        req.slide_index,
    ));

    let variant = ModelVariant::Vision;
    ModelInvocation {
        system,
        messages: vec![Message::user_with_image(
            AUTO_MODE_TASK,
            ImageRef::high(req.image_url.as_str()),
        )],
        variant,
        model: catalog.model_for(variant).to_string(),
        params: AUTO_PARAMS,
    }
}

/// User question answering. Vision variant only when an image is attached.
pub fn chat_invocation(req: &ChatRequest, catalog: &ModelCatalog) -> ModelInvocation {
    let mut system = String::from(CHAT_MODE_PROMPT);
    system.push_str(&context::notes_context(&req.notes));
    system.push_str(&context::chat_slide_context(
        req.slide_text.as_deref(),
        req.slide_index,
    ));
    if let Some(excerpt) = req.highlighted_text.as_deref() {
        system.push_str(&context::highlighted_excerpt(excerpt));
    }
    if let Some(name) = req.slide_name.as_deref() {
        system.push_str(&context::slide_name_line(name));
    }

    let (message, variant) = match req.image_url.as_deref() {
        Some(url) => (
            Message::user_with_image(req.question.as_str(), ImageRef::high(url)),
            ModelVariant::Vision,
        ),
        None => (Message::user_text(req.question.as_str()), ModelVariant::Text),
    };

    ModelInvocation {
        system,
        messages: vec![message],
        variant,
        model: catalog.model_for(variant).to_string(),
        params: CHAT_PARAMS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unotes_core::{ImageDetail, MessageContent, NoteRef, Role};

    fn catalog() -> ModelCatalog {
        ModelCatalog::new("vision-model", "text-model")
    }

    fn auto_req() -> AutoRequest {
        AutoRequest {
            image_url: "https://x/slide.png".into(),
            slide_text: None,
            slide_index: Some(3),
            notes: vec![],
        }
    }

    fn chat_req(question: &str) -> ChatRequest {
        ChatRequest {
            question: question.into(),
            image_url: None,
            slide_text: None,
            slide_index: None,
            notes: vec![],
            highlighted_text: None,
            slide_name: None,
        }
    }

    #[test]
    fn test_auto_uses_vision_and_high_detail_image() {
        let inv = auto_invocation(&auto_req(), &catalog());

        assert_eq!(inv.variant, ModelVariant::Vision);
        assert_eq!(inv.model, "vision-model");
        assert_eq!(inv.params, AUTO_PARAMS);
        assert_eq!(inv.messages.len(), 1);

        let msg = &inv.messages[0];
        assert_eq!(msg.role, Role::User);
        match &msg.content {
            MessageContent::Composite { text, image } => {
                assert_eq!(text, AUTO_MODE_TASK);
                assert_eq!(image.url, "https://x/slide.png");
                assert_eq!(image.detail, ImageDetail::High);
            }
            other => panic!("Expected composite content, got {:?}", other),
        }
    }

    #[test]
    fn test_auto_system_prompt_always_has_slide_block() {
        let inv = auto_invocation(&auto_req(), &catalog());
        assert!(inv.system.starts_with(AUTO_MODE_PROMPT));
        assert!(inv.system.ends_with("Slide Number: 3\n"));
        assert!(!inv.system.contains("REFERENCE MATERIALS"));
    }

    #[test]
    fn test_auto_system_prompt_notes_before_slide() {
        let req = AutoRequest {
            notes: vec![NoteRef::new("Lecture 1")],
            slide_text: Some("Heaps".into()),
            ..auto_req()
        };
        let inv = auto_invocation(&req, &catalog());
        let notes_at = inv.system.find("REFERENCE MATERIALS").unwrap();
        let slide_at = inv.system.find("SLIDE INFORMATION").unwrap();
        assert!(notes_at < slide_at);
        assert!(inv.system.contains("Slide Content:\nHeaps\n"));
    }

    #[test]
    fn test_chat_without_image_uses_text_variant() {
        let inv = chat_invocation(&chat_req("What is a b-tree?"), &catalog());

        assert_eq!(inv.variant, ModelVariant::Text);
        assert_eq!(inv.model, "text-model");
        assert_eq!(inv.params, CHAT_PARAMS);
        assert_eq!(
            inv.messages,
            vec![Message::user_text("What is a b-tree?")]
        );
        assert_eq!(inv.system, CHAT_MODE_PROMPT);
    }

    #[test]
    fn test_chat_with_image_uses_vision_composite() {
        let req = ChatRequest {
            image_url: Some("https://x/slide.png".into()),
            ..chat_req("What does this diagram show?")
        };
        let inv = chat_invocation(&req, &catalog());

        assert_eq!(inv.variant, ModelVariant::Vision);
        assert_eq!(inv.model, "vision-model");
        assert_eq!(
            inv.messages[0].content,
            MessageContent::Composite {
                text: "What does this diagram show?".into(),
                image: ImageRef::high("https://x/slide.png"),
            }
        );
    }

    #[test]
    fn test_chat_context_block_order() {
        let req = ChatRequest {
            notes: vec![NoteRef::new("Physics").with_content("Second law")],
            slide_text: Some("Thermodynamics".into()),
            highlighted_text: Some("Entropy always increases.".into()),
            slide_name: Some("Lecture 4".into()),
            ..chat_req("explain")
        };
        let inv = chat_invocation(&req, &catalog());
        let s = &inv.system;

        let notes_at = s.find("REFERENCE MATERIALS").unwrap();
        let slide_at = s.find("CURRENT CONTEXT").unwrap();
        let excerpt_at = s.find("HIGHLIGHTED EXCERPT").unwrap();
        let name_at = s.find("Slide Title: Lecture 4").unwrap();
        assert!(notes_at < slide_at);
        assert!(slide_at < excerpt_at);
        assert!(excerpt_at < name_at);
    }

    #[test]
    fn test_chat_highlight_block_focuses_answer() {
        let req = ChatRequest {
            highlighted_text: Some("Entropy always increases.".into()),
            ..chat_req("explain")
        };
        let inv = chat_invocation(&req, &catalog());
        assert!(inv.system.contains("Entropy always increases."));
        assert!(inv
            .system
            .contains("Please focus your explanation on this excerpt"));
        assert!(!inv.system.contains("CURRENT CONTEXT"));
    }

    #[test]
    fn test_chat_is_more_exploratory_than_auto() {
        assert!(CHAT_PARAMS.temperature > AUTO_PARAMS.temperature);
        assert!(CHAT_PARAMS.max_tokens < AUTO_PARAMS.max_tokens);
    }

    #[test]
    fn test_build_invocation_dispatches_by_variant() {
        let auto = build_invocation(&ModeRequest::Auto(auto_req()), &catalog());
        assert!(auto.system.starts_with(AUTO_MODE_PROMPT));

        let chat = build_invocation(&ModeRequest::Chat(chat_req("hi")), &catalog());
        assert!(chat.system.starts_with(CHAT_MODE_PROMPT));
    }

    #[test]
    fn test_invocation_is_deterministic() {
        let req = ChatRequest {
            notes: vec![NoteRef::new("A").with_tag("x")],
            slide_index: Some(2),
            ..chat_req("why")
        };
        assert_eq!(
            chat_invocation(&req, &catalog()),
            chat_invocation(&req, &catalog())
        );
    }
}
