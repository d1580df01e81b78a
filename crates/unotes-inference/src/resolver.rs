//! Mode resolution as an ordered decision table.
//!
//! Rules are evaluated top to bottom and the first rule that yields a mode
//! wins. Explicit caller intent always comes first, and the slide-navigation
//! heuristic is checked before the question rule so that a navigation event
//! carrying an image and no question is never classified as chat.

use tracing::debug;
use unotes_core::{CanonicalRequest, Error, Mode, Result};

/// One row of the resolution table.
#[derive(Clone, Copy)]
pub struct ResolutionRule {
    /// Stable name, used in logs and tests.
    pub name: &'static str,
    /// Returns the mode this rule assigns, or `None` to fall through.
    pub apply: fn(&CanonicalRequest) -> Option<Mode>,
}

impl std::fmt::Debug for ResolutionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionRule")
            .field("name", &self.name)
            .finish()
    }
}

fn explicit_mode(req: &CanonicalRequest) -> Option<Mode> {
    req.mode
}

/// Legacy flag and "image without question" are one merged condition.
fn slide_navigation(req: &CanonicalRequest) -> Option<Mode> {
    let image_without_question = req.question.is_none() && req.image_url.is_some();
    (req.slide_analysis || image_without_question).then_some(Mode::Auto)
}

fn has_question(req: &CanonicalRequest) -> Option<Mode> {
    req.question.is_some().then_some(Mode::Chat)
}

/// Resolution precedence, highest first.
pub const RESOLUTION_RULES: &[ResolutionRule] = &[
    ResolutionRule {
        name: "explicit_mode",
        apply: explicit_mode,
    },
    ResolutionRule {
        name: "slide_navigation",
        apply: slide_navigation,
    },
    ResolutionRule {
        name: "has_question",
        apply: has_question,
    },
];

/// Resolve exactly one mode, or fail with [`Error::AmbiguousMode`].
pub fn resolve_mode(req: &CanonicalRequest) -> Result<Mode> {
    resolve_with(RESOLUTION_RULES, req)
}

/// Evaluate an arbitrary rule table. Exposed so the table itself can be tested.
pub fn resolve_with(rules: &[ResolutionRule], req: &CanonicalRequest) -> Result<Mode> {
    for rule in rules {
        if let Some(mode) = (rule.apply)(req) {
            debug!(rule = rule.name, mode = %mode, "Mode resolved");
            return Ok(mode);
        }
    }
    Err(Error::AmbiguousMode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req() -> CanonicalRequest {
        CanonicalRequest::default()
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = RESOLUTION_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["explicit_mode", "slide_navigation", "has_question"]);
    }

    #[test]
    fn test_explicit_mode_overrides_everything() {
        let r = CanonicalRequest {
            mode: Some(Mode::Chat),
            image_url: Some("https://x/slide.png".into()),
            slide_analysis: true,
            ..req()
        };
        assert_eq!(resolve_mode(&r).unwrap(), Mode::Chat);

        let r = CanonicalRequest {
            mode: Some(Mode::Auto),
            question: Some("What is a b-tree?".into()),
            ..req()
        };
        assert_eq!(resolve_mode(&r).unwrap(), Mode::Auto);
    }

    #[test]
    fn test_image_without_question_is_auto() {
        let r = CanonicalRequest {
            image_url: Some("https://x/slide.png".into()),
            slide_index: Some(3),
            ..req()
        };
        assert_eq!(resolve_mode(&r).unwrap(), Mode::Auto);
    }

    #[test]
    fn test_legacy_flag_is_auto_even_with_question() {
        let r = CanonicalRequest {
            slide_analysis: true,
            question: Some("hmm".into()),
            ..req()
        };
        assert_eq!(resolve_mode(&r).unwrap(), Mode::Auto);
    }

    #[test]
    fn test_question_is_chat_even_with_image() {
        let r = CanonicalRequest {
            question: Some("What is this?".into()),
            image_url: Some("https://x/slide.png".into()),
            ..req()
        };
        assert_eq!(resolve_mode(&r).unwrap(), Mode::Chat);
    }

    #[test]
    fn test_whitespace_question_still_resolves_chat() {
        let r = CanonicalRequest {
            question: Some("  ".into()),
            ..req()
        };
        assert_eq!(resolve_mode(&r).unwrap(), Mode::Chat);
    }

    #[test]
    fn test_nothing_to_infer_is_ambiguous() {
        assert!(matches!(resolve_mode(&req()), Err(Error::AmbiguousMode)));

        let r = CanonicalRequest {
            slide_text: Some("text only".into()),
            highlighted_text: Some("excerpt".into()),
            ..req()
        };
        assert!(matches!(resolve_mode(&r), Err(Error::AmbiguousMode)));
    }

    #[test]
    fn test_reordered_table_changes_outcome() {
        // Swapping the heuristic below the question rule is exactly the
        // misclassification the ordering prevents.
        let swapped = [RESOLUTION_RULES[2], RESOLUTION_RULES[1]];
        let r = CanonicalRequest {
            slide_analysis: true,
            question: Some("q".into()),
            ..req()
        };
        assert_eq!(resolve_with(&swapped, &r).unwrap(), Mode::Chat);
        assert_eq!(resolve_mode(&r).unwrap(), Mode::Auto);
    }

    #[test]
    fn test_empty_table_is_ambiguous() {
        let r = CanonicalRequest {
            question: Some("q".into()),
            ..req()
        };
        assert!(matches!(resolve_with(&[], &r), Err(Error::AmbiguousMode)));
    }
}
