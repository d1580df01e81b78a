//! Context fragment builders.
//!
//! Pure functions that render notes, slide metadata and highlighted excerpts
//! into blocks appended to a system prompt. Every builder returns
//! byte-identical output for identical input, and every block frames its
//! material as background rather than as a limit on what the model may say.

use unotes_core::defaults::SLIDE_INDEX_PLACEHOLDER;
use unotes_core::NoteRef;

/// Render the student's notes as a reference block.
///
/// Returns an empty string when there are no notes, so callers can append
/// unconditionally.
pub fn notes_context(notes: &[NoteRef]) -> String {
    if notes.is_empty() {
        return String::new();
    }

    let mut context = String::from("\n\n📚 **REFERENCE MATERIALS (Student's Notes):**\n");
    context.push_str(
        "The student has taken these notes. Use them as context but feel free to expand beyond them.\n\n",
    );

    for (i, note) in notes.iter().enumerate() {
        context.push_str(&format!("Note {}: {}\n", i + 1, note.title));
        if !note.content.is_empty() {
            context.push_str(&format!("{}\n", note.content.join(" ")));
        }
        if !note.tags.is_empty() {
            context.push_str(&format!("Topics: {}\n", note.tags.join(", ")));
        }
        context.push('\n');
    }

    context
}

/// Render slide number and extracted text. Always emits the block header.
pub fn slide_context(slide_text: Option<&str>, slide_index: Option<u32>) -> String {
    let number = slide_index
        .map(|i| i.to_string())
        .unwrap_or_else(|| SLIDE_INDEX_PLACEHOLDER.to_string());

    let mut context = String::from("\n\n📊 **SLIDE INFORMATION:**\n");
    context.push_str(&format!("Slide Number: {}\n", number));

    if let Some(text) = slide_text {
        context.push_str(&format!("Slide Content:\n{}\n", text));
    }

    context
}

/// Render the slide the student is looking at while chatting.
///
/// Empty when neither text nor index is known.
pub fn chat_slide_context(slide_text: Option<&str>, slide_index: Option<u32>) -> String {
    if slide_text.is_none() && slide_index.is_none() {
        return String::new();
    }

    let viewing = match slide_index {
        Some(i) => format!("Slide {}", i),
        None => "a lecture slide".to_string(),
    };

    let mut context = String::from("\n\n📊 **CURRENT CONTEXT:**\n");
    context.push_str(&format!("The student is currently viewing {}.\n", viewing));
    if let Some(text) = slide_text {
        context.push_str(&format!("Slide content: {}\n", text));
    }
    context.push_str(
        "This is just for context - feel free to answer beyond this material if needed.\n",
    );

    context
}

/// Render the excerpt the student highlighted; this is what the answer must address.
pub fn highlighted_excerpt(excerpt: &str) -> String {
    let mut context = String::from("\n\n🔎 **HIGHLIGHTED EXCERPT (focus):**\n");
    context.push_str(&format!("{}\n", excerpt));
    context.push_str(
        "Please focus your explanation on this excerpt and clarify any terms, implications, or steps needed to fully understand it.\n",
    );
    context
}

pub fn slide_name_line(name: &str) -> String {
    format!("\n\nSlide Title: {}\n", name)
}
