use serde::Serialize;

use super::label::strip_label;
use super::tags::normalize_tags;

/// Default total character budget for a note.
pub const DEFAULT_MAX_LENGTH: usize = 500;
/// Titles are cut to this many characters after label stripping.
pub const TITLE_MAX_CHARS: usize = 32;
/// The body always keeps at least this many characters of budget, even when
/// title and tags alone exceed `max_length`.
pub const BODY_FLOOR_CHARS: usize = 120;
/// Blank-line separator between note sections.
const SECTION_SEPARATOR: &str = "\n\n";

/// Final note payload returned to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembledNote {
    pub title: String,
    pub body: String,
    pub tags_line: String,
    pub content: String,
}

/// Combines title, body and tags into an [`AssembledNote`] under a length budget.
#[derive(Debug, Clone, Copy)]
pub struct NoteAssembler {
    max_length: usize,
}

impl Default for NoteAssembler {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl NoteAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Budget left for the body once the heading and tag line are reserved.
    pub fn body_budget(&self, title_line: &str, tags_line: &str) -> usize {
        let reserved = section_len(tags_line) + section_len(title_line);
        self.max_length
            .saturating_sub(reserved)
            .max(BODY_FLOOR_CHARS)
    }

    /// Builds the note. `tags_line` is raw user input and is normalized here.
    ///
    /// The body is the only field shortened to respect `max_length`; it is cut
    /// at a fixed character count with no ellipsis.
    pub fn assemble(&self, title: Option<&str>, body: &str, tags_line: &str) -> AssembledNote {
        let tags_line = normalize_tags(tags_line);
        let title = title
            .map(|t| truncate_chars(&strip_label(t), TITLE_MAX_CHARS).to_string())
            .unwrap_or_default();

        let budget = self.body_budget(&title, &tags_line);
        let body = truncate_chars(body.trim(), budget).to_string();

        let heading = if title.is_empty() {
            String::new()
        } else {
            format!("## {}", title)
        };
        let content = [heading.as_str(), body.as_str(), tags_line.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(SECTION_SEPARATOR)
            .trim()
            .to_string();

        AssembledNote {
            title,
            body,
            tags_line,
            content,
        }
    }
}

// Length of a section plus its separating blank line; zero when absent.
fn section_len(section: &str) -> usize {
    if section.is_empty() {
        0
    } else {
        section.chars().count() + SECTION_SEPARATOR.len()
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
