//! Normalization of raw generator output into notes and review sets.
//!
//! Everything here is pure and synchronous: no I/O, no shared state, and no
//! failure path other than [`split_reviews`] returning `None`.

pub mod assembler;
pub mod label;
pub mod parser;
pub mod reviews;
pub mod tags;

pub use assembler::{AssembledNote, NoteAssembler, DEFAULT_MAX_LENGTH};
pub use label::strip_label;
pub use parser::{parse_heuristic, parse_note, try_structured, ParsedNoteCandidate};
pub use reviews::{split_reviews, ReviewSet, REVIEW_DELIMITER};
pub use tags::normalize_tags;

/// Parses raw generator output and assembles the final note.
///
/// The parsed body falls back to the whole raw output when the parser could
/// not find one.
pub fn note_from_output(raw: &str, tags_line: &str, assembler: &NoteAssembler) -> AssembledNote {
    let parsed = parse_note(raw);
    let body = parsed.body.as_deref().unwrap_or(raw);
    assembler.assemble(parsed.title.as_deref(), body, tags_line)
}
