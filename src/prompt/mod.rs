// Declare submodules
mod common;
mod note;
mod review;

pub use common::{PromptSpec, PRESENCE_PENALTY, TEMPERATURE};
pub use note::{note_prompt, note_prompt_spec, NOTE_MAX_TOKENS, NOTE_SYSTEM_PROMPT};
pub use review::{
    review_prompt, review_prompt_spec, ReviewLength, REVIEW_MAX_TOKENS, REVIEW_SYSTEM_PROMPT,
};
