/// Sampling settings shared by every generator call.
pub const TEMPERATURE: f32 = 0.9;
pub const PRESENCE_PENALTY: f32 = 0.2;

/// System message, token budget and user prompt for one generator call.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec {
    pub system: &'static str,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub presence_penalty: f32,
}

impl PromptSpec {
    pub fn new(system: &'static str, user: String, max_tokens: u32) -> Self {
        Self {
            system,
            user,
            max_tokens,
            temperature: TEMPERATURE,
            presence_penalty: PRESENCE_PENALTY,
        }
    }
}
