use super::common::PromptSpec;
use crate::note::REVIEW_DELIMITER;

pub const REVIEW_SYSTEM_PROMPT: &str =
    "You are a Chinese copywriter for lifestyle content. Keep outputs concise and natural.";
pub const REVIEW_MAX_TOKENS: u32 = 420;

/// Length buckets a caller can pick for reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl ReviewLength {
    /// Maps a selector such as `"50-80"` to a bucket; unknown selectors get the default.
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "50-80" => ReviewLength::Short,
            "80-100" => ReviewLength::Medium,
            "100+" => ReviewLength::Long,
            _ => ReviewLength::default(),
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            ReviewLength::Short => "字数要求50-80字",
            ReviewLength::Medium => "字数要求80-100字",
            ReviewLength::Long => "字数在100字以上，建议控制120字以内",
        }
    }
}

/// Generate a prompt asking for three Meituan-style reviews separated by `|||`.
pub fn review_prompt(category: &str, tone: &str, length: ReviewLength) -> String {
    format!(
        "请用中文生成美团评价文案，按照用户选择的3条不同的文案输出，品类={category}，语气={tone}，格式不要编号，用{delimiter}分隔每条文案，{hint}，避免营销腔。",
        category = category,
        tone = tone,
        delimiter = REVIEW_DELIMITER,
        hint = length.hint()
    )
}

pub fn review_prompt_spec(category: &str, tone: &str, length: ReviewLength) -> PromptSpec {
    PromptSpec::new(
        REVIEW_SYSTEM_PROMPT,
        review_prompt(category, tone, length),
        REVIEW_MAX_TOKENS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_selector_lookup() {
        assert_eq!(ReviewLength::from_selector("50-80"), ReviewLength::Short);
        assert_eq!(ReviewLength::from_selector("100+"), ReviewLength::Long);
        assert_eq!(ReviewLength::from_selector("huge"), ReviewLength::Medium);
        assert_eq!(ReviewLength::from_selector(""), ReviewLength::Medium);
    }

    #[test]
    fn test_review_prompt() {
        let prompt = review_prompt("头疗", "真实", ReviewLength::Long);
        assert_eq!(
            prompt,
            "请用中文生成美团评价文案，按照用户选择的3条不同的文案输出，品类=头疗，语气=真实，格式不要编号，用|||分隔每条文案，字数在100字以上，建议控制120字以内，避免营销腔。"
        );
    }

    #[test]
    fn test_review_prompt_spec() {
        let spec = review_prompt_spec("火锅", "热情", ReviewLength::from_selector("unknown"));
        assert!(spec.user.contains("字数要求80-100字"));
        assert_eq!(spec.max_tokens, 420);
        assert_eq!(spec.system, REVIEW_SYSTEM_PROMPT);
    }
}
