use super::common::PromptSpec;

pub const NOTE_SYSTEM_PROMPT: &str = "You are a Xiaohongshu copywriter. Always reply in concise Chinese with emojis and keep the original tags at the end.";
pub const NOTE_MAX_TOKENS: u32 = 520;

/// Generate a prompt for one Xiaohongshu-style store-visit note.
///
/// `tags_line` should already be normalized; the generator is asked to append
/// it verbatim.
pub fn note_prompt(scene: &str, tags_line: &str) -> String {
    format!(
        r#"你是小红书的种草博主，请生成1篇小红书风格的探店/体验笔记。
- 场景：{scene}，文案必须围绕该场景展开，语气轻松种草+好店推荐，口语化但不夸张营销。
- 结构：先给一个吸睛标题（≤20字），换行后正文。整体不超过500字。
- 正文包含体验细节、环境/服务/功效等描写，加入2-5个自然融入的emoji。
- 不要编号、不要“以下”“口播”“广告”语气。
- 末尾单独一行追加原样标签串：{tags}
- 输出严格为 JSON 对象，字段：{{"title":"...","body":"..."}}，不要输出其它多余字符或 Markdown 符号。"#,
        scene = scene,
        tags = tags_line
    )
}

pub fn note_prompt_spec(scene: &str, tags_line: &str) -> PromptSpec {
    PromptSpec::new(NOTE_SYSTEM_PROMPT, note_prompt(scene, tags_line), NOTE_MAX_TOKENS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_prompt_interpolates() {
        let prompt = note_prompt("coffee shop", "#咖啡 #探店");
        assert!(prompt.contains("场景：coffee shop，"));
        assert!(prompt.contains("原样标签串：#咖啡 #探店\n"));
        assert!(prompt.contains(r#"{"title":"...","body":"..."}"#));
    }

    #[test]
    fn test_note_prompt_spec() {
        let spec = note_prompt_spec("通用", "");
        assert_eq!(spec.system, NOTE_SYSTEM_PROMPT);
        assert_eq!(spec.max_tokens, 520);
        assert_eq!(spec.temperature, 0.9);
    }
}
