use serde::Serialize;
use serde_json::Value;

use super::label::strip_label;

/// Title/body pair recovered from raw generator output. Either side may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedNoteCandidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ParsedNoteCandidate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }
}

/// Interprets raw generator output as a note candidate.
///
/// A JSON object with a non-empty `title` or `body` wins outright; anything
/// else goes through [`parse_heuristic`]. Never fails.
pub fn parse_note(raw: &str) -> ParsedNoteCandidate {
    if raw.is_empty() {
        return ParsedNoteCandidate::default();
    }
    try_structured(raw).unwrap_or_else(|| parse_heuristic(raw))
}

/// Strict JSON pass. Returns `None` on malformed JSON, non-object values,
/// or objects without a usable `title`/`body`.
pub fn try_structured(raw: &str) -> Option<ParsedNoteCandidate> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let object = value.as_object()?;

    let candidate = ParsedNoteCandidate {
        title: object.get("title").and_then(text_field),
        body: object.get("body").and_then(text_field),
    };

    if candidate.is_empty() {
        None
    } else {
        Some(candidate)
    }
}

/// Line-based pass: first non-blank line is the title, the rest is the body.
pub fn parse_heuristic(raw: &str) -> ParsedNoteCandidate {
    let lines: Vec<&str> = raw
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some((first, rest)) = lines.split_first() else {
        return ParsedNoteCandidate::default();
    };

    let body = rest.join("\n").trim().to_string();
    ParsedNoteCandidate {
        title: Some(strip_label(first)),
        body: Some(if body.is_empty() { raw.to_string() } else { body }),
    }
}

// Generators occasionally emit numbers where strings were asked for.
fn text_field(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, body: &str) -> ParsedNoteCandidate {
        ParsedNoteCandidate {
            title: Some(title.to_string()),
            body: Some(body.to_string()),
        }
    }

    #[test]
    fn test_json_path() {
        assert_eq!(parse_note(r#"{"title":"A","body":"B"}"#), candidate("A", "B"));
        assert_eq!(
            parse_note("  {\"title\":\"好店 打卡\",\"body\":\"环境很棒☕\"}\n"),
            candidate("好店 打卡", "环境很棒☕")
        );
    }

    #[test]
    fn test_json_with_only_one_field() {
        let parsed = parse_note(r#"{"body":"only body"}"#);
        assert_eq!(parsed.title, None);
        assert_eq!(parsed.body.as_deref(), Some("only body"));

        let parsed = parse_note(r#"{"title":"T","body":""}"#);
        assert_eq!(parsed.title.as_deref(), Some("T"));
        assert_eq!(parsed.body, None);
    }

    #[test]
    fn test_json_path_keeps_title_labels() {
        // Labels are stripped later by the assembler.
        let parsed = parse_note(r#"{"title":"标题：店","body":"B"}"#);
        assert_eq!(parsed.title.as_deref(), Some("标题：店"));
    }

    #[test]
    fn test_unusable_json_falls_through() {
        assert_eq!(
            parse_note(r#"{"title":"","body":""}"#),
            candidate(r#"{"title":"","body":""}"#, r#"{"title":"","body":""}"#)
        );
        assert_eq!(parse_note("[1,2]"), candidate("[1,2]", "[1,2]"));
        assert_eq!(parse_note("null"), candidate("null", "null"));
    }

    #[test]
    fn test_heuristic_path() {
        assert_eq!(parse_note("Hello\nWorld\nTail"), candidate("Hello", "World\nTail"));
        assert_eq!(
            parse_note("标题：周末咖啡\n\n\n  第一段  \n第二段\n"),
            candidate("周末咖啡", "第一段\n第二段")
        );
    }

    #[test]
    fn test_malformed_json_uses_heuristic() {
        let raw = "{\"title\": \"broken\",\n\"body\": \"still broken\"";
        let parsed = parse_note(raw);
        assert_eq!(parsed.title.as_deref(), Some("{\"title\": \"broken\","));
        assert_eq!(parsed.body.as_deref(), Some("\"body\": \"still broken\""));
    }

    #[test]
    fn test_single_line_body_falls_back_to_raw() {
        assert_eq!(parse_note("  just one line "), candidate("just one line", "  just one line "));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(parse_note("").is_empty());
        assert!(parse_note("\n \n\t\n").is_empty());
    }
}
