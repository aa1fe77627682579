use once_cell::sync::Lazy;
use regex::Regex;

/// Labels a generator tends to put in front of a title line.
pub const TITLE_LABELS: &[&str] = &["标题", "title"];

static LABEL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    let labels = TITLE_LABELS
        .iter()
        .map(|label| regex::escape(label))
        .collect::<Vec<_>>()
        .join("|");
    // Label, separator and surrounding whitespace are each optional.
    Regex::new(&format!(r"(?i)^(?:{})?\s*[:：#\-]?\s*", labels))
        .expect("title label pattern is valid")
});

/// Removes a leading "title:"-style label from a candidate title line.
pub fn strip_label(text: &str) -> String {
    LABEL_PREFIX.replace(text, "").trim().to_string()
}
