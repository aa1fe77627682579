use serde::Serialize;

/// Delimiter the review prompt asks the generator to put between reviews.
pub const REVIEW_DELIMITER: &str = "|||";
/// Upper bound on reviews returned per request.
pub const MAX_REVIEWS: usize = 3;

/// Up to three independent review candidates, serialized as `{"reviews": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSet {
    reviews: Vec<String>,
}

impl ReviewSet {
    pub fn reviews(&self) -> &[String] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn into_reviews(self) -> Vec<String> {
        self.reviews
    }
}

/// Splits raw generator output into review candidates.
///
/// Splits on [`REVIEW_DELIMITER`] first and falls back to line breaks when the
/// generator ignored the delimiter. Returns `None` when nothing usable remains.
pub fn split_reviews(raw: &str) -> Option<ReviewSet> {
    let mut reviews = non_empty_segments(raw.split(REVIEW_DELIMITER));
    if reviews.len() <= 1 {
        reviews = non_empty_segments(raw.split('\n'));
    }
    reviews.truncate(MAX_REVIEWS);

    if reviews.is_empty() {
        None
    } else {
        Some(ReviewSet { reviews })
    }
}

fn non_empty_segments<'a>(segments: impl Iterator<Item = &'a str>) -> Vec<String> {
    segments
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviews(raw: &str) -> Vec<String> {
        split_reviews(raw).map(ReviewSet::into_reviews).unwrap_or_default()
    }

    #[test]
    fn test_delimiter_split_truncates_to_three() {
        assert_eq!(reviews("A|||B|||C|||D"), vec!["A", "B", "C"]);
        assert_eq!(reviews(" A ||| |||B\n"), vec!["A", "B"]);
    }

    #[test]
    fn test_newline_fallback() {
        assert_eq!(reviews("A\nB"), vec!["A", "B"]);
        assert_eq!(reviews("第一条\n\n\n第二条\r\n第三条\n第四条"), vec!["第一条", "第二条", "第三条"]);
    }

    #[test]
    fn test_single_segment_survives() {
        assert_eq!(reviews("only one review"), vec!["only one review"]);
        // One delimited segment means the newline split decides.
        assert_eq!(reviews("|||only one|||"), vec!["|||only one|||"]);
    }

    #[test]
    fn test_delimiter_wins_over_newlines() {
        assert_eq!(reviews("A\nstill A|||B"), vec!["A\nstill A", "B"]);
    }

    #[test]
    fn test_empty_result() {
        assert!(split_reviews("").is_none());
        assert!(split_reviews(" \n\t\n ").is_none());
    }

    #[test]
    fn test_serializes_as_object() {
        let set = split_reviews("A|||B").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"{"reviews":["A","B"]}"#
        );
    }
}
