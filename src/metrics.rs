//! Derived metrics: reading time and slug fallback

/// Average reading speed used for the reading-time estimate
pub const WORDS_PER_MINUTE: u32 = 200;

/// Estimate reading time in minutes from a summary text.
///
/// Words are runs of non-whitespace. The word count is floored at one so a
/// zero-length summary still reads as one minute, matching the storefront's
/// existing behavior.
pub fn reading_time(summary: &str) -> u32 {
    let words = summary.split_whitespace().count().max(1) as u32;
    words.div_ceil(WORDS_PER_MINUTE)
}

/// Generate a URL-safe slug from a title.
///
/// Keeps letters in any script (Hangul included), digits, and hyphens;
/// whitespace runs become single hyphens, repeated hyphens collapse, and
/// leading/trailing hyphens are trimmed.
pub fn slug_from_title(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();

    let hyphenated = kept.split_whitespace().collect::<Vec<_>>().join("-");

    let mut slug = String::with_capacity(hyphenated.len());
    for c in hyphenated.chars() {
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_time_floor() {
        assert_eq!(reading_time(""), 1);
        assert_eq!(reading_time("   "), 1);
        assert_eq!(reading_time("one two three"), 1);
    }

    #[test]
    fn test_reading_time_scales_with_word_count() {
        let exactly_one_minute = "word ".repeat(200);
        let just_over = "word ".repeat(201);
        assert_eq!(reading_time(&exactly_one_minute), 1);
        assert_eq!(reading_time(&just_over), 2);
        assert_eq!(reading_time(&"word ".repeat(1000)), 5);
    }

    #[test]
    fn test_reading_time_monotone() {
        let mut previous = 0;
        for words in [1, 50, 200, 201, 400, 999] {
            let minutes = reading_time(&"w ".repeat(words));
            assert!(minutes >= previous);
            previous = minutes;
        }
    }

    #[test]
    fn test_slug_basic() {
        assert_eq!(slug_from_title("Linen Curtain Care"), "linen-curtain-care");
        assert_eq!(slug_from_title("  Spaced   Out  "), "spaced-out");
    }

    #[test]
    fn test_slug_korean_title() {
        assert_eq!(
            slug_from_title("커튼과 블라인드 Guide!!"),
            "커튼과-블라인드-guide"
        );
    }

    #[test]
    fn test_slug_strips_punctuation_and_collapses_hyphens() {
        assert_eq!(slug_from_title("Hello -- World!"), "hello-world");
        assert_eq!(slug_from_title("--edge--case--"), "edge-case");
        assert_eq!(slug_from_title("a - b"), "a-b");
    }

    #[test]
    fn test_slug_of_pure_punctuation_is_empty() {
        assert_eq!(slug_from_title("!!!"), "");
    }
}
