use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

// Scheme is mandatory; host must be dotted labels ending in an alphabetic TLD.
const URL_PATTERN: &str = r#"(?i)\b(?:https?|ftps?)://(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}(?::\d{1,5})?(?:[/?#][^\s<>"`]*)?"#;

static URL_REGEX: OnceLock<Regex> = OnceLock::new();

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| Regex::new(URL_PATTERN).expect("URL pattern is valid"))
}

/// Byte ranges of every URL in `line`, left to right and non-overlapping.
pub fn url_spans(line: &str) -> Vec<Range<usize>> {
    url_regex()
        .find_iter(line)
        .filter_map(|m| {
            let trimmed = trim_trailing_punctuation(m.as_str());
            if trimmed.contains("://") {
                Some(m.start()..m.start() + trimmed.len())
            } else {
                None
            }
        })
        .collect()
}

/// Every URL in `line`, in order of appearance.
pub fn extract_urls(line: &str) -> Vec<&str> {
    url_spans(line)
        .into_iter()
        .map(|span| &line[span])
        .collect()
}

/// Drops sentence punctuation and unbalanced closing brackets, as in
/// "see https://example.com." or "[link](https://example.com)".
fn trim_trailing_punctuation(candidate: &str) -> &str {
    let mut url = candidate;
    while let Some(last) = url.chars().last() {
        let strip = match last {
            '.' | ',' | ';' | ':' | '!' | '?' | '\'' | '*' => true,
            ')' => url.matches('(').count() < url.matches(')').count(),
            ']' => url.matches('[').count() < url.matches(']').count(),
            '}' => url.matches('{').count() < url.matches('}').count(),
            _ => false,
        };
        if !strip {
            break;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
    url
}
