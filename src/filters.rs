use log::{debug, warn};
use regex::Regex;

/// Decides which URLs are exempt from cleaning altogether.
///
/// Plain patterns match as case-insensitive substrings. Regex patterns are
/// compiled once; invalid ones are skipped with a warning.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    patterns: Vec<String>,
    regexes: Vec<Regex>,
}

impl ExclusionFilter {
    pub fn new(patterns: &[String], regexes: &[String]) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| p.to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();

        let regexes = regexes
            .iter()
            .filter_map(|rgx| match Regex::new(rgx) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("Ignoring invalid exclusion regex '{}': {}", rgx, e);
                    None
                }
            })
            .collect();

        Self { patterns, regexes }
    }

    pub fn is_excluded(&self, url: &str) -> bool {
        let lower = url.to_lowercase();
        for pattern in &self.patterns {
            if lower.contains(pattern.as_str()) {
                debug!("URL excluded due to pattern '{}': {}", pattern, url);
                return true;
            }
        }

        for pattern in &self.regexes {
            if pattern.is_match(url) {
                debug!("URL excluded due to regex '{}': {}", pattern, url);
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maps_filter() -> ExclusionFilter {
        ExclusionFilter::new(&["google.com/maps/".to_string()], &[])
    }

    #[test]
    fn test_is_excluded_maps() {
        let filter = maps_filter();
        assert!(filter.is_excluded("https://www.google.com/maps/place/Paris/@48.8,2.3,12z"));
        assert!(!filter.is_excluded("https://www.google.com/search?q=maps"));
    }

    #[test]
    fn test_is_excluded_case_insensitive() {
        let filter = maps_filter();
        assert!(filter.is_excluded("https://WWW.GOOGLE.COM/Maps/place/Paris"));

        let upper = ExclusionFilter::new(&["GOOGLE.COM/MAPS/".to_string()], &[]);
        assert!(upper.is_excluded("https://www.google.com/maps/dir/"));
    }

    #[test]
    fn test_is_excluded_regex() {
        let filter = ExclusionFilter::new(&[], &[r"google\.com/travel/".to_string()]);
        assert!(filter.is_excluded("https://www.google.com/travel/flights?tfs=abc"));
        assert!(!filter.is_excluded("https://www.google.com/search?q=travel"));
    }

    #[test]
    fn test_is_excluded_invalid_regex() {
        // Should pass through since regex is invalid
        let filter = ExclusionFilter::new(&[], &["[".to_string()]);
        assert!(!filter.is_excluded("https://www.google.com/search?q=test"));
    }

    #[test]
    fn test_is_excluded_empty_inputs() {
        let filter = ExclusionFilter::new(&["".to_string()], &[]);
        assert!(!filter.is_excluded("https://www.google.com/search?q=test"));
        assert!(!maps_filter().is_excluded(""));
    }
}
