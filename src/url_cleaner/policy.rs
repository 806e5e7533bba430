use log::warn;
use std::collections::HashSet;

use crate::common::constants::{
    DEFAULT_ALWAYS_KEEP, DEFAULT_EXCLUDE_PATTERNS, DEFAULT_GOOGLE_DOMAINS,
    DEFAULT_REMOVE_PARAMS, PROTECTED_PARAM,
};

/// Which parameters to strip, keep, or report, and which URLs to skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanPolicy {
    always_keep: HashSet<String>,
    remove_set: HashSet<String>,
    exclude_patterns: Vec<String>,
    exclude_regexes: Vec<String>,
    google_domains: Vec<String>,
}

impl Default for CleanPolicy {
    fn default() -> Self {
        Self::new(
            &to_strings(DEFAULT_ALWAYS_KEEP),
            &to_strings(DEFAULT_REMOVE_PARAMS),
            &to_strings(DEFAULT_EXCLUDE_PATTERNS),
            &[],
            &to_strings(DEFAULT_GOOGLE_DOMAINS),
        )
    }
}

impl CleanPolicy {
    pub fn new(
        always_keep: &[String],
        remove_params: &[String],
        exclude_patterns: &[String],
        exclude_regexes: &[String],
        google_domains: &[String],
    ) -> Self {
        let mut remove_set: HashSet<String> = remove_params.iter().cloned().collect();
        if remove_set.remove(PROTECTED_PARAM) {
            warn!(
                "'{}' selects the search mode and cannot be removed; dropping it from the removal list",
                PROTECTED_PARAM
            );
        }

        Self {
            always_keep: always_keep.iter().cloned().collect(),
            remove_set,
            exclude_patterns: exclude_patterns.to_vec(),
            exclude_regexes: exclude_regexes.to_vec(),
            google_domains: google_domains
                .iter()
                .map(|d| d.trim().trim_start_matches('.').to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    pub fn is_always_keep(&self, name: &str) -> bool {
        self.always_keep.contains(name)
    }

    /// `always_keep` wins when a name is listed in both sets.
    pub fn should_remove(&self, name: &str) -> bool {
        !self.is_always_keep(name) && self.remove_set.contains(name)
    }

    /// Kept in the URL and surfaced in the report.
    pub fn should_report(&self, name: &str) -> bool {
        !name.is_empty() && !self.is_always_keep(name) && !self.remove_set.contains(name)
    }

    pub fn is_google_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_lowercase();
        self.google_domains.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude_patterns
    }

    pub fn exclude_regexes(&self) -> &[String] {
        &self.exclude_regexes
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
