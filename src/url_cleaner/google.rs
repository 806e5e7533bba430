use log::debug;
use std::collections::BTreeSet;
use url::form_urlencoded;
use url::Url;

use super::policy::CleanPolicy;
use crate::common::{CleanError, CleanerResult};

/// A cleaned URL plus the parameter names that survived and need reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedUrl {
    pub url: String,
    /// Sorted, without duplicates and without `always_keep` names.
    pub kept: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct GoogleUrlCleaner {
    policy: CleanPolicy,
}

impl GoogleUrlCleaner {
    pub fn new(policy: CleanPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CleanPolicy {
        &self.policy
    }

    /// Strips tracking parameters and puts the rest in name order.
    ///
    /// A URL that has nothing to remove and is already in canonical order is
    /// returned byte for byte, so cleaning twice gives the same string.
    pub fn clean(&self, raw: &str) -> CleanerResult<CleanedUrl> {
        let parsed = Url::parse(raw).map_err(|source| CleanError::MalformedUrl {
            url: raw.to_string(),
            source,
        })?;
        Ok(self.clean_parsed(raw, parsed))
    }

    /// Like [`clean`](Self::clean) for a URL already parsed from `raw`.
    ///
    /// Surviving `name=value` segments are kept exactly as written. Only the
    /// names are decoded, for the policy checks and the sort key, so values
    /// in legacy encodings such as Shift_JIS come through untouched.
    pub fn clean_parsed(&self, raw: &str, mut parsed: Url) -> CleanedUrl {
        let Some(query) = parsed.query().map(str::to_string) else {
            return CleanedUrl {
                url: raw.to_string(),
                kept: Vec::new(),
            };
        };

        let mut segments: Vec<QuerySegment> = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(QuerySegment::new)
            .collect();

        let removed: BTreeSet<String> = segments
            .iter()
            .filter(|segment| self.policy.should_remove(&segment.name))
            .map(|segment| segment.name.clone())
            .collect();
        segments.retain(|segment| !removed.contains(&segment.name));

        let kept: Vec<String> = segments
            .iter()
            .filter(|segment| self.policy.should_report(&segment.name))
            .map(|segment| segment.name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let in_order = segments.windows(2).all(|w| w[0].name <= w[1].name);
        if removed.is_empty() && in_order {
            return CleanedUrl {
                url: raw.to_string(),
                kept,
            };
        }

        if !removed.is_empty() {
            debug!("Removing {:?} from {}", removed, raw);
        }

        // Stable: repeated names keep their relative order.
        segments.sort_by(|a, b| a.name.cmp(&b.name));

        if segments.is_empty() {
            parsed.set_query(None);
        } else {
            let rebuilt = segments
                .iter()
                .map(|segment| segment.raw)
                .collect::<Vec<_>>()
                .join("&");
            parsed.set_query(Some(&rebuilt));
        }

        CleanedUrl {
            url: parsed.to_string(),
            kept,
        }
    }
}

/// One `name=value` piece of a query, with its name decoded.
struct QuerySegment<'a> {
    name: String,
    raw: &'a str,
}

impl<'a> QuerySegment<'a> {
    fn new(raw: &'a str) -> Self {
        let encoded_name = raw.split_once('=').map_or(raw, |(name, _)| name);
        let name = form_urlencoded::parse(encoded_name.as_bytes())
            .next()
            .map(|(name, _)| name.into_owned())
            .unwrap_or_default();
        Self { name, raw }
    }
}
