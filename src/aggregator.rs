use log::debug;
use std::collections::{BTreeMap, HashSet};
use url::form_urlencoded;

use crate::common::constants::{DEFAULT_ALWAYS_KEEP, DEFAULT_SEARCH_ENDPOINT};
use crate::common::{KeptParam, ParamRecord};

/// Cross-file collection of kept parameters, one record per name.
///
/// A name seen again moves its record to the latest sighting: both the file
/// path and the source URL are replaced, so the pair always belongs together.
#[derive(Debug, Clone)]
pub struct ParameterAggregate {
    records: BTreeMap<String, ParamRecord>,
    always_keep: HashSet<String>,
    search_endpoint: String,
}

impl Default for ParameterAggregate {
    fn default() -> Self {
        Self::new(DEFAULT_ALWAYS_KEEP.iter().copied(), DEFAULT_SEARCH_ENDPOINT)
    }
}

impl ParameterAggregate {
    pub fn new<I, S>(always_keep: I, search_endpoint: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            records: BTreeMap::new(),
            always_keep: always_keep.into_iter().map(Into::into).collect(),
            search_endpoint: search_endpoint.to_string(),
        }
    }

    pub fn record(&mut self, name: &str, file_path: &str, source_url: &str) {
        if self.always_keep.contains(name) {
            return;
        }

        if let Some(existing) = self.records.get_mut(name) {
            existing.file_path = file_path.to_string();
            existing.source_url = source_url.to_string();
            return;
        }

        debug!("New remaining parameter '{}' in {}", name, file_path);
        let search_url = self.search_url_for(name);
        self.records.insert(
            name.to_string(),
            ParamRecord {
                name: name.to_string(),
                file_path: file_path.to_string(),
                source_url: source_url.to_string(),
                search_url,
            },
        );
    }

    pub fn absorb(&mut self, kept: &[KeptParam]) {
        for param in kept {
            self.record(&param.name, &param.file_path, &param.source_url);
        }
    }

    /// Records sorted by parameter name.
    pub fn snapshot(&self) -> Vec<(&str, &ParamRecord)> {
        self.records
            .iter()
            .map(|(name, record)| (name.as_str(), record))
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&ParamRecord> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn search_url_for(&self, name: &str) -> String {
        let question = format!("what is purpose of google url parameter \"{}\"", name);
        let query: String = form_urlencoded::byte_serialize(question.as_bytes()).collect();
        format!("{}?q={}", self.search_endpoint, query)
    }
}
