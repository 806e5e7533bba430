use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregator::ParameterAggregate;
use crate::common::constants::{
    DEFAULT_ALWAYS_KEEP, DEFAULT_EXCLUDE_PATTERNS, DEFAULT_GOOGLE_DOMAINS, DEFAULT_REMOVE_PARAMS,
    DEFAULT_REPORT_PATH, DEFAULT_SEARCH_ENDPOINT, MARKDOWN_EXT, SETTINGS_DIR_NAME,
    SETTINGS_FILE_NAME,
};
use crate::url_cleaner::CleanPolicy;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn default_always_keep() -> Vec<String> {
    strings(DEFAULT_ALWAYS_KEEP)
}

fn default_remove_params() -> Vec<String> {
    strings(DEFAULT_REMOVE_PARAMS)
}

fn default_exclude_patterns() -> Vec<String> {
    strings(DEFAULT_EXCLUDE_PATTERNS)
}

fn default_google_domains() -> Vec<String> {
    strings(DEFAULT_GOOGLE_DOMAINS)
}

fn default_file_extension() -> String {
    MARKDOWN_EXT.to_string()
}

fn default_report_path() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_PATH)
}

fn default_search_endpoint() -> String {
    DEFAULT_SEARCH_ENDPOINT.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_always_keep")]
    pub always_keep: Vec<String>,
    #[serde(default = "default_remove_params")]
    pub remove_params: Vec<String>,
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
    #[serde(default)]
    pub exclude_regexes: Vec<String>,
    #[serde(default = "default_google_domains")]
    pub google_domains: Vec<String>,
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
    #[serde(default = "default_search_endpoint")]
    pub search_endpoint: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            always_keep: default_always_keep(),
            remove_params: default_remove_params(),
            exclude_patterns: default_exclude_patterns(),
            exclude_regexes: Vec::new(),
            google_domains: default_google_domains(),
            file_extension: default_file_extension(),
            report_path: default_report_path(),
            search_endpoint: default_search_endpoint(),
        }
    }
}

impl Settings {
    pub fn load(settings_file: &Path) -> Result<Self> {
        if !settings_file.exists() {
            return Err(anyhow::anyhow!(
                "settings file not found at '{}'. Exiting...",
                settings_file.display()
            ));
        }

        let contents = fs::read_to_string(settings_file).with_context(|| {
            format!("Failed to read settings file: {}", settings_file.display())
        })?;

        let settings: Settings = serde_json::from_str(&contents).with_context(|| {
            format!("Failed to parse settings file: {}", settings_file.display())
        })?;

        info!("Settings loaded from '{}'.", settings_file.display());
        Ok(settings)
    }

    /// Explicit path first, then the per-user settings file, then defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::user_settings_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No settings file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn user_settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    pub fn policy(&self) -> CleanPolicy {
        CleanPolicy::new(
            &self.always_keep,
            &self.remove_params,
            &self.exclude_patterns,
            &self.exclude_regexes,
            &self.google_domains,
        )
    }

    pub fn new_aggregate(&self) -> ParameterAggregate {
        ParameterAggregate::new(self.always_keep.iter().cloned(), &self.search_endpoint)
    }

    /// Extension without a leading dot
    pub fn extension(&self) -> &str {
        self.file_extension.trim_start_matches('.')
    }
}
