/// Parameters with known meaning: never removed and never reported
pub const DEFAULT_ALWAYS_KEEP: &[&str] = &["q", "tbm"];

/// Tracking and telemetry parameters stripped from Google URLs.
///
/// `udm` is deliberately absent: `udm=2` selects image search, as in
/// `https://www.google.com/search?udm=2&q=poison+ivy`.
pub const DEFAULT_REMOVE_PARAMS: &[&str] = &[
    "bih", "biw", "client", "dpr", "ei", "fbs", "gs_lcp", "gs_lcrp", "gs_lp", "gs_ssp", "ictx",
    "ie", "oq", "prmd", "sa", "sca_esv", "sca_upv", "sclient", "source", "sourceid", "sqi",
    "sxsrf", "uact", "uds", "ved",
];

/// Parameter that must never end up in the removal set
pub const PROTECTED_PARAM: &str = "udm";

/// URLs containing any of these (case-insensitive) are left alone
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["google.com/maps/"];

/// Hosts treated as Google, matched exactly or as a parent domain
pub const DEFAULT_GOOGLE_DOMAINS: &[&str] = &["google.com"];

/// Endpoint used to build the lookup link for each remaining parameter
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.google.com/search";

/// Report file written after a run
pub const DEFAULT_REPORT_PATH: &str = "remaining_params_report.md";

/// File extensions
pub const MARKDOWN_EXT: &str = "md";

/// Settings file name under the per-user config directory
pub const SETTINGS_DIR_NAME: &str = "google-url-cleaner";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Progress bar template
pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// Progress bar characters
pub const PROGRESS_BAR_CHARS: &str = "#>-";
