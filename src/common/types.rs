use std::path::PathBuf;

/// Common result type for cleaning operations
pub type CleanerResult<T> = Result<T, super::CleanError>;

/// A kept query parameter seen on one URL in one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeptParam {
    pub name: String,
    pub file_path: String,
    /// The URL as it appeared before cleaning
    pub source_url: String,
}

/// Aggregated entry for one kept parameter name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamRecord {
    pub name: String,
    pub file_path: String,
    pub source_url: String,
    pub search_url: String,
}

/// Outcome of cleaning a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanResult {
    pub line: String,
    pub changed: bool,
    pub kept: Vec<KeptParam>,
}

/// Outcome of cleaning a whole document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentResult {
    pub text: String,
    pub changed_lines: usize,
    pub kept: Vec<KeptParam>,
}

impl DocumentResult {
    pub fn changed(&self) -> bool {
        self.changed_lines > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Processing statistics for one run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub processed: usize,
    pub modified: usize,
    pub failures: Vec<FileFailure>,
    pub remaining_params: usize,
    pub report_path: Option<PathBuf>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.processed + self.failures.len()
    }

    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.processed as f64 / self.total() as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate() {
        let summary = RunSummary {
            processed: 3,
            failures: vec![FileFailure {
                path: PathBuf::from("a.md"),
                reason: "denied".to_string(),
            }],
            ..Default::default()
        };
        assert_eq!(summary.total(), 4);
        assert!((summary.success_rate() - 75.0).abs() < f64::EPSILON);
        assert_eq!(RunSummary::default().success_rate(), 0.0);
    }
}
