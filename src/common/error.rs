use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while cleaning documents.
///
/// `Io` and `MalformedUrl` are recovered where they happen (the file or the
/// URL is skipped). `Report` and `Walk` end the run.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed URL '{url}': {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to write report {}: {source}", .path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot scan {}: {reason}", .path.display())]
    Walk { path: PathBuf, reason: String },
}

impl CleanError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CleanError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CleanError::io("notes/a.md", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(err.to_string().starts_with("I/O error on notes/a.md"));

        let err = CleanError::Report {
            path: PathBuf::from("report.md"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("report.md"));
    }
}
