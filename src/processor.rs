use indicatif::ProgressBar;
use log::{debug, error, info, warn};
use std::io;
use std::path::{Path, PathBuf};

use crate::aggregator::ParameterAggregate;
use crate::common::time_utils::current_timestamp;
use crate::common::{CleanError, FileFailure, RunSummary};
use crate::file_ops::DocumentStore;
use crate::report::{render_report, write_report};
use crate::settings::Settings;
use crate::url_cleaner::LineTransformer;

/// What happened to a single file that was processed without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Unchanged,
    Rewritten { changed_lines: usize },
    /// Dry run: the file would have been rewritten.
    WouldRewrite { changed_lines: usize },
}

/// Cleans files one at a time and collects their remaining parameters.
pub struct Processor<S: DocumentStore> {
    transformer: LineTransformer,
    store: S,
    aggregate: ParameterAggregate,
    dry_run: bool,
    processed: usize,
    modified: usize,
    failures: Vec<FileFailure>,
}

impl<S: DocumentStore> Processor<S> {
    pub fn new(settings: &Settings, store: S) -> Self {
        Self {
            transformer: LineTransformer::new(settings.policy()),
            store,
            aggregate: settings.new_aggregate(),
            dry_run: false,
            processed: 0,
            modified: 0,
            failures: Vec::new(),
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn aggregate(&self) -> &ParameterAggregate {
        &self.aggregate
    }

    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    /// Reads, cleans and (if anything changed) rewrites one file.
    ///
    /// Parameters are only aggregated once the file has been handled
    /// successfully.
    pub fn process_file(&mut self, path: &Path) -> Result<FileOutcome, CleanError> {
        let original = self
            .store
            .read_all(path)
            .map_err(|e| CleanError::io(path, e))?;
        let text = String::from_utf8(original)
            .map_err(|e| CleanError::io(path, io::Error::new(io::ErrorKind::InvalidData, e)))?;

        let file_path = path.to_string_lossy();
        let cleaned = self.transformer.transform_document(&text, &file_path);

        let outcome = if !cleaned.changed() {
            FileOutcome::Unchanged
        } else if self.dry_run {
            info!(
                "Would modify {} line(s) in {}",
                cleaned.changed_lines,
                path.display()
            );
            FileOutcome::WouldRewrite {
                changed_lines: cleaned.changed_lines,
            }
        } else {
            self.store
                .write_all(path, cleaned.text.as_bytes())
                .map_err(|e| CleanError::io(path, e))?;
            info!(
                "Modified {} line(s) in {}",
                cleaned.changed_lines,
                path.display()
            );
            FileOutcome::Rewritten {
                changed_lines: cleaned.changed_lines,
            }
        };

        self.aggregate.absorb(&cleaned.kept);
        Ok(outcome)
    }

    /// Processes every path in order. A failing file is recorded and skipped.
    pub fn run(&mut self, paths: &[PathBuf], pb: &ProgressBar) {
        let total = paths.len();
        for (i, path) in paths.iter().enumerate() {
            pb.set_message(format!("{}/{}: {}", i + 1, total, path.display()));

            match self.process_file(path) {
                Ok(outcome) => {
                    self.processed += 1;
                    if outcome != FileOutcome::Unchanged {
                        self.modified += 1;
                    }
                    debug!("Processed {}: {:?}", path.display(), outcome);
                }
                Err(e) => {
                    error!("Failed to process file {}: {}", path.display(), e);
                    self.failures.push(FileFailure {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
            }

            pb.inc(1);
        }
    }

    /// Logs failures and writes the report. Report failure is the only error.
    pub fn finish(self, report_path: &Path) -> Result<RunSummary, CleanError> {
        if !self.failures.is_empty() {
            warn!("Failed to process the following files:");
            for failure in &self.failures {
                warn!("- {}", failure.path.display());
            }
        }

        let report_path = if self.aggregate.is_empty() {
            info!("No remaining parameters found; report not written");
            None
        } else {
            let report = render_report(&self.aggregate.snapshot(), &current_timestamp());
            write_report(report_path, &report)?;
            Some(report_path.to_path_buf())
        };

        Ok(RunSummary {
            processed: self.processed,
            modified: self.modified,
            remaining_params: self.aggregate.len(),
            failures: self.failures,
            report_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use tempfile::tempdir;

    /// In-memory store that records every write.
    #[derive(Default)]
    struct MemoryStore {
        files: RefCell<HashMap<PathBuf, Vec<u8>>>,
        writes: RefCell<Vec<PathBuf>>,
    }

    impl MemoryStore {
        fn with_file(self, path: &str, contents: &str) -> Self {
            self.files
                .borrow_mut()
                .insert(PathBuf::from(path), contents.as_bytes().to_vec());
            self
        }

        fn contents(&self, path: &str) -> String {
            String::from_utf8(self.files.borrow()[Path::new(path)].clone()).unwrap()
        }
    }

    impl DocumentStore for MemoryStore {
        fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }

        fn write_all(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
            self.writes.borrow_mut().push(path.to_path_buf());
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), contents.to_vec());
            Ok(())
        }
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_process_file_rewrites_and_aggregates() {
        let store = MemoryStore::default().with_file(
            "a.md",
            "link https://www.google.com/search?q=test&client=chrome&ie=UTF-8&og=stuff\n",
        );
        let mut processor = Processor::new(&Settings::default(), store);

        let outcome = processor.process_file(Path::new("a.md")).unwrap();
        assert_eq!(outcome, FileOutcome::Rewritten { changed_lines: 1 });
        assert_eq!(
            processor.store.contents("a.md"),
            "link https://www.google.com/search?og=stuff&q=test\n"
        );
        assert_eq!(processor.aggregate().get("og").unwrap().file_path, "a.md");
    }

    #[test]
    fn test_process_file_unchanged_skips_write() {
        let store = MemoryStore::default().with_file(
            "clean.md",
            "already clean https://www.google.com/search?q=test\nand https://example.com/?ei=1\n",
        );
        let mut processor = Processor::new(&Settings::default(), store);

        let outcome = processor.process_file(Path::new("clean.md")).unwrap();
        assert_eq!(outcome, FileOutcome::Unchanged);
        assert!(processor.store.writes.borrow().is_empty());
    }

    #[test]
    fn test_process_file_dry_run_skips_write() {
        let store = MemoryStore::default()
            .with_file("a.md", "https://www.google.com/search?q=x&ei=1&og=2");
        let mut processor = Processor::new(&Settings::default(), store).with_dry_run(true);

        let outcome = processor.process_file(Path::new("a.md")).unwrap();
        assert_eq!(outcome, FileOutcome::WouldRewrite { changed_lines: 1 });
        assert!(processor.store.writes.borrow().is_empty());
        assert_eq!(processor.aggregate().len(), 1);
    }

    #[test]
    fn test_process_file_invalid_utf8() {
        let store = MemoryStore::default();
        store
            .files
            .borrow_mut()
            .insert(PathBuf::from("bin.md"), vec![0xff, 0xfe, 0x00]);
        let mut processor = Processor::new(&Settings::default(), store);

        let err = processor.process_file(Path::new("bin.md")).unwrap_err();
        assert!(matches!(err, CleanError::Io { .. }));
    }

    #[test]
    fn test_run_continues_after_failure() {
        let store = MemoryStore::default()
            .with_file("a.md", "https://www.google.com/search?q=a&og=1&ei=x\n")
            .with_file("c.md", "https://www.google.com/search?og=3&q=c\n");
        let mut processor = Processor::new(&Settings::default(), store);

        processor.run(&paths(&["a.md", "missing.md", "c.md"]), &ProgressBar::hidden());

        assert_eq!(processor.failures().len(), 1);
        assert_eq!(processor.failures()[0].path, PathBuf::from("missing.md"));

        let record = processor.aggregate().get("og").unwrap();
        assert_eq!(record.file_path, "c.md");
        assert_eq!(record.source_url, "https://www.google.com/search?og=3&q=c");

        let temp_dir = tempdir().unwrap();
        let report_path = temp_dir.path().join("report.md");
        let summary = processor.finish(&report_path).unwrap();
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.modified, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.remaining_params, 1);
        assert_eq!(summary.report_path, Some(report_path.clone()));
        assert!(std::fs::read_to_string(&report_path)
            .unwrap()
            .contains("### `og`"));
    }

    #[test]
    fn test_finish_without_params_skips_report() {
        let store = MemoryStore::default()
            .with_file("a.md", "https://www.google.com/search?q=a&ei=x\n");
        let mut processor = Processor::new(&Settings::default(), store);
        processor.run(&paths(&["a.md"]), &ProgressBar::hidden());

        let temp_dir = tempdir().unwrap();
        let report_path = temp_dir.path().join("report.md");
        let summary = processor.finish(&report_path).unwrap();
        assert_eq!(summary.report_path, None);
        assert!(!report_path.exists());
    }

    #[test]
    fn test_finish_report_failure_is_fatal() {
        let store = MemoryStore::default()
            .with_file("a.md", "https://www.google.com/search?q=a&og=1\n");
        let mut processor = Processor::new(&Settings::default(), store);
        processor.run(&paths(&["a.md"]), &ProgressBar::hidden());

        let temp_dir = tempdir().unwrap();
        let err = processor.finish(temp_dir.path()).unwrap_err();
        assert!(matches!(err, CleanError::Report { .. }));
    }
}
