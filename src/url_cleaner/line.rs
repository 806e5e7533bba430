use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::io::{self, BufRead, Write};
use url::Url;

use super::extractor::url_spans;
use super::google::GoogleUrlCleaner;
use super::policy::CleanPolicy;
use crate::common::{CleanError, CleanResult, DocumentResult, KeptParam};
use crate::filters::ExclusionFilter;

/// Runs extraction, exclusion and cleaning over lines of text.
#[derive(Debug, Clone)]
pub struct LineTransformer {
    filter: ExclusionFilter,
    cleaner: GoogleUrlCleaner,
}

impl LineTransformer {
    pub fn new(policy: CleanPolicy) -> Self {
        let filter = ExclusionFilter::new(policy.exclude_patterns(), policy.exclude_regexes());
        Self {
            filter,
            cleaner: GoogleUrlCleaner::new(policy),
        }
    }

    pub fn policy(&self) -> &CleanPolicy {
        self.cleaner.policy()
    }

    pub fn transform_line(&self, line: &str, file_path: &str) -> CleanResult {
        let spans = url_spans(line);
        let mut seen: HashSet<&str> = HashSet::new();
        let mut replacements: HashMap<&str, String> = HashMap::new();
        let mut kept = Vec::new();

        for span in &spans {
            let url = &line[span.clone()];
            if !seen.insert(url) {
                continue;
            }

            if self.filter.is_excluded(url) {
                continue;
            }

            let parsed = match Url::parse(url) {
                Ok(parsed) => parsed,
                Err(source) => {
                    let e = CleanError::MalformedUrl {
                        url: url.to_string(),
                        source,
                    };
                    warn!("Failed to clean URL in '{}': {}", file_path, e);
                    continue;
                }
            };

            let is_google = parsed
                .host_str()
                .is_some_and(|host| self.policy().is_google_host(host));
            if !is_google {
                debug!("Skipping non-Google URL: {}", url);
                continue;
            }

            let cleaned = self.cleaner.clean_parsed(url, parsed);
            kept.extend(cleaned.kept.into_iter().map(|name| KeptParam {
                name,
                file_path: file_path.to_string(),
                source_url: url.to_string(),
            }));
            if cleaned.url != url {
                replacements.insert(url, cleaned.url);
            }
        }

        if replacements.is_empty() {
            return CleanResult {
                line: line.to_string(),
                changed: false,
                kept,
            };
        }

        // Rebuild from the matched spans so a URL that prefixes a longer one
        // on the same line never rewrites part of the longer one.
        let mut new_line = String::with_capacity(line.len());
        let mut cursor = 0;
        for span in spans {
            if let Some(cleaned) = replacements.get(&line[span.clone()]) {
                new_line.push_str(&line[cursor..span.start]);
                new_line.push_str(cleaned);
                cursor = span.end;
            }
        }
        new_line.push_str(&line[cursor..]);

        let changed = new_line != line;
        CleanResult {
            line: new_line,
            changed,
            kept,
        }
    }

    /// Cleans every line, keeping line endings and the final newline as they were.
    pub fn transform_document(&self, text: &str, file_path: &str) -> DocumentResult {
        let mut result = DocumentResult {
            text: String::with_capacity(text.len()),
            ..Default::default()
        };

        for raw_line in text.split_inclusive('\n') {
            let (line, ending) = split_line_ending(raw_line);
            let cleaned = self.transform_line(line, file_path);
            if cleaned.changed {
                debug!("Modified URL in {}", file_path);
                result.changed_lines += 1;
            }
            result.text.push_str(&cleaned.line);
            result.text.push_str(ending);
            result.kept.extend(cleaned.kept);
        }

        result
    }

    /// Cleans a stream line by line. Returns the number of changed lines.
    pub fn clean_stream<R: BufRead, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> io::Result<usize> {
        let mut changed = 0;
        let mut buf = String::new();
        loop {
            buf.clear();
            if reader.read_line(&mut buf)? == 0 {
                break;
            }
            let (line, ending) = split_line_ending(&buf);
            let cleaned = self.transform_line(line, "");
            if cleaned.changed {
                changed += 1;
            }
            writer.write_all(cleaned.line.as_bytes())?;
            writer.write_all(ending.as_bytes())?;
        }
        writer.flush()?;
        Ok(changed)
    }
}

fn split_line_ending(raw: &str) -> (&str, &str) {
    if let Some(line) = raw.strip_suffix("\r\n") {
        (line, "\r\n")
    } else if let Some(line) = raw.strip_suffix('\n') {
        (line, "\n")
    } else {
        (raw, "")
    }
}
