use log::info;
use std::fs;
use std::path::Path;

use crate::common::{CleanError, ParamRecord};
use crate::file_ops::ensure_dir_exists;

/// Renders the remaining-parameters report as Markdown.
pub fn render_report(records: &[(&str, &ParamRecord)], generated_at: &str) -> String {
    let mut report = String::new();

    report.push_str("# Remaining Google URL parameters\n\n");
    report.push_str(&format!("_Generated {}_\n\n", generated_at));
    report.push_str(
        "These parameters were left in place because they are on neither the keep list \
         nor the removal list. Look each one up and add the tracking ones to \
         `remove_params` in the settings file.\n\n",
    );

    report.push_str("## Parameters\n\n");
    for (name, _) in records {
        report.push_str(&format!("- `{}`\n", name));
    }
    report.push('\n');

    report.push_str("Ready to paste into `remove_params`:\n\n");
    report.push_str("```json\n");
    report.push_str(&names_as_json(records));
    report.push_str("\n```\n\n");

    report.push_str("## Details\n");
    for (name, record) in records {
        report.push_str(&format!("\n### `{}`\n\n", name));
        report.push_str(&format!("- File: `{}`\n", record.file_path));
        report.push_str(&format!("- Source URL: <{}>\n", record.source_url));
        report.push_str(&format!(
            "- Lookup: [what is `{}`?]({})\n",
            name, record.search_url
        ));
    }

    report
}

fn names_as_json(records: &[(&str, &ParamRecord)]) -> String {
    let names: Vec<&str> = records.iter().map(|(name, _)| *name).collect();
    serde_json::to_string_pretty(&names).unwrap_or_else(|_| "[]".to_string())
}

pub fn write_report(path: &Path, contents: &str) -> Result<(), CleanError> {
    let to_report_error = |source: std::io::Error| CleanError::Report {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent).map_err(to_report_error)?;
    }
    fs::write(path, contents).map_err(to_report_error)?;

    info!("Remaining parameters report generated: {}", path.display());
    Ok(())
}
