use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineArgs {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Path to a settings.json file")]
    pub settings: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Where to write the remaining parameters report"
    )]
    pub report: Option<PathBuf>,

    #[arg(
        long = "dry-run",
        global = true,
        help = "Show which files would change without rewriting them"
    )]
    pub dry_run: bool,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Recursively clean Google URLs in the Markdown files under a directory
    #[command(name = "files-from-dir", alias = "ffd")]
    FilesFromDir {
        #[arg(help = "Directory to search for Markdown files")]
        dir: PathBuf,
    },

    /// Clean Google URLs in the files whose paths are read from stdin
    #[command(name = "paths-from-stdin", alias = "pfs")]
    PathsFromStdin,

    /// Clean Google URLs in text read from stdin and write it to stdout
    Pipe,
}

impl CommandLineArgs {
    pub fn parse_args() -> Self {
        CommandLineArgs::parse()
    }

    /// Logs what this invocation is about to do. Call after logging is set up.
    pub fn log_summary(&self) {
        match &self.command {
            Command::FilesFromDir { dir } => info!("Cleaning files under {}", dir.display()),
            Command::PathsFromStdin => info!("Reading file paths from stdin"),
            Command::Pipe => {}
        }
        if self.dry_run {
            info!("Dry run: files will not be rewritten");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_files_from_dir() {
        let args =
            CommandLineArgs::try_parse_from(["google-url-cleaner", "files-from-dir", "notes"])
                .unwrap();
        assert_eq!(
            args.command,
            Command::FilesFromDir {
                dir: PathBuf::from("notes")
            }
        );
        assert!(!args.dry_run);
        assert!(args.settings.is_none());
        assert!(args.report.is_none());
    }

    #[test]
    fn test_parse_aliases_and_globals() {
        let args = CommandLineArgs::try_parse_from([
            "google-url-cleaner",
            "ffd",
            "notes",
            "--dry-run",
            "--report",
            "out/report.md",
            "-v",
        ])
        .unwrap();
        assert!(matches!(args.command, Command::FilesFromDir { .. }));
        assert!(args.dry_run);
        assert!(args.verbose);
        assert_eq!(args.report, Some(PathBuf::from("out/report.md")));

        let args = CommandLineArgs::try_parse_from([
            "google-url-cleaner",
            "--settings",
            "custom.json",
            "pfs",
        ])
        .unwrap();
        assert_eq!(args.command, Command::PathsFromStdin);
        assert_eq!(args.settings, Some(PathBuf::from("custom.json")));
    }

    #[test]
    fn test_parse_requires_command() {
        assert!(CommandLineArgs::try_parse_from(["google-url-cleaner"]).is_err());
        assert!(
            CommandLineArgs::try_parse_from(["google-url-cleaner", "files-from-dir"]).is_err()
        );
    }
}
