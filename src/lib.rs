//! Strips tracking parameters from Google URLs found in Markdown notes and
//! reports the parameters it left alone.

pub mod aggregator;
pub mod common;
pub mod file_ops;
pub mod filters;
pub mod processor;
pub mod report;
pub mod settings;
pub mod url_cleaner;

pub use aggregator::ParameterAggregate;
pub use common::{CleanError, CleanResult, KeptParam, ParamRecord, RunSummary};
pub use file_ops::{DocumentStore, FsStore};
pub use processor::{FileOutcome, Processor};
pub use settings::Settings;
pub use url_cleaner::{extract_urls, CleanPolicy, CleanedUrl, GoogleUrlCleaner, LineTransformer};
