pub mod constants;
pub mod error;
pub mod time_utils;
pub mod types;

pub use error::CleanError;
pub use types::{
    CleanResult, CleanerResult, DocumentResult, FileFailure, KeptParam, ParamRecord, RunSummary,
};
