//! Google URL cleaning: discovery in text, parameter policy, and rewriting.

mod extractor;
mod google;
mod line;
mod policy;

pub use extractor::{extract_urls, url_spans};
pub use google::{CleanedUrl, GoogleUrlCleaner};
pub use line::LineTransformer;
pub use policy::CleanPolicy;
