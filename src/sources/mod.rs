//! Where the raw HTML for a year comes from.
//!
//! A run uses exactly one [`PageSource`]: the live site or a saved copy.

pub mod local;
pub mod web;

use crate::error::Result;
use crate::types::YearKey;
use async_trait::async_trait;

pub use local::LocalFileSource;
pub use web::WebPageSource;

/// Core trait that every HTML source must implement
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Short identifier used in log fields
    fn source_name(&self) -> &'static str;

    /// Human-readable location for a given year (URL or file path)
    fn location(&self, year: &YearKey) -> String;

    /// Produce the raw HTML text for the given year
    async fn fetch_html(&self, year: &YearKey) -> Result<String>;
}
