use crate::config::SourceConfig;
use crate::error::{Result, ScraperError};
use crate::sources::PageSource;
use crate::types::YearKey;
use async_trait::async_trait;
use encoding_rs::Encoding;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Reads a saved copy of the results page from disk.
///
/// The year key only labels the run; the same file is returned for any year.
pub struct LocalFileSource {
    path: PathBuf,
    encoding: &'static Encoding,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>, encoding_label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(encoding_label.as_bytes()).ok_or_else(|| {
            ScraperError::Config(format!("unknown encoding label '{encoding_label}'"))
        })?;
        Ok(Self {
            path: path.into(),
            encoding,
        })
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        Self::new(config.local_path.clone(), &config.local_encoding)
    }

}

#[async_trait]
impl PageSource for LocalFileSource {
    fn source_name(&self) -> &'static str {
        "local"
    }

    fn location(&self, _year: &YearKey) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self), fields(year = %year, path = %self.path.display()))]
    async fn fetch_html(&self, year: &YearKey) -> Result<String> {
        let bytes = tokio::fs::read(&self.path).await?;
        // BOM, when present, wins over the configured label.
        let (text, used, had_errors) = self.encoding.decode(&bytes);
        if had_errors {
            return Err(ScraperError::Encoding(format!(
                "{} is not valid {}",
                self.path.display(),
                used.name()
            )));
        }
        debug!("Decoded {} bytes as {}", bytes.len(), used.name());
        Ok(text.into_owned())
    }
}
