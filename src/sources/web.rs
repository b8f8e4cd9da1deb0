use crate::config::SourceConfig;
use crate::constants::YEAR_PLACEHOLDER;
use crate::error::{Result, ScraperError};
use crate::sources::PageSource;
use crate::types::YearKey;
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, instrument};

/// Fetches the published results page for a year over HTTP.
pub struct WebPageSource {
    client: Client,
    base_url: String,
    path_template: String,
}

impl Default for WebPageSource {
    fn default() -> Self {
        Self::from_config(&SourceConfig::default())
    }
}

impl WebPageSource {
    pub fn new(base_url: impl Into<String>, path_template: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            path_template: path_template.into(),
        }
    }

    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(config.base_url.clone(), config.path_template.clone())
    }

    /// `https://<host>/<year>y-hsinchu-exam/` for the default template.
    pub fn url_for(&self, year: &YearKey) -> Result<Url> {
        let path = self.path_template.replace(YEAR_PLACEHOLDER, year.as_str());
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|e| ScraperError::Config(format!("invalid URL '{raw}': {e}")))
    }
}

#[async_trait]
impl PageSource for WebPageSource {
    fn source_name(&self) -> &'static str {
        "web"
    }

    fn location(&self, year: &YearKey) -> String {
        match self.url_for(year) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}/{}", self.base_url, self.path_template),
        }
    }

    #[instrument(skip(self), fields(year = %year))]
    async fn fetch_html(&self, year: &YearKey) -> Result<String> {
        let url = self.url_for(year)?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!("Received {} bytes", body.len());
        Ok(body)
    }
}
