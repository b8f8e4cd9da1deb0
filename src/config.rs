use crate::constants;
use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub years: YearsConfig,
    pub output: OutputConfig,
    pub columns: ColumnsConfig,
    pub logging: LoggingConfig,
    pub style: StyleConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    /// Path appended to `base_url`; `{year}` is replaced by the year key.
    pub path_template: String,
    pub local_path: PathBuf,
    pub local_encoding: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct YearsConfig {
    pub start: u32,
    /// Exclusive.
    pub end: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub sheet_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    pub rate: String,
    pub derived: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
    pub file: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub font_name: String,
    pub font_size: f64,
    pub font_paths: Vec<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: constants::DEFAULT_BASE_URL.to_string(),
            path_template: constants::DEFAULT_PATH_TEMPLATE.to_string(),
            local_path: PathBuf::from(constants::DEFAULT_LOCAL_PATH),
            local_encoding: constants::DEFAULT_LOCAL_ENCODING.to_string(),
        }
    }
}

impl Default for YearsConfig {
    fn default() -> Self {
        Self {
            start: constants::DEFAULT_START_YEAR,
            end: constants::DEFAULT_END_YEAR,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            sheet_name: constants::DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            rate: constants::DEFAULT_RATE_COLUMN.to_string(),
            derived: constants::DEFAULT_DERIVED_COLUMN.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(constants::DEFAULT_LOG_DIR),
            file: constants::DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_name: constants::DEFAULT_FONT_NAME.to_string(),
            font_size: constants::DEFAULT_FONT_SIZE,
            font_paths: constants::DEFAULT_FONT_PATHS
                .iter()
                .map(PathBuf::from)
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// When `required` is false a missing file yields the built-in defaults,
    /// which is how the default `config.toml` lookup behaves.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        if !path.exists() && !required {
            let config = Config::default();
            config.validate()?;
            return Ok(config);
        }

        let config_content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.years.start >= self.years.end {
            return Err(ScraperError::Config(format!(
                "year range {}..{} is empty",
                self.years.start, self.years.end
            )));
        }
        if !self.source.path_template.contains(constants::YEAR_PLACEHOLDER) {
            return Err(ScraperError::Config(format!(
                "path_template '{}' must contain {}",
                self.source.path_template,
                constants::YEAR_PLACEHOLDER
            )));
        }
        if self.columns.rate == self.columns.derived {
            return Err(ScraperError::Config(
                "rate and derived column names must differ".to_string(),
            ));
        }
        if encoding_rs::Encoding::for_label(self.source.local_encoding.as_bytes()).is_none() {
            return Err(ScraperError::Config(format!(
                "unknown encoding label '{}'",
                self.source.local_encoding
            )));
        }
        if !(self.style.font_size.is_finite() && self.style.font_size > 0.0) {
            return Err(ScraperError::Config(format!(
                "font_size must be positive, got {}",
                self.style.font_size
            )));
        }
        if self.output.sheet_name.trim().is_empty() {
            return Err(ScraperError::Config("sheet_name must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_layout() {
        let config = Config::default();
        assert_eq!(config.source.base_url, "https://shirley.tw");
        assert_eq!(config.years.start, 110);
        assert_eq!(config.years.end, 113);
        assert_eq!(config.output.dir, PathBuf::from("output_files"));
        assert_eq!(config.output.sheet_name, "Sheet1");
        assert_eq!(config.columns.rate, "錄取率");
        assert_eq!(config.columns.derived, "錄取率%");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [years]
            start = 108
            end = 110

            [output]
            dir = "out"
            "#,
        )
        .unwrap();
        assert_eq!(config.years.start, 108);
        assert_eq!(config.years.end, 110);
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.output.sheet_name, "Sheet1");
        assert_eq!(config.source.local_encoding, "utf-8");
    }

    #[test]
    fn rejects_empty_year_range() {
        let err = Config::from_toml_str("[years]\nstart = 112\nend = 112\n").unwrap_err();
        assert!(matches!(err, ScraperError::Config(_)));
    }

    #[test]
    fn rejects_template_without_year() {
        let err = Config::from_toml_str("[source]\npath_template = \"exam/\"\n").unwrap_err();
        assert!(err.to_string().contains("{year}"));
    }

    #[test]
    fn rejects_unknown_encoding() {
        let err = Config::from_toml_str("[source]\nlocal_encoding = \"klingon\"\n").unwrap_err();
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn missing_optional_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml"), false).unwrap();
        assert_eq!(config.years.start, 110);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml"), true).unwrap_err();
        assert!(matches!(err, ScraperError::Config(_)));
    }
}
