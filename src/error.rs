use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("404: Page not found. {0}")]
    NotFound(String),

    #[error("Missing required element: {0}")]
    MissingElement(String),

    #[error("Missing required attribute: {0}")]
    MissingAttribute(String),

    #[error("Invalid cell address '{0}'")]
    InvalidCellAddress(String),

    #[error("Spreadsheet write failed: {0}")]
    SheetWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Spreadsheet read failed: {0}")]
    SheetRead(#[from] calamine::XlsxError),

    #[error("Column '{0}' not found")]
    MissingColumn(String),

    #[error("Text decoding failed: {0}")]
    Encoding(String),

    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Render error: {message}")]
    Render { message: String },
}

pub type Result<T> = std::result::Result<T, ScraperError>;
