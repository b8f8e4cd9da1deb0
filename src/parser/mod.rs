use crate::constants::{
    CELL_ID_ATTR, CELL_SELECTOR, CELL_VALUE_ATTR, TABLE_BODY_SELECTOR, TITLE_SELECTOR,
};
use crate::error::{Result, ScraperError};
use crate::types::CellRecord;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

static TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(TITLE_SELECTOR).expect("title selector is valid"));
static TABLE_BODY: Lazy<Selector> =
    Lazy::new(|| Selector::parse(TABLE_BODY_SELECTOR).expect("table body selector is valid"));
static CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(CELL_SELECTOR).expect("cell selector is valid"));

/// A results page parsed once and kept for extraction.
pub struct Page {
    pub title: String,
    pub document: Html,
}

impl Page {
    /// Parse raw HTML and read the post title from the first `<h1>`.
    ///
    /// The site serves a page without an `<h1>` for years it has not
    /// published, so a missing title is reported as [`ScraperError::NotFound`].
    pub fn parse(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);
        let title = document
            .select(&TITLE)
            .next()
            .map(|h1| collapse_whitespace(&h1.text().collect::<String>()))
            .ok_or_else(|| {
                ScraperError::NotFound("Could not find the title <h1> tag in the HTML.".into())
            })?;
        debug!("Parsed page titled '{}'", title);
        Ok(Self { title, document })
    }

    pub fn cells(&self) -> Result<Vec<CellRecord>> {
        extract_cells(&self.document)
    }
}

/// Collect every `<td>` of the first `<tbody>` as (address, value) pairs in
/// document order.
pub fn extract_cells(document: &Html) -> Result<Vec<CellRecord>> {
    let body = document
        .select(&TABLE_BODY)
        .next()
        .ok_or_else(|| ScraperError::MissingElement("no <tbody> in document".into()))?;

    let mut records = Vec::new();
    for (i, td) in body.select(&CELL).enumerate() {
        let element = td.value();
        let address = element.attr(CELL_ID_ATTR).ok_or_else(|| {
            ScraperError::MissingAttribute(format!("<td> #{i} has no {CELL_ID_ATTR}"))
        })?;
        let raw_value = element.attr(CELL_VALUE_ATTR).map(str::to_string);
        records.push(CellRecord::new(address.trim(), raw_value));
    }
    debug!("Extracted {} cells", records.len());
    Ok(records)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
