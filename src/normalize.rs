//! Acceptance-rate normalization: `"87.5%"` text becomes a sortable `87.5`.

use crate::config::ColumnsConfig;
use crate::error::{Result, ScraperError};
use crate::sheet::read_table;
use crate::table::{CellValue, Table};
use std::cmp::Ordering;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Parse a rate like `"62.5%"` by dropping its last character.
///
/// Returns `None` for anything that is not a finite number in `[0, 100]`
/// once the suffix is gone, so a dash, a blank or `"n/a"` simply has no rate.
pub fn parse_rate(raw: &str) -> Option<f64> {
    let mut chars = raw.chars();
    chars.next_back()?;
    let value: f64 = chars.as_str().trim().parse().ok()?;
    if !(value.is_finite() && (0.0..=100.0).contains(&value)) {
        return None;
    }
    // "-0%" parses to -0.0; fold it into 0.0 so it ties with "0%".
    Some(if value == 0.0 { 0.0 } else { value })
}

/// Descending by rate, missing rates last, then by original position.
fn rate_order(a: (usize, Option<f64>), b: (usize, Option<f64>)) -> Ordering {
    let by_rate = match (a.1, b.1) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_rate.then(a.0.cmp(&b.0))
}

pub struct RateNormalizer {
    rate_column: String,
    derived_column: String,
}

impl Default for RateNormalizer {
    fn default() -> Self {
        Self::from_config(&ColumnsConfig::default())
    }
}

impl RateNormalizer {
    pub fn new(rate_column: impl Into<String>, derived_column: impl Into<String>) -> Self {
        Self {
            rate_column: rate_column.into(),
            derived_column: derived_column.into(),
        }
    }

    pub fn from_config(config: &ColumnsConfig) -> Self {
        Self::new(config.rate.clone(), config.derived.clone())
    }

    /// Reload the sheet written by the builder and normalize it.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn normalize_file(&self, path: &Path) -> Result<Table> {
        let table = read_table(path)?;
        self.normalize(table)
    }

    /// Derive the numeric column, sort by it, and drop the text column.
    pub fn normalize(&self, mut table: Table) -> Result<Table> {
        let rates: Vec<Option<f64>> = table
            .column(&self.rate_column)
            .ok_or_else(|| ScraperError::MissingColumn(self.rate_column.clone()))?
            .into_iter()
            .map(|cell| cell.as_text().and_then(parse_rate))
            .collect();

        let missing = rates.iter().filter(|r| r.is_none()).count();
        if missing > 0 {
            warn!(
                "{} of {} rows have no parsable {}",
                missing,
                rates.len(),
                self.rate_column
            );
        }

        let mut order: Vec<(usize, Option<f64>)> = rates.iter().copied().enumerate().collect();
        order.sort_by(|&a, &b| rate_order(a, b));
        let order: Vec<usize> = order.into_iter().map(|(i, _)| i).collect();
        debug!("Sorted row order: {:?}", order);

        table.set_column(
            &self.derived_column,
            rates.into_iter().map(CellValue::from).collect(),
        );
        table.reorder(&order);
        table.drop_column(&self.rate_column);

        info!("Successfully converted acceptance rates in the table.");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn schools(rows: &[(&str, &str)]) -> Table {
        let mut table = Table::new(vec!["學校".into(), "錄取率".into()]);
        for (name, rate) in rows {
            let rate = if rate.is_empty() {
                CellValue::Empty
            } else {
                text(rate)
            };
            table.push_row(vec![text(name), rate]);
        }
        table
    }

    fn names(table: &Table) -> Vec<String> {
        table.rows().iter().map(|r| r[0].to_string()).collect()
    }

    #[test]
    fn strips_suffix_and_parses() {
        assert_eq!(parse_rate("62.5%"), Some(62.5));
        assert_eq!(parse_rate("100%"), Some(100.0));
        assert_eq!(parse_rate(" 0.0% "), None); // trailing space is the dropped char
        assert_eq!(parse_rate("0.0%"), Some(0.0));
    }

    #[test]
    fn unparsable_rates_are_missing() {
        for raw in ["", "%", "—", "n/a", "abc%", "inf%", "NaN%", "150%", "-3%"] {
            assert_eq!(parse_rate(raw), None, "{raw:?}");
        }
    }

    #[test]
    fn sorts_descending_with_missing_last() {
        let table = schools(&[
            ("School A", "87.0%"),
            ("School B", "92.5%"),
            ("School C", "—"),
        ]);
        let out = RateNormalizer::default().normalize(table).unwrap();

        assert_eq!(out.columns(), ["學校", "錄取率%"]);
        assert_eq!(names(&out), ["School B", "School A", "School C"]);
        let rates: Vec<_> = out.rows().iter().map(|r| r[1].clone()).collect();
        assert_eq!(
            rates,
            vec![
                CellValue::Number(92.5),
                CellValue::Number(87.0),
                CellValue::Empty
            ]
        );
    }

    #[test]
    fn equal_rates_keep_input_order() {
        let table = schools(&[
            ("first", "50%"),
            ("gap", ""),
            ("second", "50%"),
            ("top", "75%"),
            ("third", "50.0%"),
            ("blank", "x"),
        ]);
        let out = RateNormalizer::default().normalize(table).unwrap();
        assert_eq!(
            names(&out),
            ["top", "first", "second", "third", "gap", "blank"]
        );
    }

    #[test]
    fn negative_zero_ties_with_zero() {
        assert_eq!(parse_rate("-0%").map(f64::to_bits), Some(0.0f64.to_bits()));

        let table = schools(&[("first", "-0%"), ("second", "0%"), ("third", "-0.0%")]);
        let out = RateNormalizer::default().normalize(table).unwrap();
        assert_eq!(names(&out), ["first", "second", "third"]);
    }

    #[test]
    fn rows_are_never_dropped() {
        let table = schools(&[("a", ""), ("b", "??"), ("c", "1%")]);
        let out = RateNormalizer::default().normalize(table).unwrap();
        assert_eq!(out.len(), 3);
        let column = out.column("錄取率%").unwrap();
        assert!(column.windows(2).all(|w| match (w[0].as_number(), w[1].as_number()) {
            (Some(x), Some(y)) => x >= y,
            (None, Some(_)) => false,
            _ => true,
        }));
    }

    #[test]
    fn numeric_source_cells_have_no_rate() {
        let mut table = Table::new(vec!["學校".into(), "錄取率".into()]);
        table.push_row(vec![text("a"), CellValue::Number(88.0)]);
        let out = RateNormalizer::default().normalize(table).unwrap();
        assert_eq!(out.rows()[0][1], CellValue::Empty);
    }

    #[test]
    fn missing_rate_column_is_an_error() {
        let table = Table::new(vec!["學校".into()]);
        let err = RateNormalizer::default().normalize(table).unwrap_err();
        assert!(matches!(err, ScraperError::MissingColumn(c) if c == "錄取率"));
    }

    #[test]
    fn derived_column_replaces_existing_one() {
        let mut table = Table::new(vec!["錄取率%".into(), "錄取率".into()]);
        table.push_row(vec![text("stale"), text("40%")]);
        let out = RateNormalizer::default().normalize(table).unwrap();
        assert_eq!(out.columns(), ["錄取率%"]);
        assert_eq!(out.rows()[0][0], CellValue::Number(40.0));
    }
}
