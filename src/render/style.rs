use crate::config::StyleConfig;
use crate::error::{Result, ScraperError};
use crate::table::{CellValue, Table};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};
use std::path::Path;
use tracing::{debug, instrument};

/// The one look applied to every cell of the published sheet.
#[derive(Debug, Clone)]
pub struct SheetStyle {
    pub font_name: String,
    pub font_size: f64,
}

impl Default for SheetStyle {
    fn default() -> Self {
        Self::from_config(&StyleConfig::default())
    }
}

impl SheetStyle {
    pub fn from_config(config: &StyleConfig) -> Self {
        Self {
            font_name: config.font_name.clone(),
            font_size: config.font_size,
        }
    }

    pub fn body_format(&self) -> Format {
        Format::new()
            .set_font_name(self.font_name.as_str())
            .set_font_size(self.font_size)
            .set_num_format("General")
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_shrink()
    }

    pub fn header_format(&self) -> Format {
        self.body_format().set_bold()
    }
}

/// Write `table` (header row first) into `sheet_name`, replacing whatever
/// workbook is at `path`. Column widths are fitted to their contents.
#[instrument(skip(table, style), fields(path = %path.display(), rows = table.len()))]
pub fn write_styled(table: &Table, path: &Path, sheet_name: &str, style: &SheetStyle) -> Result<()> {
    let header_format = style.header_format();
    let body_format = style.body_format();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, name) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, column_number(col)?, name.as_str(), &header_format)?;
    }

    for (i, row) in table.rows().iter().enumerate() {
        let row_number = u32::try_from(i + 1).map_err(|_| ScraperError::Render {
            message: format!("row {} exceeds the sheet", i + 1),
        })?;
        for (col, value) in row.iter().enumerate() {
            let col = column_number(col)?;
            match value {
                CellValue::Text(s) => {
                    worksheet.write_string_with_format(row_number, col, s.as_str(), &body_format)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number_with_format(row_number, col, *n, &body_format)?;
                }
                CellValue::Empty => {
                    worksheet.write_blank(row_number, col, &body_format)?;
                }
            }
        }
    }

    worksheet.autofit();
    workbook.save(path)?;
    debug!("Wrote styled sheet '{}'", sheet_name);
    Ok(())
}

fn column_number(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| ScraperError::Render {
        message: format!("column {col} exceeds the sheet"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::read_sheet;

    #[test]
    fn writes_header_and_typed_cells_to_named_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styled.xlsx");

        let mut table = Table::new(vec!["學校".into(), "錄取率%".into()]);
        table.push_row(vec![CellValue::Text("School B".into()), CellValue::Number(92.5)]);
        table.push_row(vec![CellValue::Text("School C".into()), CellValue::Empty]);

        write_styled(&table, &path, "Sheet1", &SheetStyle::default()).unwrap();

        let rows = read_sheet(&path, "Sheet1").unwrap();
        assert_eq!(rows[0], ["學校", "錄取率%"]);
        assert_eq!(rows[1], ["School B", "92.5"]);
        assert_eq!(rows[2], ["School C", ""]);
    }

    #[test]
    fn other_sheet_names_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styled.xlsx");
        let table = Table::new(vec!["a".into()]);
        write_styled(&table, &path, "Rates", &SheetStyle::default()).unwrap();
        assert!(read_sheet(&path, "Rates").is_ok());
        assert!(read_sheet(&path, "Sheet1").is_err());
    }

    #[test]
    fn default_style_is_arial_10_bordered_wrapped() {
        let style = SheetStyle::default();
        let expected = Format::new()
            .set_font_name("Arial")
            .set_font_size(10.0)
            .set_num_format("General")
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_shrink();

        assert_eq!(style.body_format(), expected);
        assert_eq!(style.header_format(), expected.clone().set_bold());
        assert_ne!(style.header_format(), style.body_format());
        assert_ne!(style.body_format(), Format::new());
    }

    #[test]
    fn configured_font_flows_into_formats() {
        let config = StyleConfig {
            font_name: "Noto Sans CJK TC".into(),
            font_size: 12.0,
            ..StyleConfig::default()
        };
        let style = SheetStyle::from_config(&config);
        assert_ne!(style.body_format(), SheetStyle::default().body_format());
        assert_eq!(
            style.body_format(),
            SheetStyle::default()
                .body_format()
                .set_font_name("Noto Sans CJK TC")
                .set_font_size(12.0)
        );
    }
}
