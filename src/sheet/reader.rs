use crate::error::{Result, ScraperError};
use crate::table::{CellValue, Table};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, instrument};

/// Load the first worksheet of a workbook as a table.
///
/// The first row of the used range is the header. Blank header cells are
/// named `Unnamed: <n>` and repeated names get a `.<k>` suffix so every
/// column can be addressed by name.
#[instrument(fields(path = %path.display()))]
pub fn read_table(path: &Path) -> Result<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ScraperError::MissingElement(format!("{} has no worksheets", path.display())))??;
    let table = range_to_table(&range);
    debug!(
        "Read {} rows x {} columns",
        table.len(),
        table.columns().len()
    );
    Ok(table)
}

/// Load one named worksheet as raw display rows (header included).
pub fn read_sheet(path: &Path, sheet_name: &str) -> Result<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook.worksheet_range(sheet_name)?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(|cell| to_cell_value(cell).to_string()).collect())
        .collect())
}

fn range_to_table(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Table::default();
    };

    let mut table = Table::new(header_names(header));
    for row in rows {
        table.push_row(row.iter().map(to_cell_value).collect());
    }
    table
}

fn header_names(header: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let base = match to_cell_value(cell) {
                CellValue::Empty => format!("Unnamed: {i}"),
                other => other.to_string(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

fn to_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}
