use crate::constants::SHEET_EXTENSION;
use crate::error::Result;
use crate::sheet::address::CellAddress;
use crate::types::CellRecord;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Writes scraped cells into a fresh workbook under an output directory.
pub struct SheetBuilder {
    output_dir: PathBuf,
}

impl SheetBuilder {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `<output_dir>/<stem>.xlsx`
    pub fn path_for(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{stem}.{SHEET_EXTENSION}"))
    }

    /// Safe to call repeatedly.
    pub fn ensure_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Create `<stem>.xlsx` and put every record's value at its address, as text.
    ///
    /// Addresses are validated before anything touches the disk, so an invalid
    /// one leaves no file behind. Records without a value leave the cell blank;
    /// a later record at the same address overwrites an earlier one.
    #[instrument(skip(self, records), fields(cells = records.len()))]
    pub fn build(&self, stem: &str, records: &[CellRecord]) -> Result<PathBuf> {
        let placed = records
            .iter()
            .map(|r| CellAddress::parse(&r.address).map(|addr| (addr, r.raw_value.as_deref())))
            .collect::<Result<Vec<_>>>()?;

        self.ensure_output_dir()?;
        let path = self.path_for(stem);

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let mut written = 0usize;
        for (addr, value) in placed {
            match value {
                Some(v) if !v.is_empty() => {
                    worksheet.write_string(addr.row, addr.col, v)?;
                    written += 1;
                }
                _ => debug!("{} has no value; leaving blank", addr),
            }
        }
        workbook.save(&path)?;

        info!(
            "Successfully created and saved Excel file: {} ({} cells)",
            path.display(),
            written
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScraperError;

    #[test]
    fn creates_output_dir_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let builder = SheetBuilder::new(dir.path().join("nested").join("out"));
        let records = vec![
            CellRecord::new("A1", Some("學校".into())),
            CellRecord::new("B1", Some("錄取率".into())),
        ];
        let path = builder.build("111", &records).unwrap();
        assert!(path.exists());
        assert_eq!(path.file_name().unwrap(), "111.xlsx");

        // second build into the same dir is fine
        builder.build("111", &records).unwrap();
    }

    #[test]
    fn invalid_address_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let builder = SheetBuilder::new(dir.path());
        let records = vec![
            CellRecord::new("A1", Some("ok".into())),
            CellRecord::new("not-a-cell", Some("bad".into())),
        ];
        let err = builder.build("broken", &records).unwrap_err();
        assert!(matches!(err, ScraperError::InvalidCellAddress(_)));
        assert!(!builder.path_for("broken").exists());
    }
}
