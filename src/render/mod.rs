//! Publishing a normalized table: a styled workbook plus a PNG of its sheet.

pub mod raster;
pub mod style;

use crate::config::Config;
use crate::constants::IMAGE_EXTENSION;
use crate::error::Result;
use crate::sheet::read_sheet;
use crate::table::Table;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub use self::raster::{save_png, SheetRasterizer};
pub use self::style::{write_styled, SheetStyle};

pub struct Renderer {
    sheet_name: String,
    style: SheetStyle,
    font_paths: Vec<PathBuf>,
}

impl Renderer {
    pub fn new(sheet_name: impl Into<String>, style: SheetStyle, font_paths: Vec<PathBuf>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            style,
            font_paths,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.output.sheet_name.clone(),
            SheetStyle::from_config(&config.style),
            config.style.font_paths.clone(),
        )
    }

    /// `<output_dir>/<stem>.png`
    pub fn image_path(output_dir: &Path, stem: &str) -> PathBuf {
        output_dir.join(format!("{stem}.{IMAGE_EXTENSION}"))
    }

    /// Overwrite `spreadsheet` with the styled table, then export its sheet
    /// to `image_path`.
    #[instrument(skip(self, table), fields(sheet = %self.sheet_name))]
    pub fn render(&self, table: &Table, spreadsheet: &Path, image_path: &Path) -> Result<()> {
        write_styled(table, spreadsheet, &self.sheet_name, &self.style)?;
        info!(
            "Successfully styled and wrote table to Excel: {}",
            spreadsheet.display()
        );

        let rows = read_sheet(spreadsheet, &self.sheet_name)?;
        let rasterizer = SheetRasterizer::load(&self.font_paths, self.style.font_size)?;
        let img = rasterizer.render(&rows)?;
        save_png(&img, image_path)?;

        info!(
            "Successfully converted {} to {} ({}x{}, font {})",
            spreadsheet.display(),
            image_path.display(),
            img.width(),
            img.height(),
            rasterizer.font_path().display()
        );
        Ok(())
    }
}
