use crate::error::{Result, ScraperError};
use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const PAD_X: u32 = 6;
const PAD_Y: u32 = 4;
const MIN_COLUMN_WIDTH: u32 = 24;
const MAX_DIMENSION: u32 = 32_000;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const GRID: Rgb<u8> = Rgb([64, 64, 64]);
const INK: [f32; 3] = [0.0, 0.0, 0.0];

/// Draws a grid of strings the way a spreadsheet prints it: thin borders,
/// left-aligned, vertically centered text, header row in bold.
pub struct SheetRasterizer {
    font: FontVec,
    scale: PxScale,
    source: PathBuf,
}

impl SheetRasterizer {
    /// Use the first font file in `candidates` that exists and parses.
    pub fn load(candidates: &[PathBuf], size_pt: f64) -> Result<Self> {
        for path in candidates {
            let Ok(data) = std::fs::read(path) else {
                continue;
            };
            match FontVec::try_from_vec_and_index(data, 0) {
                Ok(font) => {
                    debug!("Rasterizing with font {}", path.display());
                    return Ok(Self::with_font(font, path.clone(), size_pt));
                }
                Err(e) => warn!("Skipping font {}: {}", path.display(), e),
            }
        }
        Err(ScraperError::Render {
            message: format!("no usable font among {} candidates", candidates.len()),
        })
    }

    pub fn with_font(font: FontVec, source: PathBuf, size_pt: f64) -> Self {
        // points to pixels at 96 dpi
        let px = (size_pt * 96.0 / 72.0) as f32;
        Self {
            font,
            scale: PxScale::from(px),
            source,
        }
    }

    pub fn font_path(&self) -> &Path {
        &self.source
    }

    fn line_height(&self) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        scaled.height() + scaled.line_gap()
    }

    fn line_width(&self, text: &str) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0;
        let mut prev: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(p) = prev {
                width += scaled.kern(p, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        width
    }

    fn cell_size(&self, text: &str, bold: bool) -> (u32, u32) {
        let lines: Vec<&str> = text.split('\n').collect();
        let widest = lines
            .iter()
            .map(|l| self.line_width(l))
            .fold(0.0f32, f32::max);
        let extra = if bold { 1.0 } else { 0.0 };
        let w = (widest + extra).ceil() as u32 + 2 * PAD_X;
        let h = (self.line_height() * lines.len() as f32).ceil() as u32 + 2 * PAD_Y;
        (w.max(MIN_COLUMN_WIDTH), h)
    }

    /// Distinct non-whitespace characters in `rows` the font has no glyph for,
    /// in first-seen order. These draw as `.notdef` boxes.
    pub fn missing_glyphs(&self, rows: &[Vec<String>]) -> Vec<char> {
        let mut missing = Vec::new();
        for ch in rows.iter().flatten().flat_map(|cell| cell.chars()) {
            if !ch.is_whitespace() && self.font.glyph_id(ch) == GlyphId(0) && !missing.contains(&ch) {
                missing.push(ch);
            }
        }
        missing
    }

    /// Lay out and draw `rows` (first row is the header).
    pub fn render(&self, rows: &[Vec<String>]) -> Result<RgbImage> {
        let n_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        if n_cols == 0 {
            return Err(ScraperError::Render {
                message: "sheet is empty".into(),
            });
        }

        let missing = self.missing_glyphs(rows);
        if !missing.is_empty() {
            let sample: String = missing.iter().take(10).collect();
            warn!(
                "Font {} has no glyph for {} characters (e.g. '{}'); they will render as boxes",
                self.source.display(),
                missing.len(),
                sample
            );
        }

        let mut col_widths = vec![MIN_COLUMN_WIDTH; n_cols];
        let mut row_heights = Vec::with_capacity(rows.len());
        for (r, row) in rows.iter().enumerate() {
            let mut height = self.cell_size("", false).1;
            for (c, text) in row.iter().enumerate() {
                let (w, h) = self.cell_size(text, r == 0);
                col_widths[c] = col_widths[c].max(w);
                height = height.max(h);
            }
            row_heights.push(height);
        }

        let width = col_widths.iter().sum::<u32>() + 1;
        let height = row_heights.iter().sum::<u32>() + 1;
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ScraperError::Render {
                message: format!("image would be {width}x{height} pixels"),
            });
        }

        let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
        let scaled = self.font.as_scaled(self.scale);
        let line_height = self.line_height();

        let mut top = 0u32;
        for (r, row) in rows.iter().enumerate() {
            let row_height = row_heights[r];
            let mut left = 0u32;
            for (c, &col_width) in col_widths.iter().enumerate() {
                draw_rect_outline(&mut img, left, top, col_width, row_height);
                if let Some(text) = row.get(c) {
                    let lines: Vec<&str> = text.split('\n').collect();
                    let block = line_height * lines.len() as f32;
                    let mut baseline =
                        top as f32 + (row_height as f32 - block) / 2.0 + scaled.ascent();
                    for line in lines {
                        let x = (left + PAD_X) as f32;
                        self.draw_line(&mut img, line, x, baseline);
                        if r == 0 {
                            self.draw_line(&mut img, line, x + 1.0, baseline);
                        }
                        baseline += line_height;
                    }
                }
                left += col_width;
            }
            top += row_height;
        }
        Ok(img)
    }

    fn draw_line(&self, img: &mut RgbImage, text: &str, x: f32, baseline: f32) {
        let scaled = self.font.as_scaled(self.scale);
        let mut caret = x;
        let mut prev: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(p) = prev {
                caret += scaled.kern(p, id);
            }
            let glyph = id.with_scale_and_position(self.scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            prev = Some(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + i64::from(gx);
                let py = bounds.min.y as i64 + i64::from(gy);
                blend(img, px, py, coverage);
            });
        }
    }
}

fn blend(img: &mut RgbImage, x: i64, y: i64, coverage: f32) {
    if x < 0 || y < 0 || x >= i64::from(img.width()) || y >= i64::from(img.height()) {
        return;
    }
    let c = coverage.clamp(0.0, 1.0);
    let pixel = img.get_pixel_mut(x as u32, y as u32);
    for (channel, ink) in pixel.0.iter_mut().zip(INK) {
        let bg = f32::from(*channel);
        *channel = (bg * (1.0 - c) + ink * 255.0 * c).round() as u8;
    }
}

fn draw_rect_outline(img: &mut RgbImage, left: u32, top: u32, width: u32, height: u32) {
    let right = (left + width).min(img.width() - 1);
    let bottom = (top + height).min(img.height() - 1);
    for x in left..=right {
        img.put_pixel(x, top, GRID);
        img.put_pixel(x, bottom, GRID);
    }
    for y in top..=bottom {
        img.put_pixel(left, y, GRID);
        img.put_pixel(right, y, GRID);
    }
}

/// Encode as PNG at `path`.
pub fn save_png(img: &RgbImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
