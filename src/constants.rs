/// Defaults shared by the config layer and the CLI.
/// Every value here can be overridden from `config.toml`.

// Source site
pub const DEFAULT_BASE_URL: &str = "https://shirley.tw";
pub const DEFAULT_PATH_TEMPLATE: &str = "{year}y-hsinchu-exam/";
pub const YEAR_PLACEHOLDER: &str = "{year}";
pub const DEFAULT_LOCAL_PATH: &str =
    "./111_academic_year_hsinchu_junior_high_school_acceptance_rate.html";
pub const DEFAULT_LOCAL_ENCODING: &str = "utf-8";

// Academic years, half-open range
pub const DEFAULT_START_YEAR: u32 = 110;
pub const DEFAULT_END_YEAR: u32 = 113;

// Page structure
pub const TITLE_SELECTOR: &str = "h1";
pub const TABLE_BODY_SELECTOR: &str = "tbody";
pub const CELL_SELECTOR: &str = "td";
pub const CELL_ID_ATTR: &str = "data-cell-id";
pub const CELL_VALUE_ATTR: &str = "data-original-value";

// Table columns
pub const DEFAULT_RATE_COLUMN: &str = "錄取率";
pub const DEFAULT_DERIVED_COLUMN: &str = "錄取率%";

// Output
pub const DEFAULT_OUTPUT_DIR: &str = "output_files";
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
pub const SHEET_EXTENSION: &str = "xlsx";
pub const IMAGE_EXTENSION: &str = "png";

// Logging
pub const DEFAULT_LOG_DIR: &str = ".";
pub const DEFAULT_LOG_FILE: &str = "app.log";
pub const DEFAULT_LOG_FILTER: &str = "acceptance_rates=info,info";

// Styling
pub const DEFAULT_FONT_NAME: &str = "Arial";
pub const DEFAULT_FONT_SIZE: f64 = 10.0;

/// Font files tried in order when rasterizing a sheet. CJK-capable faces
/// come first since school names are in Traditional Chinese.
pub const DEFAULT_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "C:\\Windows\\Fonts\\msjh.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Printed once per year whose run reached the end of the pipeline.
pub const COMPLETION_MESSAGE: &str = "Process completed successfully.";
