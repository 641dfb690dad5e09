// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://onlineredlineguide.com";
pub const USER_AGENT: &str = "redline_scrape/1.0";

// Output layout
pub const OUTPUT_ROOT: &str = "output";
pub const REPORTS_SUBDIR: &str = "reports";
pub const LOGS_SUBDIR: &str = "logs";
pub const RUN_LOG_FILE: &str = "hotwheel_scrape.log";
pub const PROFILE_FILE: &str = "hotwheel_scrape_profile.log";
pub const EXPORT_PREFIX: &str = "hotwheels-";
pub const CATALOG_STEM: &str = "redlines";

// Columns
pub const COLUMN_NAME: &str = "Casting";
pub const YEAR_KEY: &str = "Year";
pub const SERIES_KEY: &str = "Series";

// The snake/mongoose page lists the paired casting in its second column.
pub const BLANK_COLUMN_KEY: &str = "snake_mongoose";
