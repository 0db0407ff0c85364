//! Pasusat - Runtime configuration

use std::path::PathBuf;

use crate::format::SourceEncoding;

/// Where the census export lives relative to the working directory
pub const DEFAULT_DATA_PATH: &str = "../datasets/1642645053.csv";

/// Province column of the census export
pub const DEFAULT_REGION_COLUMN: &str = "สถานที่เลี้ยงสัตว์ จังหวัด";

/// Rows shown in the top provinces table
pub const DEFAULT_TOP_N: usize = 10;

/// Settings for one dashboard session
#[derive(Debug, Clone)]
pub struct Config {
    pub path: PathBuf,
    pub encoding: SourceEncoding,
    pub region_column: String,
    pub top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
            encoding: SourceEncoding::Tis620,
            region_column: DEFAULT_REGION_COLUMN.to_string(),
            top_n: DEFAULT_TOP_N,
        }
    }
}
