//! Pasusat - Census table loading
//!
//! Reads the census CSV once, normalizes the header labels, and stores the
//! table column-major. Head-count and farmer-count columns are coerced to
//! numbers during load so every later query is a read-only scan.

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::catalog::ColumnCatalog;
use crate::config::Config;
use crate::error::{ColumnNotFound, LoadError};
use crate::format::{coerce_number, SourceEncoding};
use crate::species::{Metric, Species};

/// Cell storage for one column
#[derive(Debug, Clone, PartialEq)]
pub enum Cells {
    /// Raw text, as read from the file
    Text(Vec<String>),
    /// Coerced counts; `None` marks a cell that did not parse
    Numeric(Vec<Option<f64>>),
}

/// A single named column
#[derive(Debug, Clone)]
pub struct Column {
    pub label: String,
    pub cells: Cells,
}

impl Column {
    pub fn text(&self, row: usize) -> Option<&str> {
        match &self.cells {
            Cells::Text(values) => values.get(row).map(String::as_str),
            Cells::Numeric(_) => None,
        }
    }

    pub fn numbers(&self) -> Option<&[Option<f64>]> {
        match &self.cells {
            Cells::Numeric(values) => Some(values),
            Cells::Text(_) => None,
        }
    }

    /// Number of cells that failed to coerce
    pub fn missing_count(&self) -> usize {
        self.numbers()
            .map(|values| values.iter().filter(|v| v.is_none()).count())
            .unwrap_or(0)
    }
}

/// The normalized census table, held for the whole session
pub struct Dataset {
    /// File path for display
    pub path: String,
    /// File size in bytes
    pub size: u64,
    /// Encoding the file was decoded with
    pub encoding: SourceEncoding,
    columns: Vec<Column>,
    row_count: usize,
    region_label: String,
    catalog: ColumnCatalog,
    /// Canonical head-count labels the header did not carry
    absent_canonical: Vec<String>,
}

impl Dataset {
    /// Load the census file named by `config`.
    pub fn open(config: &Config) -> Result<Self, LoadError> {
        let path = config.path.as_path();
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!("Read {} bytes from {}", bytes.len(), path.display());

        let text = config
            .encoding
            .decode(&bytes)
            .ok_or_else(|| LoadError::Encoding {
                path: path.display().to_string(),
                encoding: config.encoding.name(),
            })?;

        let mut dataset = Self::from_text(&text, &config.region_column, path)?;
        dataset.size = bytes.len() as u64;
        dataset.encoding = config.encoding;
        Ok(dataset)
    }

    /// Build a dataset from already decoded CSV text
    pub fn from_text(text: &str, region_label: &str, source: &Path) -> Result<Self, LoadError> {
        if text.trim().is_empty() {
            return Err(LoadError::Empty(source.display().to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(LoadError::Empty(source.display().to_string()));
        }

        let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        let mut row_count = 0;

        for result in reader.records() {
            let record = result?;
            if record.len() > headers.len() {
                return Err(LoadError::Parse(format!(
                    "row {} has {} fields, header has {}",
                    row_count + 1,
                    record.len(),
                    headers.len()
                )));
            }
            for (idx, column) in raw.iter_mut().enumerate() {
                column.push(record.get(idx).unwrap_or("").to_string());
            }
            row_count += 1;
        }

        let catalog = ColumnCatalog::build(&headers);

        let canonical: Vec<String> = Species::ALL
            .iter()
            .map(Species::canonical_total_label)
            .collect();
        let absent_canonical: Vec<String> = canonical
            .iter()
            .filter(|label| !headers.contains(label))
            .cloned()
            .collect();
        for label in &absent_canonical {
            warn!("Header is missing head-count column {:?}", label);
        }

        let is_numeric = |label: &str| {
            canonical.iter().any(|c| c == label) || catalog.labels().any(|c| c == label)
        };

        let columns: Vec<Column> = headers
            .into_iter()
            .zip(raw)
            .map(|(label, values)| {
                let cells = if is_numeric(&label) {
                    Cells::Numeric(values.iter().map(|v| coerce_number(v)).collect())
                } else {
                    Cells::Text(values)
                };
                Column { label, cells }
            })
            .collect();

        for column in columns.iter().filter(|c| c.missing_count() > 0) {
            debug!("{}: {} cells missing", column.label, column.missing_count());
        }

        if !columns.iter().any(|c| c.label == region_label) {
            warn!("Region column {:?} not found", region_label);
        }

        info!("Loaded {} rows × {} columns", row_count, columns.len());

        Ok(Self {
            path: source.display().to_string(),
            size: text.len() as u64,
            encoding: SourceEncoding::Utf8,
            columns,
            row_count,
            region_label: region_label.to_string(),
            catalog,
            absent_canonical,
        })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Normalized header labels, in file order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.label.as_str())
    }

    pub fn column(&self, label: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.label == label)
    }

    pub fn catalog(&self) -> &ColumnCatalog {
        &self.catalog
    }

    pub fn absent_canonical(&self) -> &[String] {
        &self.absent_canonical
    }

    pub fn region_label(&self) -> &str {
        &self.region_label
    }

    /// Resolved column label for a species and metric
    pub fn resolve(&self, species: Species, metric: Metric) -> Option<&str> {
        self.catalog.resolve(species, metric)
    }

    /// Numeric cells of a column, or a typed miss if there is no such
    /// numeric column
    pub fn numeric(&self, label: &str) -> Result<&[Option<f64>], ColumnNotFound> {
        self.column(label)
            .and_then(Column::numbers)
            .ok_or_else(|| ColumnNotFound::Label(label.to_string()))
    }

    /// The region column
    pub fn regions(&self) -> Result<&Column, ColumnNotFound> {
        self.column(&self.region_label)
            .filter(|c| matches!(c.cells, Cells::Text(_)))
            .ok_or_else(|| ColumnNotFound::Region(self.region_label.clone()))
    }

    /// Get formatted file size string
    pub fn size_human(&self) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;

        if self.size >= MB {
            format!("{:.2} MB", self.size as f64 / MB as f64)
        } else if self.size >= KB {
            format!("{:.2} KB", self.size as f64 / KB as f64)
        } else {
            format!("{} B", self.size)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use encoding_rs::WINDOWS_874;
    use std::io::Write;
    use tempfile::NamedTempFile;

    pub(crate) const REGION: &str = "สถานที่เลี้ยงสัตว์ จังหวัด";

    /// A small census extract: two provinces per region-row, beef and dairy
    /// cattle plus farmer counts for beef cattle.
    pub(crate) fn sample_csv() -> String {
        [
            " ลำดับ ,สถานที่เลี้ยงสัตว์ จังหวัด, จำนวนเกษตรกรผู้เลี้ยง โคเนื้อ (ราย) , จำนวนรวม โคเนื้อ ทั้งสิ้น (ตัว) ,จำนวนรวม โคนม ทั้งสิ้น (ตัว)",
            "1,เชียงใหม่,120,\"1,500\",300",
            "2,ขอนแก่น,80,\"3,000\",-",
            "3,เชียงใหม่,40,500,100",
            "4,นครราชสีมา,abc,\"2,000\",",
        ]
        .join("\n")
    }

    pub(crate) fn sample_dataset() -> Dataset {
        Dataset::from_text(&sample_csv(), REGION, Path::new("sample.csv")).unwrap()
    }

    fn write_tis620(text: &str) -> NamedTempFile {
        let (bytes, _, unmappable) = WINDOWS_874.encode(text);
        assert!(!unmappable);
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();
        file
    }

    fn config_for(path: &Path) -> Config {
        Config {
            path: path.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_header_whitespace_is_stripped() {
        let dataset = sample_dataset();
        let headers: Vec<&str> = dataset.headers().collect();
        assert_eq!(headers[0], "ลำดับ");
        assert_eq!(headers[3], "จำนวนรวม โคเนื้อ ทั้งสิ้น (ตัว)");
        assert_eq!(
            dataset.resolve(Species::BeefCattle, Metric::Total),
            Some("จำนวนรวม โคเนื้อ ทั้งสิ้น (ตัว)")
        );
    }

    #[test]
    fn test_padded_label_becomes_matchable() {
        let csv = " Foo ,bar\n1,2";
        let dataset = Dataset::from_text(csv, REGION, Path::new("foo.csv")).unwrap();
        assert!(dataset.column("Foo").is_some());
    }

    #[test]
    fn test_counts_are_coerced() {
        let dataset = sample_dataset();
        let beef = dataset.numeric("จำนวนรวม โคเนื้อ ทั้งสิ้น (ตัว)").unwrap();
        assert_eq!(beef, &[Some(1500.0), Some(3000.0), Some(500.0), Some(2000.0)]);

        let dairy = dataset.numeric("จำนวนรวม โคนม ทั้งสิ้น (ตัว)").unwrap();
        assert_eq!(dairy, &[Some(300.0), None, Some(100.0), None]);

        let farmers = dataset.numeric("จำนวนเกษตรกรผู้เลี้ยง โคเนื้อ (ราย)").unwrap();
        assert_eq!(farmers, &[Some(120.0), Some(80.0), Some(40.0), None]);
    }

    #[test]
    fn test_region_column_stays_text() {
        let dataset = sample_dataset();
        let regions = dataset.regions().unwrap();
        assert_eq!(regions.text(1), Some("ขอนแก่น"));
        assert!(dataset.numeric(REGION).is_err());
    }

    #[test]
    fn test_absent_canonical_columns_are_recorded() {
        let dataset = sample_dataset();
        assert_eq!(dataset.absent_canonical().len(), 6);
        assert!(dataset.resolve(Species::Sheep, Metric::Total).is_none());
    }

    #[test]
    fn test_open_tis620_file() {
        let file = write_tis620(&sample_csv());
        let dataset = Dataset::open(&config_for(file.path())).unwrap();

        assert_eq!(dataset.row_count(), 4);
        assert_eq!(dataset.encoding, SourceEncoding::Tis620);
        assert!(dataset.column(REGION).is_some());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let config = config_for(Path::new("/definitely/not/here.csv"));
        assert!(matches!(Dataset::open(&config), Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_invalid_bytes_are_load_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x41, 0x2c, 0xff, 0x0a]).unwrap();
        let result = Dataset::open(&config_for(file.path()));
        assert!(matches!(result, Err(LoadError::Encoding { .. })));
    }

    #[test]
    fn test_extra_fields_are_load_error() {
        let csv = "a,b\n1,2,3";
        let result = Dataset::from_text(csv, REGION, Path::new("bad.csv"));
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let csv = "จังหวัด,จำนวนรวม แพะ ทั้งสิ้น (ตัว)\nตาก";
        let dataset = Dataset::from_text(csv, "จังหวัด", Path::new("short.csv")).unwrap();
        assert_eq!(dataset.numeric("จำนวนรวม แพะ ทั้งสิ้น (ตัว)").unwrap(), &[None]);
    }

    #[test]
    fn test_empty_file_is_load_error() {
        let result = Dataset::from_text("", REGION, Path::new("empty.csv"));
        assert!(matches!(result, Err(LoadError::Empty(_))));
    }
}
