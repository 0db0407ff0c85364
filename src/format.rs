//! Pasusat - Source text encodings and Thai number formatting
//!
//! The census is published as TIS-620 text with counts written the way a
//! spreadsheet exports them (`"12,345"`). This module decodes the raw bytes
//! and turns cells into numbers, degrading to missing instead of failing.

use encoding_rs::{Encoding, UTF_8, WINDOWS_874};
use regex::Regex;
use std::sync::OnceLock;

/// Supported text encodings for the input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// Thai Industrial Standard 620 (decoded as its windows-874 superset)
    Tis620,
    /// UTF-8, with or without a byte order mark
    Utf8,
}

impl SourceEncoding {
    /// Parse encoding name from string (for CLI)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "tis-620" | "tis620" | "windows-874" | "cp874" | "thai" => {
                Some(SourceEncoding::Tis620)
            }
            "utf-8" | "utf8" => Some(SourceEncoding::Utf8),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceEncoding::Tis620 => "TIS-620",
            SourceEncoding::Utf8 => "UTF-8",
        }
    }

    fn encoding(&self) -> &'static Encoding {
        match self {
            SourceEncoding::Tis620 => WINDOWS_874,
            SourceEncoding::Utf8 => UTF_8,
        }
    }

    /// Decode raw file bytes. Returns None if any byte sequence is not valid
    /// in this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        let bytes = match self {
            SourceEncoding::Utf8 => bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes),
            SourceEncoding::Tis620 => bytes,
        };
        self.encoding()
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
    }
}

fn decimal_regex() -> &'static Regex {
    static DECIMAL: OnceLock<Regex> = OnceLock::new();
    DECIMAL.get_or_init(|| {
        Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").expect("valid regex: decimal")
    })
}

/// Convert a census cell to a number.
///
/// Thousands separators and stray spaces are dropped. Anything that is not
/// plain decimal notation (blank cells, `-` placeholders, text, `nan`,
/// `inf`) yields `None`.
pub fn coerce_number(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .trim()
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if !decimal_regex().is_match(&cleaned) {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Format a count with thousands separators for display
pub fn format_count(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if negative {
        format!("-{}", out)
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_thousands() {
        assert_eq!(coerce_number("1,234"), Some(1234.0));
        assert_eq!(coerce_number(" 12,345,678 "), Some(12_345_678.0));
        assert_eq!(coerce_number("42"), Some(42.0));
        assert_eq!(coerce_number("3.5"), Some(3.5));
        assert_eq!(coerce_number("-7"), Some(-7.0));
    }

    #[test]
    fn test_coerce_missing() {
        assert_eq!(coerce_number("abc"), None);
        assert_eq!(coerce_number(""), None);
        assert_eq!(coerce_number("   "), None);
        assert_eq!(coerce_number("-"), None);
        assert_eq!(coerce_number("nan"), None);
        assert_eq!(coerce_number("inf"), None);
        assert_eq!(coerce_number("1.2.3"), None);
    }

    #[test]
    fn test_parse_encoding() {
        assert_eq!(SourceEncoding::parse("tis-620"), Some(SourceEncoding::Tis620));
        assert_eq!(SourceEncoding::parse("TIS_620"), Some(SourceEncoding::Tis620));
        assert_eq!(SourceEncoding::parse("UTF-8"), Some(SourceEncoding::Utf8));
        assert_eq!(SourceEncoding::parse("latin1"), None);
    }

    #[test]
    fn test_decode_tis620() {
        let (bytes, _, unmappable) = WINDOWS_874.encode("จังหวัด,ไก่");
        assert!(!unmappable);
        assert_eq!(
            SourceEncoding::Tis620.decode(&bytes).as_deref(),
            Some("จังหวัด,ไก่")
        );
    }

    #[test]
    fn test_decode_utf8_rejects_invalid() {
        assert_eq!(SourceEncoding::Utf8.decode(b"\xEF\xBB\xBFok").as_deref(), Some("ok"));
        assert_eq!(SourceEncoding::Utf8.decode(&[0xff, 0xfe, 0x41]), None);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1234.0), "1,234");
        assert_eq!(format_count(1_234_567.4), "1,234,567");
        assert_eq!(format_count(-1500.0), "-1,500");
    }
}
