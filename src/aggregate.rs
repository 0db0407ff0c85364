//! Pasusat - Aggregation over prepared columns
//!
//! All sums skip missing cells. A group whose cells are all missing still
//! appears, with a total of zero.
//!
//! ```text
//! ┌──────────────┐   region cells   ┌──────────────┐   stable sort   ┌───────────┐
//! │ numeric col  │─────────────────▶│ first-seen   │────────────────▶│  ranking  │
//! │ Option<f64>  │   skip None      │ group sums   │   descending    │ (desc)    │
//! └──────────────┘                  └──────────────┘                 └───────────┘
//! ```

use serde::Serialize;
use std::collections::HashMap;

use crate::data::Dataset;
use crate::error::ColumnNotFound;
use crate::species::{Metric, Species};

/// Summed value for one region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTotal {
    pub region: String,
    pub total: f64,
}

/// Summed head count for one species
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesTotal {
    pub species: Species,
    pub column: String,
    pub total: f64,
}

/// One province plotted on a scatter view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub region: String,
    pub x: f64,
    pub y: f64,
}

/// Sum of present values
pub fn skip_missing_sum(values: &[Option<f64>]) -> f64 {
    values.iter().flatten().sum()
}

/// First `n` entries of a ranking
pub fn top_n(ranking: &[RegionTotal], n: usize) -> &[RegionTotal] {
    &ranking[..n.min(ranking.len())]
}

impl Dataset {
    /// Group rows by region, sum `label` per group, highest total first.
    ///
    /// Region cells are grouped as written; only blank ones are left out.
    /// Equal totals keep the order in which their regions first appear in
    /// the file.
    pub fn aggregate_by_region(&self, label: &str) -> Result<Vec<RegionTotal>, ColumnNotFound> {
        let values = self.numeric(label)?;
        let regions = self.regions()?;

        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<RegionTotal> = Vec::new();

        for (row, value) in values.iter().enumerate() {
            let region = match regions.text(row) {
                Some(r) if !r.trim().is_empty() => r,
                _ => continue,
            };

            let slot = *index.entry(region).or_insert_with(|| {
                groups.push(RegionTotal {
                    region: region.to_string(),
                    total: 0.0,
                });
                groups.len() - 1
            });

            if let Some(v) = value {
                groups[slot].total += v;
            }
        }

        groups.sort_by(|a, b| b.total.total_cmp(&a.total));
        Ok(groups)
    }

    /// Skip-missing sum of a whole column
    pub fn column_total(&self, label: &str) -> Result<f64, ColumnNotFound> {
        self.numeric(label).map(skip_missing_sum)
    }

    /// Head-count total for every species.
    ///
    /// Sums the census' own `ทั้งสิ้น` column when the header has it, so a
    /// sub-category listed earlier (`ไก่ไข่` before `ไก่`) is not mistaken for
    /// the species total. Otherwise falls back to the catalog entry.
    pub fn species_totals(&self) -> Vec<SpeciesTotal> {
        Species::ALL
            .iter()
            .filter_map(|&species| {
                let canonical = species.canonical_total_label();
                let column = match self.column(&canonical) {
                    Some(c) => c.label.as_str(),
                    None => self.resolve(species, Metric::Total)?,
                };
                let total = self.column_total(column).ok()?;
                Some(SpeciesTotal {
                    species,
                    column: column.to_string(),
                    total,
                })
            })
            .collect()
    }

    /// Per-row (x, y) pairs where both cells are present
    pub fn paired_points(&self, x_label: &str, y_label: &str) -> Result<Vec<Point>, ColumnNotFound> {
        let xs = self.numeric(x_label)?;
        let ys = self.numeric(y_label)?;
        let regions = self.regions().ok();

        Ok(xs
            .iter()
            .zip(ys)
            .enumerate()
            .filter_map(|(row, (x, y))| {
                let region = regions
                    .and_then(|r| r.text(row))
                    .map(|r| r.trim().to_string())
                    .unwrap_or_default();
                Some(Point {
                    region,
                    x: (*x)?,
                    y: (*y)?,
                })
            })
            .collect())
    }
}
