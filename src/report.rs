//! Pasusat - Headless JSON report
//!
//! Everything the dashboard can show, computed in one pass, for use in
//! scripts and pipelines without a terminal.

use serde::Serialize;

use crate::aggregate::RegionTotal;
use crate::analysis::{overview, regional, OverviewView};
use crate::catalog::CatalogEntry;
use crate::data::Dataset;
use crate::species::Species;

/// Top provinces for one species
#[derive(Debug, Serialize)]
pub struct RegionalSummary {
    pub species: Species,
    pub column: Option<String>,
    pub top: Vec<RegionTotal>,
    /// Why there is no ranking, if there is none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub path: String,
    pub encoding: &'static str,
    pub rows: usize,
    pub columns: usize,
    pub catalog: Vec<CatalogEntry>,
    pub absent_canonical: Vec<String>,
    pub overview: OverviewView,
    pub regional: Vec<RegionalSummary>,
}

impl Report {
    pub fn build(dataset: &Dataset, top: usize) -> Self {
        let rankings = Species::ALL
            .iter()
            .map(|&species| match regional(dataset, species, top) {
                Ok(view) => RegionalSummary {
                    species,
                    column: Some(view.column),
                    top: view.top,
                    unavailable: None,
                },
                Err(reason) => RegionalSummary {
                    species,
                    column: None,
                    top: Vec::new(),
                    unavailable: Some(reason.to_string()),
                },
            })
            .collect();

        Self {
            path: dataset.path.clone(),
            encoding: dataset.encoding.name(),
            rows: dataset.row_count(),
            columns: dataset.columns().len(),
            catalog: dataset.catalog().entries(),
            absent_canonical: dataset.absent_canonical().to_vec(),
            overview: overview(dataset),
            regional: rankings,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tests::sample_dataset;

    #[test]
    fn test_report_covers_every_species() {
        let report = Report::build(&sample_dataset(), 1);
        assert_eq!(report.regional.len(), 8);
        assert_eq!(report.rows, 4);

        let beef = &report.regional[0];
        assert_eq!(beef.top.len(), 1);
        assert!(beef.unavailable.is_none());

        let sheep = &report.regional[7];
        assert!(sheep.top.is_empty());
        assert!(sheep.unavailable.is_some());
    }

    #[test]
    fn test_report_serializes() -> anyhow::Result<()> {
        let json = Report::build(&sample_dataset(), 3).to_json()?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["overview"]["grand_total"], 7400.0);
        assert_eq!(value["regional"][0]["species"], "beef_cattle");
        assert_eq!(value["overview"]["shares"][0]["species"], "beef_cattle");
        Ok(())
    }
}
