//! Pasusat - Column catalog
//!
//! Resolves every (species, metric) pair against the header once, at load
//! time. Views look columns up here instead of scanning labels themselves.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::ColumnNotFound;
use crate::species::{Metric, Species};

/// Return the first header label that reports `metric` for `species`.
pub fn resolve_column<'a, S: AsRef<str>>(
    headers: &'a [S],
    species: Species,
    metric: Metric,
) -> Option<&'a str> {
    headers
        .iter()
        .map(|h| h.as_ref())
        .find(|label| metric.matches(label, species))
}

/// One catalog entry, as exposed in the headless report
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub species: Species,
    pub metric: Metric,
    pub column: Option<String>,
}

/// Explicit (species, metric) → column label mapping
#[derive(Debug, Clone, Default)]
pub struct ColumnCatalog {
    columns: BTreeMap<(Species, Metric), String>,
}

impl ColumnCatalog {
    /// Build the catalog from normalized header labels
    pub fn build<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut columns = BTreeMap::new();

        for species in Species::ALL {
            for metric in Metric::ALL {
                match resolve_column(headers, species, metric) {
                    Some(label) => {
                        debug!("{} {} → {}", species.label(), metric.label(), label);
                        columns.insert((species, metric), label.to_string());
                    }
                    None => {
                        warn!("No {} column for {}", metric.label(), species.label());
                    }
                }
            }
        }

        Self { columns }
    }

    /// Look up the column for a species and metric
    pub fn resolve(&self, species: Species, metric: Metric) -> Option<&str> {
        self.columns.get(&(species, metric)).map(String::as_str)
    }

    /// Like [`resolve`](Self::resolve), but with a typed miss for views
    pub fn require(&self, species: Species, metric: Metric) -> Result<&str, ColumnNotFound> {
        self.resolve(species, metric)
            .ok_or(ColumnNotFound::Category { species, metric })
    }

    /// Pairs that did not resolve against the header
    pub fn missing(&self) -> Vec<(Species, Metric)> {
        Species::ALL
            .iter()
            .flat_map(|&s| Metric::ALL.iter().map(move |&m| (s, m)))
            .filter(|key| !self.columns.contains_key(key))
            .collect()
    }

    /// Every resolved column label, in catalog order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.values().map(String::as_str)
    }

    pub fn entries(&self) -> Vec<CatalogEntry> {
        Species::ALL
            .iter()
            .flat_map(|&s| Metric::ALL.iter().map(move |&m| (s, m)))
            .map(|(species, metric)| CatalogEntry {
                species,
                metric,
                column: self.resolve(species, metric).map(str::to_string),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn census_headers() -> Vec<String> {
        let mut headers = vec!["ลำดับ".to_string(), "สถานที่เลี้ยงสัตว์ จังหวัด".to_string()];
        for species in Species::ALL {
            headers.push(format!("จำนวนเกษตรกรผู้เลี้ยง {} (ราย)", species.token()));
            headers.push(species.canonical_total_label());
        }
        headers
    }

    #[test]
    fn test_every_species_resolves_total() {
        let headers = census_headers();
        for species in Species::ALL {
            let label = resolve_column(&headers, species, Metric::Total).unwrap();
            assert!(label.contains(species.token()), "{} → {}", species.label(), label);
            assert_eq!(label, species.canonical_total_label());
        }
    }

    #[test]
    fn test_farmer_column_resolves() {
        let headers = census_headers();
        let label = resolve_column(&headers, Species::Goat, Metric::Farmer).unwrap();
        assert_eq!(label, "จำนวนเกษตรกรผู้เลี้ยง แพะ (ราย)");
    }

    #[test]
    fn test_first_match_wins() {
        let headers = vec![
            "จำนวนรวม ไก่ไข่ (ตัว)".to_string(),
            "จำนวนรวม ไก่ ทั้งสิ้น (ตัว)".to_string(),
        ];
        assert_eq!(
            resolve_column(&headers, Species::Chicken, Metric::Total),
            Some("จำนวนรวม ไก่ไข่ (ตัว)")
        );
    }

    #[test]
    fn test_resolution_miss_is_not_an_error() {
        let headers = vec!["จำนวนรวม โคเนื้อ ทั้งสิ้น (ตัว)".to_string()];
        let catalog = ColumnCatalog::build(&headers);

        assert!(catalog.resolve(Species::BeefCattle, Metric::Total).is_some());
        assert!(catalog.resolve(Species::BeefCattle, Metric::Farmer).is_none());
        assert_eq!(
            catalog.require(Species::Sheep, Metric::Total),
            Err(ColumnNotFound::Category {
                species: Species::Sheep,
                metric: Metric::Total
            })
        );
        assert_eq!(catalog.missing().len(), 15);
    }

    #[test]
    fn test_full_header_has_nothing_missing() {
        let catalog = ColumnCatalog::build(&census_headers());
        assert!(catalog.missing().is_empty());
        assert_eq!(catalog.labels().count(), 16);
        assert_eq!(catalog.entries().len(), 16);
    }
}
