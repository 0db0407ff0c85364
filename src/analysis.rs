//! Pasusat - Dashboard views
//!
//! Each analysis type turns the prepared dataset and the current selection
//! into a [`View`]. Column misses become [`View::Unavailable`]; nothing here
//! can fail the session.

use serde::Serialize;

use crate::aggregate::{top_n, Point, RegionTotal, SpeciesTotal};
use crate::data::Dataset;
use crate::error::ColumnNotFound;
use crate::species::{Metric, Species};

/// Analysis types offered in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisType {
    Overview,
    Regional,
    Comparative,
    FarmerCorrelation,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 4] = [
        AnalysisType::Overview,
        AnalysisType::Regional,
        AnalysisType::Comparative,
        AnalysisType::FarmerCorrelation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisType::Overview => "Overview of Livestock Types",
            AnalysisType::Regional => "Regional Livestock Distribution",
            AnalysisType::Comparative => "Comparative Livestock Analysis",
            AnalysisType::FarmerCorrelation => "Farmers and Livestock Correlation",
        }
    }

    pub fn index(&self) -> usize {
        AnalysisType::ALL
            .iter()
            .position(|a| a == self)
            .unwrap_or_default()
    }

    pub fn next(&self) -> Self {
        AnalysisType::ALL[(self.index() + 1) % AnalysisType::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let len = AnalysisType::ALL.len();
        AnalysisType::ALL[(self.index() + len - 1) % len]
    }

    /// Whether the view uses the second species selector
    pub fn uses_secondary(&self) -> bool {
        matches!(self, AnalysisType::Comparative)
    }

    /// Whether the view uses any species selector
    pub fn uses_species(&self) -> bool {
        !matches!(self, AnalysisType::Overview)
    }
}

/// What the user has picked in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub analysis: AnalysisType,
    pub primary: Species,
    pub secondary: Species,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            analysis: AnalysisType::Overview,
            primary: Species::BeefCattle,
            secondary: Species::DairyCattle,
        }
    }
}

/// Share of the national head count held by one species
#[derive(Debug, Clone, Serialize)]
pub struct Share {
    #[serde(flatten)]
    pub total: SpeciesTotal,
    /// Fraction of the grand total, 0.0 when the grand total is zero
    pub share: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewView {
    pub shares: Vec<Share>,
    pub grand_total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionalView {
    pub species: Species,
    pub column: String,
    pub ranking: Vec<RegionTotal>,
    pub top: Vec<RegionTotal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterView {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<Point>,
}

/// A rendered-ready view
#[derive(Debug, Clone)]
pub enum View {
    Overview(OverviewView),
    Regional(RegionalView),
    Comparative(ScatterView),
    Correlation(ScatterView),
    /// The selection needs a column the table does not have
    Unavailable(ColumnNotFound),
}

/// Build the view for a selection
pub fn build_view(dataset: &Dataset, selection: &Selection, top: usize) -> View {
    let result = match selection.analysis {
        AnalysisType::Overview => Ok(View::Overview(overview(dataset))),
        AnalysisType::Regional => regional(dataset, selection.primary, top).map(View::Regional),
        AnalysisType::Comparative => {
            comparative(dataset, selection.primary, selection.secondary).map(View::Comparative)
        }
        AnalysisType::FarmerCorrelation => {
            farmer_correlation(dataset, selection.primary).map(View::Correlation)
        }
    };
    result.unwrap_or_else(View::Unavailable)
}

pub fn overview(dataset: &Dataset) -> OverviewView {
    let totals = dataset.species_totals();
    let grand_total: f64 = totals.iter().map(|t| t.total).sum();

    let shares = totals
        .into_iter()
        .map(|total| {
            let share = if grand_total > 0.0 {
                total.total / grand_total
            } else {
                0.0
            };
            Share { total, share }
        })
        .collect();

    OverviewView {
        shares,
        grand_total,
    }
}

pub fn regional(
    dataset: &Dataset,
    species: Species,
    top: usize,
) -> Result<RegionalView, ColumnNotFound> {
    let column = dataset.catalog().require(species, Metric::Total)?;
    let ranking = dataset.aggregate_by_region(column)?;

    Ok(RegionalView {
        species,
        column: column.to_string(),
        top: top_n(&ranking, top).to_vec(),
        ranking,
    })
}

pub fn comparative(
    dataset: &Dataset,
    first: Species,
    second: Species,
) -> Result<ScatterView, ColumnNotFound> {
    let catalog = dataset.catalog();
    let x_label = catalog.require(first, Metric::Total)?;
    let y_label = catalog.require(second, Metric::Total)?;

    Ok(ScatterView {
        title: format!("{} vs {}", first.label(), second.label()),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        points: dataset.paired_points(x_label, y_label)?,
    })
}

pub fn farmer_correlation(dataset: &Dataset, species: Species) -> Result<ScatterView, ColumnNotFound> {
    let catalog = dataset.catalog();
    let total = catalog.require(species, Metric::Total)?;
    let farmers = catalog.require(species, Metric::Farmer)?;

    Ok(ScatterView {
        title: format!("Farmers vs {} population", species.label()),
        x_label: farmers.to_string(),
        y_label: total.to_string(),
        points: dataset.paired_points(farmers, total)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tests::sample_dataset;

    fn select(analysis: AnalysisType, primary: Species, secondary: Species) -> Selection {
        Selection {
            analysis,
            primary,
            secondary,
        }
    }

    #[test]
    fn test_overview_shares_sum_to_one() {
        let view = overview(&sample_dataset());
        assert_eq!(view.grand_total, 7400.0);
        let sum: f64 = view.shares.iter().map(|s| s.share).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_regional_top_is_prefix_of_ranking() {
        let view = regional(&sample_dataset(), Species::BeefCattle, 2).unwrap();
        assert_eq!(view.ranking.len(), 3);
        assert_eq!(view.top, view.ranking[..2].to_vec());
        assert_eq!(view.top[0].region, "ขอนแก่น");
    }

    #[test]
    fn test_unresolved_species_is_unavailable() {
        let dataset = sample_dataset();
        let selection = select(AnalysisType::Regional, Species::Sheep, Species::Goat);
        match build_view(&dataset, &selection, 10) {
            View::Unavailable(ColumnNotFound::Category { species, metric }) => {
                assert_eq!(species, Species::Sheep);
                assert_eq!(metric, Metric::Total);
            }
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_comparative_scatter() {
        let dataset = sample_dataset();
        let selection = select(
            AnalysisType::Comparative,
            Species::BeefCattle,
            Species::DairyCattle,
        );
        match build_view(&dataset, &selection, 10) {
            View::Comparative(scatter) => assert_eq!(scatter.points.len(), 2),
            other => panic!("expected Comparative, got {:?}", other),
        }
    }

    #[test]
    fn test_farmer_correlation_uses_farmer_axis() {
        let view = farmer_correlation(&sample_dataset(), Species::BeefCattle).unwrap();
        assert_eq!(view.x_label, "จำนวนเกษตรกรผู้เลี้ยง โคเนื้อ (ราย)");
        assert_eq!(view.points.len(), 3);
        assert_eq!(view.points[0].x, 120.0);
        assert_eq!(view.points[0].y, 1500.0);
    }

    #[test]
    fn test_correlation_without_farmer_column_is_unavailable() {
        let dataset = sample_dataset();
        let selection = select(
            AnalysisType::FarmerCorrelation,
            Species::DairyCattle,
            Species::BeefCattle,
        );
        assert!(matches!(
            build_view(&dataset, &selection, 10),
            View::Unavailable(ColumnNotFound::Category {
                metric: Metric::Farmer,
                ..
            })
        ));
    }

    #[test]
    fn test_analysis_cycle() {
        assert_eq!(AnalysisType::FarmerCorrelation.next(), AnalysisType::Overview);
        assert_eq!(AnalysisType::Overview.prev(), AnalysisType::FarmerCorrelation);
    }
}
