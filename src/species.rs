//! Pasusat - Livestock categories and count metrics
//!
//! The census header carries Thai labels such as
//! `จำนวนรวม โคเนื้อ ทั้งสิ้น (ตัว)`. A column belongs to a species when its
//! label contains the species token, and to a metric when it contains both
//! the metric keyword and the unit keyword.

use serde::Serialize;

/// The eight livestock categories reported by the census
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    BeefCattle,
    DairyCattle,
    Buffalo,
    Swine,
    Chicken,
    Duck,
    Goat,
    Sheep,
}

impl Species {
    /// All species in menu order
    pub const ALL: [Species; 8] = [
        Species::BeefCattle,
        Species::DairyCattle,
        Species::Buffalo,
        Species::Swine,
        Species::Chicken,
        Species::Duck,
        Species::Goat,
        Species::Sheep,
    ];

    /// Thai token used to match column labels
    pub fn token(&self) -> &'static str {
        match self {
            Species::BeefCattle => "โคเนื้อ",
            Species::DairyCattle => "โคนม",
            Species::Buffalo => "กระบือ",
            Species::Swine => "สุกร",
            Species::Chicken => "ไก่",
            Species::Duck => "เป็ด",
            Species::Goat => "แพะ",
            Species::Sheep => "แกะ",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Species::BeefCattle => "Beef cattle",
            Species::DairyCattle => "Dairy cattle",
            Species::Buffalo => "Buffalo",
            Species::Swine => "Swine",
            Species::Chicken => "Chicken",
            Species::Duck => "Duck",
            Species::Goat => "Goat",
            Species::Sheep => "Sheep",
        }
    }

    /// Header label of the census' own head-count column for this species
    pub fn canonical_total_label(&self) -> String {
        format!("จำนวนรวม {} ทั้งสิ้น (ตัว)", self.token())
    }

    pub fn next(&self) -> Species {
        let idx = self.index();
        Species::ALL[(idx + 1) % Species::ALL.len()]
    }

    pub fn prev(&self) -> Species {
        let idx = self.index();
        Species::ALL[(idx + Species::ALL.len() - 1) % Species::ALL.len()]
    }

    fn index(&self) -> usize {
        Species::ALL
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }
}

/// Which count a column reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Total head count
    Total,
    /// Number of registered farmer households
    Farmer,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Total, Metric::Farmer];

    pub fn keyword(&self) -> &'static str {
        match self {
            Metric::Total => "รวม",
            Metric::Farmer => "เกษตรกร",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Total => "ตัว",
            Metric::Farmer => "ราย",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Total => "head count",
            Metric::Farmer => "farmer count",
        }
    }

    /// Whether a header label reports this metric for `species`
    pub fn matches(&self, label: &str, species: Species) -> bool {
        label.contains(species.token())
            && label.contains(self.keyword())
            && label.contains(self.unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_label_matches_total() {
        for species in Species::ALL {
            let label = species.canonical_total_label();
            assert!(Metric::Total.matches(&label, species), "{}", label);
            assert!(!Metric::Farmer.matches(&label, species), "{}", label);
        }
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Species::Sheep.next(), Species::BeefCattle);
        assert_eq!(Species::BeefCattle.prev(), Species::Sheep);
        assert_eq!(Species::Swine.next().prev(), Species::Swine);
    }

    #[test]
    fn test_dairy_token_does_not_match_beef() {
        let label = "จำนวนรวม โคนม ทั้งสิ้น (ตัว)";
        assert!(Metric::Total.matches(label, Species::DairyCattle));
        assert!(!Metric::Total.matches(label, Species::BeefCattle));
    }
}
