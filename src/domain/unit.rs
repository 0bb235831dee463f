use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Catalog entry for an apartment layout such as `2+1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitType {
    pub code: String,
    pub min_net_area: f64,
    pub typical_net_area: f64,
    pub max_net_area: f64,
    /// Gross area per m² of net area (walls, shafts, shared corridors).
    pub net_to_gross_multiplier: f64,
    /// Indicative sales price per m² of gross area.
    pub price_per_area: f64,
}

impl UnitType {
    pub fn new(
        code: impl Into<String>,
        (min_net_area, typical_net_area, max_net_area): (f64, f64, f64),
        net_to_gross_multiplier: f64,
        price_per_area: f64,
    ) -> Self {
        Self {
            code: code.into(),
            min_net_area,
            typical_net_area,
            max_net_area,
            net_to_gross_multiplier,
            price_per_area,
        }
    }
}

/// Layouts commonly offered in Turkish residential projects.
pub fn standard_catalog() -> Vec<UnitType> {
    vec![
        UnitType::new("1+0", (28.0, 35.0, 45.0), 1.30, 42_000.0),
        UnitType::new("1+1", (45.0, 55.0, 70.0), 1.25, 40_000.0),
        UnitType::new("2+1", (75.0, 90.0, 110.0), 1.22, 38_000.0),
        UnitType::new("3+1", (110.0, 125.0, 150.0), 1.20, 36_000.0),
        UnitType::new("4+1", (150.0, 170.0, 200.0), 1.18, 37_000.0),
        UnitType::new("5+1", (200.0, 230.0, 280.0), 1.15, 40_000.0),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStrategy {
    #[default]
    Ratio,
    OptimizeRevenue,
}

/// Caller-supplied shape of the unit mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitMixConfig {
    /// Relative share of usable area per unit code. Need not sum to 1.
    pub ratios: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub preferred_sizes: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub min_units: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub max_units: BTreeMap<String, u32>,
    /// Price per gross m² overrides taken from a pricing snapshot.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub price_overrides: BTreeMap<String, f64>,
    #[serde(default)]
    pub strategy: AllocationStrategy,
}

impl UnitMixConfig {
    pub fn from_ratios<I, S>(ratios: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            ratios: ratios
                .into_iter()
                .map(|(code, ratio)| (code.into(), ratio))
                .collect(),
            preferred_sizes: BTreeMap::new(),
            min_units: BTreeMap::new(),
            max_units: BTreeMap::new(),
            price_overrides: BTreeMap::new(),
            strategy: AllocationStrategy::Ratio,
        }
    }

    /// Same overrides and bounds, different target ratios.
    pub fn with_ratios(&self, ratios: &[(&str, f64)]) -> Self {
        let mut next = self.clone();
        next.ratios = ratios
            .iter()
            .map(|(code, ratio)| (code.to_string(), *ratio))
            .collect();
        next
    }
}

impl Default for UnitMixConfig {
    fn default() -> Self {
        Self::from_ratios([("1+1", 0.25), ("2+1", 0.40), ("3+1", 0.30), ("4+1", 0.05)])
    }
}

/// Global bounds and warning thresholds for the allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitMixRules {
    pub min_units_per_type: u32,
    pub max_units_per_type: u32,
    pub min_total_units: u32,
    pub min_distinct_types: usize,
    pub low_utilization_threshold: f64,
    /// Utilization a template must exceed to be considered during optimization.
    pub optimization_utilization_floor: f64,
    pub leftover_area_threshold: f64,
}

impl Default for UnitMixRules {
    fn default() -> Self {
        Self {
            min_units_per_type: 1,
            max_units_per_type: 200,
            min_total_units: 4,
            min_distinct_types: 2,
            low_utilization_threshold: 0.80,
            optimization_utilization_floor: 0.75,
            leftover_area_threshold: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitAllocation {
    pub code: String,
    pub net_area: f64,
    pub gross_area: f64,
    pub price_per_area: f64,
    pub unit_price: f64,
    pub count: u32,
}

impl UnitAllocation {
    pub fn total_net_area(&self) -> f64 {
        self.net_area * self.count as f64
    }

    pub fn total_gross_area(&self) -> f64 {
        self.gross_area * self.count as f64
    }

    pub fn revenue(&self) -> f64 {
        self.unit_price * self.count as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitMixWarning {
    LowUtilization { utilization: f64 },
    LowDiversity { distinct_types: usize },
    UneconomicalScale { total_units: u32, minimum: u32 },
    UnallocatedArea { area: f64 },
}

impl UnitMixWarning {
    pub fn message(&self) -> String {
        match self {
            UnitMixWarning::LowUtilization { utilization } => format!(
                "Only {:.1}% of usable area is allocated; increase unit count",
                utilization * 100.0
            ),
            UnitMixWarning::LowDiversity { distinct_types } => {
                format!("Low diversity: {} unit type(s) in the mix", distinct_types)
            }
            UnitMixWarning::UneconomicalScale {
                total_units,
                minimum,
            } => format!(
                "Uneconomical scale: {} unit(s), at least {} recommended",
                total_units, minimum
            ),
            UnitMixWarning::UnallocatedArea { area } => {
                format!("{:.1} m² of usable area left unallocated", area)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitMixResult {
    /// Name of the ratio template the mix came from; `custom` for caller ratios.
    pub strategy: String,
    pub allocations: Vec<UnitAllocation>,
    pub available_net_area: f64,
    pub total_units: u32,
    pub total_net_area: f64,
    pub total_gross_area: f64,
    pub total_revenue: f64,
    pub average_unit_size: f64,
    pub average_unit_price: f64,
    pub utilization: f64,
    pub diversity: usize,
    pub leftover_area: f64,
    pub warnings: Vec<UnitMixWarning>,
}

impl UnitMixResult {
    pub fn allocation(&self, code: &str) -> Option<&UnitAllocation> {
        self.allocations.iter().find(|row| row.code == code)
    }

    /// Revenue-weighted average price per gross m².
    pub fn average_price_per_area(&self) -> f64 {
        if self.total_gross_area > 0.0 {
            self.total_revenue / self.total_gross_area
        } else {
            0.0
        }
    }
}
