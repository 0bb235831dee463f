use serde::{Deserialize, Serialize};

pub const TYPICAL_FLOOR_HEIGHT_M: f64 = 3.0;
pub const DEFAULT_NET_TO_GROSS_RATIO: f64 = 0.85;
pub const DEFAULT_EXEMPT_AREA_RATIO: f64 = 0.30;
pub const DEFAULT_PROJECTION_COEFFICIENT: f64 = 1.0;
pub const DEFAULT_MAX_KAKS: f64 = 10.0;

fn default_projection_coefficient() -> f64 {
    DEFAULT_PROJECTION_COEFFICIENT
}

/// Parcel area and zoning coefficients as entered by the user or a municipal lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoningParams {
    /// Parcel area in m².
    pub parcel_area: f64,
    /// Building coverage ratio (TAKS).
    pub taks: f64,
    /// Floor-area ratio (KAKS / EMSAL).
    pub kaks: f64,
    /// Balcony and bay-window multiplier (çıkma katsayısı).
    #[serde(default = "default_projection_coefficient")]
    pub projection_coefficient: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_floors: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_to_gross_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exempt_area_ratio: Option<f64>,
}

impl ZoningParams {
    pub fn new(parcel_area: f64, taks: f64, kaks: f64) -> Self {
        Self {
            parcel_area,
            taks,
            kaks,
            projection_coefficient: DEFAULT_PROJECTION_COEFFICIENT,
            max_height: None,
            max_floors: None,
            net_to_gross_ratio: None,
            exempt_area_ratio: None,
        }
    }

    pub fn with_projection(mut self, coefficient: f64) -> Self {
        self.projection_coefficient = coefficient;
        self
    }

    pub fn with_max_height(mut self, meters: f64) -> Self {
        self.max_height = Some(meters);
        self
    }

    pub fn with_max_floors(mut self, floors: u32) -> Self {
        self.max_floors = Some(floors);
        self
    }
}

/// Tunable constants used by the zoning transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoningRules {
    pub typical_floor_height: f64,
    /// Sanity ceiling above which a KAKS value is treated as a data-entry error.
    pub max_kaks: f64,
    pub default_net_to_gross_ratio: f64,
    pub default_exempt_area_ratio: f64,
}

impl Default for ZoningRules {
    fn default() -> Self {
        Self {
            typical_floor_height: TYPICAL_FLOOR_HEIGHT_M,
            max_kaks: DEFAULT_MAX_KAKS,
            default_net_to_gross_ratio: DEFAULT_NET_TO_GROSS_RATIO,
            default_exempt_area_ratio: DEFAULT_EXEMPT_AREA_RATIO,
        }
    }
}

/// Coefficients actually used by a calculation, after defaults were filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedCoefficients {
    pub taks: f64,
    pub kaks: f64,
    pub projection_coefficient: f64,
    pub net_to_gross_ratio: f64,
    pub exempt_area_ratio: f64,
    pub typical_floor_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoningResult {
    pub parcel_area: f64,
    pub ground_coverage_area: f64,
    pub total_construction_area: f64,
    pub floor_count: u32,
    /// Floors permitted by KAKS ÷ TAKS alone.
    pub floors_by_kaks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floors_by_height: Option<u32>,
    pub height_limited: bool,
    pub floor_limited: bool,
    pub exempt_area_ceiling: f64,
    pub gross_usable_area: f64,
    pub net_usable_area: f64,
    pub applied: AppliedCoefficients,
}

impl ZoningResult {
    /// True when a height or explicit floor cap reduced the KAKS-derived floor count.
    pub fn is_constrained(&self) -> bool {
        self.height_limited || self.floor_limited
    }
}
