//! Service packages and recommendation result types

use serde::{Deserialize, Serialize};

/// The three fixed service tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Package {
    Essential,
    Professional,
    Premium,
}

impl Package {
    pub const ALL: [Package; 3] = [Package::Essential, Package::Professional, Package::Premium];

    /// Next tier up, if any
    pub fn upsell(&self) -> Option<Package> {
        match self {
            Package::Essential => Some(Package::Professional),
            Package::Professional => Some(Package::Premium),
            Package::Premium => None,
        }
    }

    /// Next tier down, if any
    pub fn downsell(&self) -> Option<Package> {
        match self {
            Package::Premium => Some(Package::Professional),
            Package::Professional => Some(Package::Essential),
            Package::Essential => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Package::Essential => "essential",
            Package::Professional => "professional",
            Package::Premium => "premium",
        }
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Estimated return on investment for a package in the visitor's industry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiEstimate {
    /// One-time package price in dollars
    pub package_price: u32,
    /// Expected monthly revenue impact in dollars
    pub monthly_revenue: u32,
    /// `monthly_revenue * 12`
    pub first_year_revenue: u32,
    /// Months until revenue covers the price (rounded up)
    pub payback_months: u32,
    /// First-year ROI percentage, rounded
    pub first_year_roi_percent: i32,
    /// First-year revenue divided by price
    pub roi_multiple: f32,
    /// Headline metric, e.g. "in online ordering revenue"
    pub metric: String,
    /// Headline metric value, e.g. "$4,500"
    pub metric_value: String,
    /// One-line explanation
    pub description: String,
}

/// Package recommendation for one visitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub package: Package,
    /// Data-completeness confidence in [0, 1] (not rule-path certainty)
    pub confidence: f32,
    /// Human-readable justification
    pub reasoning: String,
    pub roi: RoiEstimate,
}
