//! Per-industry, per-package ROI reference tables

use chatbot_core::{BusinessType, Package};
use serde::{Deserialize, Serialize};

/// Expected revenue impact of one package in one industry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiEntry {
    /// Expected monthly revenue impact in dollars
    pub monthly_revenue: u32,
    /// Headline metric, e.g. "in online ordering revenue"
    pub metric: String,
    /// Headline metric value, e.g. "$4,500"
    pub metric_value: String,
    /// One-line explanation
    pub description: String,
}

impl RoiEntry {
    fn new(monthly_revenue: u32, metric: &str, metric_value: &str, description: &str) -> Self {
        Self {
            monthly_revenue,
            metric: metric.to_string(),
            metric_value: metric_value.to_string(),
            description: description.to_string(),
        }
    }
}

/// ROI rows for the three packages in one industry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryRoi {
    pub essential: RoiEntry,
    pub professional: RoiEntry,
    pub premium: RoiEntry,
}

impl IndustryRoi {
    pub fn entry(&self, package: Package) -> &RoiEntry {
        match package {
            Package::Essential => &self.essential,
            Package::Professional => &self.professional,
            Package::Premium => &self.premium,
        }
    }
}

/// The full ROI table.
///
/// Restaurant doubles as the fallback when the business type is unknown or
/// has no row of its own (spa, retail, other).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiTables {
    #[serde(default = "default_restaurant")]
    pub restaurant: IndustryRoi,
    #[serde(default = "default_salon")]
    pub salon: IndustryRoi,
    #[serde(default = "default_fitness")]
    pub fitness: IndustryRoi,
    #[serde(default = "default_cafe")]
    pub cafe: IndustryRoi,
    #[serde(default = "default_bar")]
    pub bar: IndustryRoi,
}

impl Default for RoiTables {
    fn default() -> Self {
        Self {
            restaurant: default_restaurant(),
            salon: default_salon(),
            fitness: default_fitness(),
            cafe: default_cafe(),
            bar: default_bar(),
        }
    }
}

impl RoiTables {
    /// Look up the ROI row for a business type and package, falling back to
    /// the restaurant table for unrecognized industries.
    pub fn lookup(&self, business_type: Option<BusinessType>, package: Package) -> &RoiEntry {
        let industry = match business_type {
            Some(BusinessType::Restaurant) => &self.restaurant,
            Some(BusinessType::Salon) => &self.salon,
            Some(BusinessType::Fitness) => &self.fitness,
            Some(BusinessType::Cafe) => &self.cafe,
            Some(BusinessType::Bar) => &self.bar,
            _ => &self.restaurant,
        };
        industry.entry(package)
    }
}

fn default_restaurant() -> IndustryRoi {
    IndustryRoi {
        essential: RoiEntry::new(
            1200,
            "extra orders per month",
            "15-20",
            "Online presence drives new customers",
        ),
        professional: RoiEntry::new(
            4500,
            "in online ordering revenue",
            "$4,500",
            "Online ordering averages $4,500/month for restaurants",
        ),
        premium: RoiEntry::new(
            7500,
            "in combined ordering + catering",
            "$7,500",
            "Full system captures online orders, catering, and reservations",
        ),
    }
}

fn default_salon() -> IndustryRoi {
    IndustryRoi {
        essential: RoiEntry::new(
            800,
            "new client bookings",
            "10-15",
            "Online presence attracts new clients",
        ),
        professional: RoiEntry::new(
            2400,
            "more bookings per month",
            "40%",
            "Online booking increases appointment conversion by 40%",
        ),
        premium: RoiEntry::new(
            4200,
            "increase in bookings + retention",
            "60%",
            "Full booking system + email automation drives retention",
        ),
    }
}

fn default_fitness() -> IndustryRoi {
    IndustryRoi {
        essential: RoiEntry::new(
            900,
            "new member signups",
            "5-8",
            "Professional site drives membership growth",
        ),
        professional: RoiEntry::new(
            3200,
            "member retention improvement",
            "34%",
            "Member portal increases retention by 34%",
        ),
        premium: RoiEntry::new(
            5500,
            "combined new members + retention",
            "$5,500",
            "Full system drives growth and prevents churn",
        ),
    }
}

fn default_cafe() -> IndustryRoi {
    IndustryRoi {
        essential: RoiEntry::new(
            1000,
            "new customers",
            "20-30",
            "Online presence brings foot traffic",
        ),
        professional: RoiEntry::new(
            3500,
            "in online orders",
            "$3,500",
            "Online ordering for pickup/delivery",
        ),
        premium: RoiEntry::new(
            5800,
            "total online revenue",
            "$5,800",
            "Full ordering + catering system",
        ),
    }
}

fn default_bar() -> IndustryRoi {
    IndustryRoi {
        essential: RoiEntry::new(
            700,
            "event bookings",
            "8-12",
            "Online presence drives event inquiries",
        ),
        professional: RoiEntry::new(
            2200,
            "private event revenue",
            "$2,200",
            "Event booking system captures private parties",
        ),
        premium: RoiEntry::new(
            4000,
            "total event revenue",
            "$4,000",
            "Full event + reservation system",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_industry() {
        let tables = RoiTables::default();
        let entry = tables.lookup(Some(BusinessType::Salon), Package::Professional);
        assert_eq!(entry.monthly_revenue, 2400);
    }

    #[test]
    fn test_unknown_industry_falls_back_to_restaurant() {
        let tables = RoiTables::default();
        let entry = tables.lookup(None, Package::Premium);
        assert_eq!(entry.monthly_revenue, 7500);

        let retail = tables.lookup(Some(BusinessType::Retail), Package::Essential);
        assert_eq!(retail.monthly_revenue, 1200);
    }

    #[test]
    fn test_spa_has_no_row_of_its_own() {
        let tables = RoiTables::default();
        let entry = tables.lookup(Some(BusinessType::Spa), Package::Premium);
        assert_eq!(entry.monthly_revenue, 7500);
    }
}
