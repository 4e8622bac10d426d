//! Service package catalog

use chatbot_core::Package;
use serde::{Deserialize, Serialize};

/// One sellable package tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSpec {
    pub package: Package,
    pub display_name: String,
    /// One-time price in dollars
    pub price: u32,
    pub features: Vec<String>,
}

impl PackageSpec {
    pub fn essential() -> Self {
        Self {
            package: Package::Essential,
            display_name: "Essential".to_string(),
            price: 2000,
            features: vec![
                "5-page website".to_string(),
                "Mobile-responsive".to_string(),
                "Contact form".to_string(),
                "Google Maps".to_string(),
                "Basic SEO".to_string(),
            ],
        }
    }

    pub fn professional() -> Self {
        Self {
            package: Package::Professional,
            display_name: "Professional".to_string(),
            price: 5000,
            features: vec![
                "Everything in Essential".to_string(),
                "AI chatbot".to_string(),
                "Custom design".to_string(),
                "Advanced SEO".to_string(),
                "Instagram feed".to_string(),
                "Reviews display".to_string(),
            ],
        }
    }

    pub fn premium() -> Self {
        Self {
            package: Package::Premium,
            display_name: "Premium".to_string(),
            price: 8000,
            features: vec![
                "Everything in Professional".to_string(),
                "Online ordering/booking".to_string(),
                "Customer accounts".to_string(),
                "Admin dashboard".to_string(),
                "Email automation".to_string(),
                "Loyalty program".to_string(),
            ],
        }
    }
}

/// All three package tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageCatalog {
    #[serde(default = "PackageSpec::essential")]
    pub essential: PackageSpec,
    #[serde(default = "PackageSpec::professional")]
    pub professional: PackageSpec,
    #[serde(default = "PackageSpec::premium")]
    pub premium: PackageSpec,
}

impl Default for PackageCatalog {
    fn default() -> Self {
        Self {
            essential: PackageSpec::essential(),
            professional: PackageSpec::professional(),
            premium: PackageSpec::premium(),
        }
    }
}

impl PackageCatalog {
    pub fn spec(&self, package: Package) -> &PackageSpec {
        match package {
            Package::Essential => &self.essential,
            Package::Professional => &self.professional,
            Package::Premium => &self.premium,
        }
    }

    pub fn price(&self, package: Package) -> u32 {
        self.spec(package).price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prices() {
        let catalog = PackageCatalog::default();
        assert_eq!(catalog.price(Package::Essential), 2000);
        assert_eq!(catalog.price(Package::Professional), 5000);
        assert_eq!(catalog.price(Package::Premium), 8000);
    }

    #[test]
    fn test_tiers_are_priced_in_order() {
        let catalog = PackageCatalog::default();
        assert!(catalog.essential.price < catalog.professional.price);
        assert!(catalog.professional.price < catalog.premium.price);
    }
}
