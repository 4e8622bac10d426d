//! Package recommendation
//!
//! A strictly ordered decision tree over the profile and lead score, plus
//! ROI lookup, package comparison, upsell/downsell, and feature matching.
//! Rule order is a documented contract: budget rules outrank every
//! feature- or industry-specific rule below them.

use chatbot_config::{PackageCatalog, PackageSpec, RoiTables};
use chatbot_core::{
    BudgetRange, BusinessType, ConversationProfile, FeatureTag, Package, Recommendation,
    RoiEstimate, TimelineUrgency,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One row of a full package comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageComparison {
    pub package: Package,
    pub display_name: String,
    pub price: u32,
    pub features: Vec<String>,
    pub roi: RoiEstimate,
    pub is_recommended: bool,
}

/// Upsell offer with incremental economics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsellOffer {
    pub package: Package,
    pub additional_cost: u32,
    pub additional_revenue: u32,
    pub additional_roi_percent: i32,
}

/// How well a package covers the requested features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatch {
    pub has_all: bool,
    pub missing: Vec<String>,
    pub match_percentage: u8,
}

/// The recommender
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    catalog: PackageCatalog,
    roi: RoiTables,
}

impl RecommendationEngine {
    pub fn new(catalog: PackageCatalog, roi: RoiTables) -> Self {
        Self { catalog, roi }
    }

    /// Recommend a package for the profile and lead score
    pub fn recommend(&self, profile: &ConversationProfile, lead_score: u8) -> Recommendation {
        let package = self.decision_tree(profile, lead_score);
        let confidence = self.confidence(profile);
        let reasoning = self.reasoning(profile, package);
        let roi = self.calculate_roi(profile.business_type, package);

        tracing::debug!(%package, confidence, "package recommended");

        Recommendation {
            package,
            confidence,
            reasoning,
            roi,
        }
    }

    /// First matching rule wins, top to bottom.
    fn decision_tree(&self, profile: &ConversationProfile, lead_score: u8) -> Package {
        let features = &profile.features_needed;
        let needs_ordering = features.contains(&FeatureTag::Ordering);
        let needs_booking = features.contains(&FeatureTag::Booking);
        let needs_ai = features.contains(&FeatureTag::Ai);
        let needs_ecommerce = features.contains(&FeatureTag::Ecommerce);

        // 1. Constrained budget pins the tier down.
        if matches!(
            profile.budget_range,
            Some(BudgetRange::Tight) | Some(BudgetRange::Essential)
        ) {
            return Package::Essential;
        }
        // 2. A premium or flexible budget pins it up.
        if matches!(
            profile.budget_range,
            Some(BudgetRange::Premium) | Some(BudgetRange::Flexible)
        ) {
            return Package::Premium;
        }
        // 3. Ordering plus booking needs the full system.
        if needs_ordering && needs_booking {
            return Package::Premium;
        }
        // 4. E-commerce needs the full system.
        if needs_ecommerce {
            return Package::Premium;
        }
        // 5. Restaurants wanting ordering or AI.
        if profile.business_type == Some(BusinessType::Restaurant) && (needs_ordering || needs_ai) {
            return Package::Professional;
        }
        // 6. Salons and spas wanting booking.
        if matches!(
            profile.business_type,
            Some(BusinessType::Salon) | Some(BusinessType::Spa)
        ) && needs_booking
        {
            return Package::Premium;
        }
        // 7. Fitness businesses with any feature need.
        if profile.business_type == Some(BusinessType::Fitness) && !features.is_empty() {
            return Package::Professional;
        }
        // 8. Urgent timeline with a professional-tier budget.
        if profile.timeline_urgency == Some(TimelineUrgency::Urgent)
            && profile.budget_range == Some(BudgetRange::Professional)
        {
            return Package::Professional;
        }
        // 9. Hot leads.
        if lead_score >= 70 {
            return Package::Professional;
        }
        // 10. Multiple features.
        if features.len() >= 2 {
            return Package::Professional;
        }
        // 11. Multiple pain points.
        if profile.pain_points.len() >= 3 {
            return Package::Professional;
        }
        // 12. Default.
        Package::Professional
    }

    /// Confidence reflects data completeness, not rule-path certainty.
    fn confidence(&self, profile: &ConversationProfile) -> f32 {
        let mut confidence: f32 = 0.5;
        if profile.business_type.is_some() {
            confidence += 0.1;
        }
        if profile.budget_range.is_some() {
            confidence += 0.15;
        }
        if !profile.features_needed.is_empty() {
            confidence += 0.1;
        }
        if profile.timeline_urgency.is_some() {
            confidence += 0.1;
        }
        if !profile.pain_points.is_empty() {
            confidence += 0.05;
        }
        confidence.min(1.0)
    }

    fn reasoning(&self, profile: &ConversationProfile, package: Package) -> String {
        let mut reasons: Vec<String> = Vec::new();
        let features = &profile.features_needed;

        match package {
            Package::Essential => {
                if matches!(
                    profile.budget_range,
                    Some(BudgetRange::Tight) | Some(BudgetRange::Essential)
                ) {
                    reasons.push("Budget-conscious choice".to_string());
                }
                reasons.push("Perfect starter package for your business".to_string());
            }
            Package::Professional => {
                if let Some(business_type) = profile.business_type {
                    reasons.push(format!("Ideal for {business_type} businesses"));
                }
                if features.contains(&FeatureTag::Ai) {
                    reasons.push("Includes AI chatbot you requested".to_string());
                }
                if features.contains(&FeatureTag::Ordering) {
                    reasons.push("Includes online ordering system".to_string());
                }
                if features.contains(&FeatureTag::Booking) {
                    reasons.push("Includes online booking system".to_string());
                }
                if profile.budget_range == Some(BudgetRange::Professional) {
                    reasons.push("Fits your budget range perfectly".to_string());
                }
                reasons.push(
                    "Our most popular package (78% of clients choose this)".to_string(),
                );
            }
            Package::Premium => {
                if matches!(
                    profile.budget_range,
                    Some(BudgetRange::Premium) | Some(BudgetRange::Flexible)
                ) {
                    reasons.push("You have the budget for our complete solution".to_string());
                }
                if features.len() >= 2 {
                    reasons.push("Includes all features you need".to_string());
                }
                if profile.business_type == Some(BusinessType::Salon) {
                    reasons.push("Salons see 40% more bookings with Premium".to_string());
                }
                if profile.business_type == Some(BusinessType::Restaurant) {
                    reasons.push(
                        "Restaurants generate $4,500+/month extra with Premium".to_string(),
                    );
                }
                reasons.push(
                    "All-inclusive solution - everything you need to succeed".to_string(),
                );
            }
        }

        reasons.join(". ")
    }

    /// ROI for a package in the visitor's industry
    pub fn calculate_roi(
        &self,
        business_type: Option<BusinessType>,
        package: Package,
    ) -> RoiEstimate {
        let price = self.catalog.price(package);
        let entry = self.roi.lookup(business_type, package);

        let monthly = entry.monthly_revenue;
        let first_year = monthly * 12;
        let payback_months = if monthly > 0 {
            price.div_ceil(monthly)
        } else {
            12
        };
        let first_year_roi_percent = if first_year > 0 {
            (((first_year as f64 - price as f64) / price as f64) * 100.0).round() as i32
        } else {
            0
        };
        let roi_multiple = if monthly > 0 {
            first_year as f32 / price as f32
        } else {
            0.0
        };

        RoiEstimate {
            package_price: price,
            monthly_revenue: monthly,
            first_year_revenue: first_year,
            payback_months,
            first_year_roi_percent,
            roi_multiple,
            metric: entry.metric.clone(),
            metric_value: entry.metric_value.clone(),
            description: entry.description.clone(),
        }
    }

    /// All three packages with ROI, flagging the recommended one
    pub fn compare_packages(
        &self,
        profile: &ConversationProfile,
        lead_score: u8,
    ) -> Vec<PackageComparison> {
        let recommended = self.decision_tree(profile, lead_score);
        Package::ALL
            .into_iter()
            .map(|package| {
                let spec = self.catalog.spec(package);
                PackageComparison {
                    package,
                    display_name: spec.display_name.clone(),
                    price: spec.price,
                    features: spec.features.clone(),
                    roi: self.calculate_roi(profile.business_type, package),
                    is_recommended: package == recommended,
                }
            })
            .collect()
    }

    /// The next tier up with its incremental economics, if any
    pub fn upsell(&self, current: Package, profile: &ConversationProfile) -> Option<UpsellOffer> {
        let upsell = current.upsell()?;

        let current_roi = self.calculate_roi(profile.business_type, current);
        let upsell_roi = self.calculate_roi(profile.business_type, upsell);

        let additional_cost = upsell_roi
            .package_price
            .saturating_sub(current_roi.package_price);
        let additional_revenue = upsell_roi
            .first_year_revenue
            .saturating_sub(current_roi.first_year_revenue);
        let additional_roi_percent = if additional_cost > 0 {
            (((additional_revenue as f64 - additional_cost as f64) / additional_cost as f64)
                * 100.0)
                .round() as i32
        } else {
            0
        };

        Some(UpsellOffer {
            package: upsell,
            additional_cost,
            additional_revenue,
            additional_roi_percent,
        })
    }

    /// The next tier down for objection handling, if any
    pub fn downsell(&self, current: Package) -> Option<&PackageSpec> {
        current.downsell().map(|package| self.catalog.spec(package))
    }

    /// Which requested features the package covers.
    ///
    /// Only features with a catalog-level label participate in the missing
    /// check; the percentage is over all requested features.
    pub fn feature_match(&self, package: Package, features: &BTreeSet<FeatureTag>) -> FeatureMatch {
        let spec = self.catalog.spec(package);

        let missing: Vec<String> = features
            .iter()
            .filter_map(|feature| catalog_label(*feature))
            .filter(|label| !spec.features.iter().any(|f| f == label))
            .map(|label| label.to_string())
            .collect();

        let match_percentage = if features.is_empty() {
            100
        } else {
            ((features.len() - missing.len()) * 100 / features.len()) as u8
        };

        FeatureMatch {
            has_all: missing.is_empty(),
            missing,
            match_percentage,
        }
    }

    pub fn catalog(&self) -> &PackageCatalog {
        &self.catalog
    }
}

/// Catalog feature label for a requested feature tag. Tags without a
/// corresponding catalog line (payments) are skipped by feature matching.
fn catalog_label(feature: FeatureTag) -> Option<&'static str> {
    match feature {
        FeatureTag::Ordering => Some("Online Ordering System"),
        FeatureTag::Booking => Some("Online Booking System"),
        FeatureTag::Ai => Some("AI Chatbot"),
        FeatureTag::Seo => Some("SEO Optimization"),
        FeatureTag::CustomDesign => Some("Custom Design"),
        FeatureTag::Ecommerce => Some("E-commerce Platform"),
        FeatureTag::Email => Some("Email Marketing"),
        FeatureTag::Payments => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RecommendationEngine {
        RecommendationEngine::default()
    }

    fn profile() -> ConversationProfile {
        ConversationProfile::default()
    }

    #[test]
    fn test_tight_budget_forces_essential() {
        let mut p = profile();
        p.budget_range = Some(BudgetRange::Tight);
        // Strong signals elsewhere do not matter; rule 1 fires first.
        p.business_type = Some(BusinessType::Restaurant);
        p.features_needed = [FeatureTag::Ordering, FeatureTag::Booking].into_iter().collect();

        let rec = engine().recommend(&p, 90);
        assert_eq!(rec.package, Package::Essential);
    }

    #[test]
    fn test_premium_budget_outranks_industry_rules() {
        // Budget premium fires before the salon+booking rule is checked.
        let mut p = profile();
        p.budget_range = Some(BudgetRange::Premium);
        p.business_type = Some(BusinessType::Salon);
        p.features_needed = [FeatureTag::Booking].into_iter().collect();

        let rec = engine().recommend(&p, 50);
        assert_eq!(rec.package, Package::Premium);
    }

    #[test]
    fn test_ordering_plus_booking_is_premium() {
        let mut p = profile();
        p.features_needed = [FeatureTag::Ordering, FeatureTag::Booking].into_iter().collect();
        assert_eq!(engine().recommend(&p, 10).package, Package::Premium);
    }

    #[test]
    fn test_restaurant_with_ordering_is_professional() {
        let mut p = profile();
        p.business_type = Some(BusinessType::Restaurant);
        p.features_needed = [FeatureTag::Ordering].into_iter().collect();
        assert_eq!(engine().recommend(&p, 10).package, Package::Professional);
    }

    #[test]
    fn test_salon_with_booking_is_premium() {
        let mut p = profile();
        p.business_type = Some(BusinessType::Salon);
        p.features_needed = [FeatureTag::Booking].into_iter().collect();
        assert_eq!(engine().recommend(&p, 10).package, Package::Premium);
    }

    #[test]
    fn test_hot_lead_gets_professional() {
        let rec = engine().recommend(&profile(), 75);
        assert_eq!(rec.package, Package::Professional);
    }

    #[test]
    fn test_default_is_professional() {
        let rec = engine().recommend(&profile(), 10);
        assert_eq!(rec.package, Package::Professional);
    }

    #[test]
    fn test_determinism() {
        let mut p = profile();
        p.business_type = Some(BusinessType::Cafe);
        p.features_needed = [FeatureTag::Seo].into_iter().collect();
        let first = engine().recommend(&p, 42);
        for _ in 0..10 {
            assert_eq!(engine().recommend(&p, 42).package, first.package);
        }
    }

    #[test]
    fn test_confidence_tracks_data_completeness() {
        let e = engine();
        let empty = e.recommend(&profile(), 50);
        assert!((empty.confidence - 0.5).abs() < f32::EPSILON);

        let mut p = profile();
        p.business_type = Some(BusinessType::Restaurant);
        p.budget_range = Some(BudgetRange::Professional);
        p.timeline_urgency = Some(TimelineUrgency::Soon);
        p.features_needed = [FeatureTag::Ordering].into_iter().collect();
        p.pain_points = [chatbot_core::PainPointTag::NoOnlinePresence]
            .into_iter()
            .collect();
        let full = e.recommend(&p, 50);
        assert!((full.confidence - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_roi_payback_rounds_up() {
        let e = engine();
        // Professional for a restaurant: $5000 / $4500 per month -> 2 months.
        let roi = e.calculate_roi(Some(BusinessType::Restaurant), Package::Professional);
        assert_eq!(roi.payback_months, 2);
        assert_eq!(roi.first_year_revenue, 54_000);
        assert_eq!(roi.first_year_roi_percent, 980);

        // Essential for a bar: $2000 / $700 -> ceil(2.857) = 3.
        let roi = e.calculate_roi(Some(BusinessType::Bar), Package::Essential);
        assert_eq!(roi.payback_months, 3);
    }

    #[test]
    fn test_compare_packages_flags_recommendation() {
        let mut p = profile();
        p.budget_range = Some(BudgetRange::Tight);
        let comparison = engine().compare_packages(&p, 50);
        assert_eq!(comparison.len(), 3);
        let recommended: Vec<_> = comparison.iter().filter(|c| c.is_recommended).collect();
        assert_eq!(recommended.len(), 1);
        assert_eq!(recommended[0].package, Package::Essential);
    }

    #[test]
    fn test_upsell_ladder() {
        let e = engine();
        let offer = e.upsell(Package::Essential, &profile()).unwrap();
        assert_eq!(offer.package, Package::Professional);
        assert_eq!(offer.additional_cost, 3000);

        assert!(e.upsell(Package::Premium, &profile()).is_none());
    }

    #[test]
    fn test_downsell() {
        let e = engine();
        assert_eq!(
            e.downsell(Package::Premium).map(|s| s.package),
            Some(Package::Professional)
        );
        assert!(e.downsell(Package::Essential).is_none());
    }

    #[test]
    fn test_feature_match() {
        let e = engine();

        let features: BTreeSet<FeatureTag> =
            [FeatureTag::Ai, FeatureTag::Ordering].into_iter().collect();

        // Essential covers neither.
        let essential = e.feature_match(Package::Essential, &features);
        assert!(!essential.has_all);
        assert_eq!(essential.missing.len(), 2);
        assert_eq!(essential.match_percentage, 0);

        // Professional covers the AI chatbot but not ordering.
        let professional = e.feature_match(Package::Professional, &features);
        assert!(!professional.has_all);
        assert_eq!(professional.missing, vec!["Online Ordering System"]);
        assert_eq!(professional.match_percentage, 50);

        // No requested features matches trivially.
        let none = e.feature_match(Package::Essential, &BTreeSet::new());
        assert!(none.has_all);
        assert_eq!(none.match_percentage, 100);
    }
}
