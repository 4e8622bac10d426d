//! Visitor profile built up over a conversation

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Kind of business the visitor runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Restaurant,
    Salon,
    Spa,
    Fitness,
    Cafe,
    Bar,
    Retail,
    Other,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Restaurant => "restaurant",
            BusinessType::Salon => "salon",
            BusinessType::Spa => "spa",
            BusinessType::Fitness => "fitness",
            BusinessType::Cafe => "cafe",
            BusinessType::Bar => "bar",
            BusinessType::Retail => "retail",
            BusinessType::Other => "other",
        }
    }
}

impl std::fmt::Display for BusinessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Budget bracket inferred from stated amounts or phrasing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetRange {
    /// Under $2,000
    Tight,
    /// $2,000 - $2,500
    Essential,
    /// $2,500 - $6,000
    Professional,
    /// $6,000 and up
    Premium,
    /// Explicitly not price-sensitive
    Flexible,
}

/// How soon the visitor wants to launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineUrgency {
    /// ASAP / hard deadline
    Urgent,
    /// A few weeks out
    Soon,
    /// No rush
    Flexible,
    /// Just looking around
    Exploring,
}

/// Website features the visitor has asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureTag {
    Ai,
    Ordering,
    Booking,
    Seo,
    CustomDesign,
    Payments,
    Email,
    Ecommerce,
}

impl FeatureTag {
    /// Features that materially change project scope and pricing
    pub fn is_high_value(&self) -> bool {
        matches!(
            self,
            FeatureTag::Ordering | FeatureTag::Booking | FeatureTag::Ai | FeatureTag::Ecommerce
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FeatureTag::Ai => "AI Chatbot",
            FeatureTag::Ordering => "Online Ordering System",
            FeatureTag::Booking => "Online Booking System",
            FeatureTag::Seo => "SEO Optimization",
            FeatureTag::CustomDesign => "Custom Design",
            FeatureTag::Payments => "Payment Processing",
            FeatureTag::Email => "Email Marketing",
            FeatureTag::Ecommerce => "E-commerce Platform",
        }
    }
}

/// Problems the visitor has voiced about their current web presence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PainPointTag {
    NoOnlinePresence,
    OutdatedWebsite,
    NoOnlineOrders,
    NoBookings,
    LosingCustomers,
    NotOnGoogle,
    LooksUnprofessional,
    NoMobileVersion,
    CantUpdateSelf,
}

/// Whether the visitor can sign off on the purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionMaker {
    /// Owns the decision
    Owner,
    /// Needs someone else's approval
    NeedsApproval,
    /// Researching on someone else's behalf
    Influencer,
}

/// Accumulated understanding of one visitor across a session.
///
/// Scalar fields only ever move from unknown to known (later extractions may
/// overwrite a known value, never clear it); set fields only grow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<BusinessType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<BudgetRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline_urgency: Option<TimelineUrgency>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub features_needed: BTreeSet<FeatureTag>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub pain_points: BTreeSet<PainPointTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_maker: Option<DecisionMaker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Visitor explicitly declined the offer at some point
    #[serde(default)]
    pub explicitly_declined: bool,
}

impl ConversationProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge freshly extracted entities into the profile.
    ///
    /// Scalars overwrite only when the new value is present; sets union.
    pub fn merge(&mut self, extracted: &ConversationProfile) {
        if extracted.business_type.is_some() {
            self.business_type = extracted.business_type;
        }
        if extracted.business_name.is_some() {
            self.business_name = extracted.business_name.clone();
        }
        if extracted.budget_range.is_some() {
            self.budget_range = extracted.budget_range;
        }
        if extracted.timeline_urgency.is_some() {
            self.timeline_urgency = extracted.timeline_urgency;
        }
        if extracted.decision_maker.is_some() {
            self.decision_maker = extracted.decision_maker;
        }
        if extracted.email.is_some() {
            self.email = extracted.email.clone();
        }
        if extracted.phone.is_some() {
            self.phone = extracted.phone.clone();
        }
        self.features_needed
            .extend(extracted.features_needed.iter().copied());
        self.pain_points.extend(extracted.pain_points.iter().copied());
        self.explicitly_declined |= extracted.explicitly_declined;
    }

    /// True when any qualification signal beyond business type is known
    pub fn has_needs_signal(&self) -> bool {
        self.budget_range.is_some()
            || !self.features_needed.is_empty()
            || !self.pain_points.is_empty()
    }

    /// Percent (0-100) of the four scalar qualification fields known
    pub fn completion_rate(&self) -> u8 {
        let fields = [
            self.business_type.is_some(),
            self.budget_range.is_some(),
            self.timeline_urgency.is_some(),
            self.decision_maker.is_some(),
        ];
        let known = fields.iter().filter(|f| **f).count();
        (known * 100 / fields.len()) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_scalars_never_downgrade() {
        let mut profile = ConversationProfile::new();
        profile.business_type = Some(BusinessType::Restaurant);
        profile.budget_range = Some(BudgetRange::Professional);

        // An extraction that found nothing must not clear known fields.
        profile.merge(&ConversationProfile::new());
        assert_eq!(profile.business_type, Some(BusinessType::Restaurant));
        assert_eq!(profile.budget_range, Some(BudgetRange::Professional));

        // A new value overwrites.
        let update = ConversationProfile {
            budget_range: Some(BudgetRange::Premium),
            ..Default::default()
        };
        profile.merge(&update);
        assert_eq!(profile.budget_range, Some(BudgetRange::Premium));
    }

    #[test]
    fn test_merge_sets_only_grow() {
        let mut profile = ConversationProfile::new();
        let first = ConversationProfile {
            features_needed: [FeatureTag::Ordering].into_iter().collect(),
            ..Default::default()
        };
        profile.merge(&first);

        let second = ConversationProfile {
            features_needed: [FeatureTag::Booking].into_iter().collect(),
            ..Default::default()
        };
        profile.merge(&second);

        assert!(profile.features_needed.contains(&FeatureTag::Ordering));
        assert!(profile.features_needed.contains(&FeatureTag::Booking));

        // Re-merging a duplicate does not shrink or duplicate.
        profile.merge(&first);
        assert_eq!(profile.features_needed.len(), 2);
    }

    #[test]
    fn test_completion_rate() {
        let mut profile = ConversationProfile::new();
        assert_eq!(profile.completion_rate(), 0);

        profile.business_type = Some(BusinessType::Salon);
        profile.budget_range = Some(BudgetRange::Tight);
        assert_eq!(profile.completion_rate(), 50);

        profile.timeline_urgency = Some(TimelineUrgency::Soon);
        profile.decision_maker = Some(DecisionMaker::Owner);
        assert_eq!(profile.completion_rate(), 100);
    }

    #[test]
    fn test_high_value_features() {
        assert!(FeatureTag::Ordering.is_high_value());
        assert!(FeatureTag::Ecommerce.is_high_value());
        assert!(!FeatureTag::Seo.is_high_value());
    }
}
