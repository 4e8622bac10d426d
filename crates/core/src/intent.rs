//! Intent classification result types

use serde::{Deserialize, Serialize};

/// Every intent the classifier can assign.
///
/// Closed enum so the state machine's per-state handlers and the scoring
/// tables stay exhaustive under `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    // Greetings / openers
    Greeting,
    GetStarted,
    // Pricing and packages
    PricingInquiry,
    PackageComparison,
    EssentialDetails,
    ProfessionalDetails,
    PremiumDetails,
    // Timeline
    TimelineInquiry,
    UrgentTimeline,
    // Business type mentions
    RestaurantMention,
    SalonMention,
    FitnessMention,
    // Feature needs and inquiries
    AiChatbotInquiry,
    OnlineOrderingNeed,
    OnlineBookingNeed,
    SeoInquiry,
    CustomDesignInquiry,
    MobileInquiry,
    HostingInquiry,
    OwnershipInquiry,
    // Pain points
    NoWebsite,
    OutdatedWebsite,
    LosingCustomers,
    // Budget
    BudgetConcern,
    BudgetTight,
    BudgetFlexible,
    PaymentPlanInquiry,
    // Objections
    NotReady,
    NeedApproval,
    // Buying signals
    ReadyToStart,
    QuoteRequest,
    // Misc
    SeeExamples,
    SupportInquiry,
    CompetitorComparison,
    Gratitude,
    Clarification,
    NotInterested,
    Goodbye,
    /// Reserved: input too short to classify
    InvalidInput,
    /// Reserved: no layer produced a candidate
    Unknown,
}

impl IntentKind {
    /// Visitor named their kind of business
    pub fn is_business_mention(&self) -> bool {
        matches!(
            self,
            IntentKind::RestaurantMention | IntentKind::SalonMention | IntentKind::FitnessMention
        )
    }

    /// Visitor asked about one specific package
    pub fn is_package_details(&self) -> bool {
        matches!(
            self,
            IntentKind::EssentialDetails
                | IntentKind::ProfessionalDetails
                | IntentKind::PremiumDetails
        )
    }

    /// Visitor stated a concrete feature need
    pub fn is_feature_need(&self) -> bool {
        matches!(
            self,
            IntentKind::OnlineOrderingNeed | IntentKind::OnlineBookingNeed
        )
    }

    /// Question-shaped intents (routed to needs assessment / support)
    pub fn is_inquiry(&self) -> bool {
        matches!(
            self,
            IntentKind::PricingInquiry
                | IntentKind::TimelineInquiry
                | IntentKind::AiChatbotInquiry
                | IntentKind::SeoInquiry
                | IntentKind::CustomDesignInquiry
                | IntentKind::MobileInquiry
                | IntentKind::HostingInquiry
                | IntentKind::OwnershipInquiry
                | IntentKind::PaymentPlanInquiry
                | IntentKind::SupportInquiry
        )
    }

    /// Budget-flavored intents
    pub fn is_budget(&self) -> bool {
        matches!(
            self,
            IntentKind::BudgetConcern | IntentKind::BudgetTight | IntentKind::BudgetFlexible
        )
    }

    /// Strong buying signal
    pub fn is_buying_signal(&self) -> bool {
        matches!(self, IntentKind::ReadyToStart | IntentKind::QuoteRequest)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Greeting => "greeting",
            IntentKind::GetStarted => "get_started",
            IntentKind::PricingInquiry => "pricing_inquiry",
            IntentKind::PackageComparison => "package_comparison",
            IntentKind::EssentialDetails => "essential_details",
            IntentKind::ProfessionalDetails => "professional_details",
            IntentKind::PremiumDetails => "premium_details",
            IntentKind::TimelineInquiry => "timeline_inquiry",
            IntentKind::UrgentTimeline => "urgent_timeline",
            IntentKind::RestaurantMention => "restaurant_mention",
            IntentKind::SalonMention => "salon_mention",
            IntentKind::FitnessMention => "fitness_mention",
            IntentKind::AiChatbotInquiry => "ai_chatbot_inquiry",
            IntentKind::OnlineOrderingNeed => "online_ordering_need",
            IntentKind::OnlineBookingNeed => "online_booking_need",
            IntentKind::SeoInquiry => "seo_inquiry",
            IntentKind::CustomDesignInquiry => "custom_design_inquiry",
            IntentKind::MobileInquiry => "mobile_inquiry",
            IntentKind::HostingInquiry => "hosting_inquiry",
            IntentKind::OwnershipInquiry => "ownership_inquiry",
            IntentKind::NoWebsite => "no_website",
            IntentKind::OutdatedWebsite => "outdated_website",
            IntentKind::LosingCustomers => "losing_customers",
            IntentKind::BudgetConcern => "budget_concern",
            IntentKind::BudgetTight => "budget_tight",
            IntentKind::BudgetFlexible => "budget_flexible",
            IntentKind::PaymentPlanInquiry => "payment_plan_inquiry",
            IntentKind::NotReady => "not_ready",
            IntentKind::NeedApproval => "need_approval",
            IntentKind::ReadyToStart => "ready_to_start",
            IntentKind::QuoteRequest => "quote_request",
            IntentKind::SeeExamples => "see_examples",
            IntentKind::SupportInquiry => "support_inquiry",
            IntentKind::CompetitorComparison => "competitor_comparison",
            IntentKind::Gratitude => "gratitude",
            IntentKind::Clarification => "clarification",
            IntentKind::NotInterested => "not_interested",
            IntentKind::Goodbye => "goodbye",
            IntentKind::InvalidInput => "invalid_input",
            IntentKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which matching layer produced the classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchLayer {
    Exact,
    Keyword,
    Ngram,
    Fallback,
}

/// Strategy bucket for a confidence value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// Respond directly
    High,
    /// Seek clarification
    Medium,
    /// Fall back
    Low,
}

impl ConfidenceLevel {
    pub const HIGH_THRESHOLD: f32 = 0.85;
    pub const MEDIUM_THRESHOLD: f32 = 0.60;

    pub fn from_confidence(confidence: f32) -> Self {
        Self::from_confidence_with(confidence, Self::HIGH_THRESHOLD, Self::MEDIUM_THRESHOLD)
    }

    pub fn from_confidence_with(confidence: f32, high: f32, medium: f32) -> Self {
        if confidence >= high {
            ConfidenceLevel::High
        } else if confidence >= medium {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// Classifier output for one utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub kind: IntentKind,
    /// Confidence in [0, 1]
    pub confidence: f32,
    /// Layer that produced this result
    pub layer: MatchLayer,
}

impl Intent {
    pub fn new(kind: IntentKind, confidence: f32, layer: MatchLayer) -> Self {
        Self {
            kind,
            confidence: confidence.clamp(0.0, 1.0),
            layer,
        }
    }

    /// Reserved result for inputs too short to classify
    pub fn invalid_input() -> Self {
        Self::new(IntentKind::InvalidInput, 1.0, MatchLayer::Fallback)
    }

    /// Reserved result when no layer matched
    pub fn unknown() -> Self {
        Self::new(IntentKind::Unknown, 0.0, MatchLayer::Fallback)
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_confidence(self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(IntentKind::SalonMention.is_business_mention());
        assert!(IntentKind::PremiumDetails.is_package_details());
        assert!(IntentKind::OnlineOrderingNeed.is_feature_need());
        assert!(IntentKind::BudgetTight.is_budget());
        assert!(IntentKind::QuoteRequest.is_buying_signal());
        assert!(!IntentKind::Greeting.is_inquiry());
        assert!(IntentKind::HostingInquiry.is_inquiry());
    }

    #[test]
    fn test_confidence_levels() {
        assert_eq!(
            ConfidenceLevel::from_confidence(0.9),
            ConfidenceLevel::High
        );
        assert_eq!(
            ConfidenceLevel::from_confidence(0.7),
            ConfidenceLevel::Medium
        );
        assert_eq!(ConfidenceLevel::from_confidence(0.3), ConfidenceLevel::Low);
    }

    #[test]
    fn test_reserved_intents() {
        let invalid = Intent::invalid_input();
        assert_eq!(invalid.kind, IntentKind::InvalidInput);
        assert_eq!(invalid.confidence, 1.0);

        let unknown = Intent::unknown();
        assert_eq!(unknown.kind, IntentKind::Unknown);
        assert_eq!(unknown.confidence, 0.0);
        assert_eq!(unknown.layer, MatchLayer::Fallback);
    }

    #[test]
    fn test_confidence_clamped() {
        let intent = Intent::new(IntentKind::Greeting, 1.7, MatchLayer::Keyword);
        assert_eq!(intent.confidence, 1.0);
    }
}
