//! Lead scoring
//!
//! Eight independent, capped components summed and clamped to [0, 100].
//! The score is a pure function of the current profile and session
//! metadata; nothing is accumulated between turns.

use chatbot_config::ScoringConfig;
use chatbot_core::{
    BudgetRange, ConversationProfile, IntentKind, LeadScore, RecordedIntent, ScoreBreakdown,
    TimelineUrgency,
};
use serde::{Deserialize, Serialize};

/// Actionable read on a scored lead
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadInsights {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub next_steps: Vec<String>,
}

/// Why a lead was disqualified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisqualificationReason {
    BudgetTooLow,
    JustExploring,
    NotAFit,
}

impl DisqualificationReason {
    pub fn description(&self) -> &'static str {
        match self {
            DisqualificationReason::BudgetTooLow => "Budget too low for our services",
            DisqualificationReason::JustExploring => "Not ready to buy - just exploring",
            DisqualificationReason::NotAFit => "Not a good fit",
        }
    }
}

/// The scorer
#[derive(Debug, Clone, Default)]
pub struct LeadQualifier {
    config: ScoringConfig,
}

impl LeadQualifier {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Compute the full score for the current profile and session state
    pub fn calculate(
        &self,
        profile: &ConversationProfile,
        message_count: u32,
        recent_intents: &[RecordedIntent],
    ) -> LeadScore {
        let cfg = &self.config;

        let breakdown = ScoreBreakdown {
            business_type: cfg.business_type.points(profile.business_type),
            budget: cfg.budget.points(profile.budget_range),
            timeline: cfg.timeline.points(profile.timeline_urgency),
            decision_maker: cfg.decision_maker.points(profile.decision_maker),
            pain_points: self.pain_point_points(profile),
            features: self.feature_points(profile),
            engagement: cfg.engagement_points(message_count),
            intents: self.intent_points(recent_intents),
        };

        let score = breakdown.total().min(100) as u8;
        let level = cfg.level_for(score);

        tracing::debug!(score, %level, "lead scored");

        LeadScore {
            score,
            level,
            breakdown,
        }
    }

    fn pain_point_points(&self, profile: &ConversationProfile) -> u8 {
        let raw = profile.pain_points.len() as u32 * self.config.pain_point_points as u32;
        raw.min(self.config.pain_point_cap as u32) as u8
    }

    fn feature_points(&self, profile: &ConversationProfile) -> u8 {
        let high_value = profile
            .features_needed
            .iter()
            .filter(|f| f.is_high_value())
            .count() as u32;
        let other = profile.features_needed.len() as u32 - high_value;

        let raw = high_value * self.config.high_value_feature_points as u32
            + other * self.config.other_feature_points as u32;
        raw.min(self.config.feature_cap as u32) as u8
    }

    fn intent_points(&self, recent_intents: &[RecordedIntent]) -> u8 {
        let mut score: i32 = 0;
        for recorded in recent_intents {
            score += match recorded.kind {
                kind if is_buying_intent(kind) => self.config.buying_intent_points as i32,
                kind if is_low_intent(kind) => self.config.low_intent_points as i32,
                _ => self.config.neutral_intent_points as i32,
            };
        }
        score.clamp(0, self.config.intent_cap as i32) as u8
    }

    /// Advisory flag, separate from scoring: explicit decline, a tight
    /// budget on an otherwise weak lead, or an engaged-but-poor-fit lead.
    /// Never suppresses the recommendation itself.
    pub fn should_disqualify(&self, score: &LeadScore, profile: &ConversationProfile) -> bool {
        if profile.explicitly_declined {
            return true;
        }
        if profile.budget_range == Some(BudgetRange::Tight)
            && score.score < self.config.disqualify_score
        {
            return true;
        }
        // Lots of engagement yet still scoring low: flagged, not dropped.
        score.score < self.config.disqualify_score
            && score.breakdown.engagement >= self.config.disqualify_engagement
    }

    pub fn disqualification_reason(
        &self,
        profile: &ConversationProfile,
    ) -> DisqualificationReason {
        if profile.budget_range == Some(BudgetRange::Tight) {
            DisqualificationReason::BudgetTooLow
        } else if profile.timeline_urgency == Some(TimelineUrgency::Exploring) {
            DisqualificationReason::JustExploring
        } else {
            DisqualificationReason::NotAFit
        }
    }

    /// Strengths, weaknesses, and suggested next steps for the host
    pub fn insights(&self, score: &LeadScore, profile: &ConversationProfile) -> LeadInsights {
        let b = &score.breakdown;
        let mut insights = LeadInsights::default();

        if b.business_type >= 18 {
            insights
                .strengths
                .push("Perfect business type for our services".to_string());
        }
        if b.budget >= 25 {
            insights
                .strengths
                .push("Healthy budget - can afford premium features".to_string());
        }
        if b.timeline >= 15 {
            insights
                .strengths
                .push("Urgent timeline - ready to move fast".to_string());
        }
        if b.decision_maker >= 18 {
            insights
                .strengths
                .push("Decision maker - can close quickly".to_string());
        }
        if b.engagement >= 12 {
            insights
                .strengths
                .push("Highly engaged in conversation".to_string());
        }

        if b.budget < 15 {
            insights
                .weaknesses
                .push("Budget concerns - may need payment plan".to_string());
        }
        if b.timeline < 10 {
            insights
                .weaknesses
                .push("No urgency - just exploring".to_string());
        }
        if b.decision_maker < 10 {
            insights
                .weaknesses
                .push("Not decision maker - needs approval".to_string());
        }
        if b.engagement < 8 {
            insights
                .weaknesses
                .push("Low engagement - may lose interest".to_string());
        }
        if profile.pain_points.is_empty() {
            insights
                .weaknesses
                .push("No clear pain points identified".to_string());
        }

        let next_steps: &[&str] = match score.level {
            chatbot_core::LeadLevel::Qualified => &[
                "Show form CTA immediately",
                "Emphasize urgency and scarcity",
                "Offer to schedule call with team",
            ],
            chatbot_core::LeadLevel::Hot => &[
                "Address any remaining objections",
                "Show ROI and social proof",
                "Push for form submission",
            ],
            chatbot_core::LeadLevel::Warm => &[
                "Build more value",
                "Identify pain points",
                "Offer examples and case studies",
            ],
            chatbot_core::LeadLevel::Cold => &[
                "Qualify budget and timeline",
                "Educate on value proposition",
                "Offer to stay in touch",
            ],
        };
        insights.next_steps = next_steps.iter().map(|s| s.to_string()).collect();

        insights
    }
}

fn is_buying_intent(kind: IntentKind) -> bool {
    matches!(
        kind,
        IntentKind::ReadyToStart
            | IntentKind::QuoteRequest
            | IntentKind::GetStarted
            | IntentKind::PricingInquiry
            | IntentKind::PackageComparison
    )
}

fn is_low_intent(kind: IntentKind) -> bool {
    matches!(
        kind,
        IntentKind::NotInterested
            | IntentKind::NotReady
            | IntentKind::Clarification
            | IntentKind::Unknown
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatbot_core::{BusinessType, DecisionMaker, FeatureTag, LeadLevel, PainPointTag};

    fn full_profile() -> ConversationProfile {
        ConversationProfile {
            business_type: Some(BusinessType::Restaurant),
            budget_range: Some(BudgetRange::Premium),
            timeline_urgency: Some(TimelineUrgency::Urgent),
            decision_maker: Some(DecisionMaker::Owner),
            features_needed: [FeatureTag::Ordering, FeatureTag::Ai].into_iter().collect(),
            pain_points: [
                PainPointTag::NoOnlinePresence,
                PainPointTag::LosingCustomers,
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        }
    }

    fn buying_intents(n: usize) -> Vec<RecordedIntent> {
        (0..n)
            .map(|_| RecordedIntent::new(IntentKind::ReadyToStart, 0.9))
            .collect()
    }

    #[test]
    fn test_empty_profile_scores_defaults() {
        let qualifier = LeadQualifier::default();
        let score = qualifier.calculate(&ConversationProfile::default(), 0, &[]);

        // unknown budget 5 + unknown timeline 5 + unknown decision maker 10
        // + low engagement 5, everything else 0
        assert_eq!(score.breakdown.business_type, 0);
        assert_eq!(score.breakdown.budget, 5);
        assert_eq!(score.breakdown.timeline, 5);
        assert_eq!(score.breakdown.decision_maker, 10);
        assert_eq!(score.breakdown.engagement, 5);
        assert_eq!(score.score, 25);
        assert_eq!(score.level, LeadLevel::Cold);
    }

    #[test]
    fn test_score_is_clamped_to_100() {
        let qualifier = LeadQualifier::default();
        let score = qualifier.calculate(&full_profile(), 12, &buying_intents(5));

        // Components alone sum past 100.
        assert!(score.breakdown.total() > 100);
        assert_eq!(score.score, 100);
        assert_eq!(score.level, LeadLevel::Qualified);
    }

    #[test]
    fn test_score_bounds_hold_for_odd_inputs() {
        let qualifier = LeadQualifier::default();
        for message_count in [0, 1, 7, 1000] {
            let score = qualifier.calculate(&ConversationProfile::default(), message_count, &[]);
            assert!(score.score <= 100);
        }
    }

    #[test]
    fn test_feature_points_weigh_high_value() {
        let qualifier = LeadQualifier::default();

        let mut profile = ConversationProfile::default();
        profile.features_needed = [FeatureTag::Ordering, FeatureTag::Seo].into_iter().collect();
        let score = qualifier.calculate(&profile, 0, &[]);
        // One high-value (3) + one other (1).
        assert_eq!(score.breakdown.features, 4);

        profile.features_needed = [
            FeatureTag::Ordering,
            FeatureTag::Booking,
            FeatureTag::Ai,
            FeatureTag::Ecommerce,
        ]
        .into_iter()
        .collect();
        let score = qualifier.calculate(&profile, 0, &[]);
        // 4 * 3 = 12 capped at 10.
        assert_eq!(score.breakdown.features, 10);
    }

    #[test]
    fn test_pain_points_capped() {
        let qualifier = LeadQualifier::default();
        let mut profile = ConversationProfile::default();
        profile.pain_points = [
            PainPointTag::NoOnlinePresence,
            PainPointTag::OutdatedWebsite,
            PainPointTag::NoOnlineOrders,
            PainPointTag::NoBookings,
            PainPointTag::LosingCustomers,
            PainPointTag::NotOnGoogle,
        ]
        .into_iter()
        .collect();
        let score = qualifier.calculate(&profile, 0, &[]);
        // 6 * 2 = 12 capped at 10.
        assert_eq!(score.breakdown.pain_points, 10);
    }

    #[test]
    fn test_intent_quality_mix() {
        let qualifier = LeadQualifier::default();
        let intents = vec![
            RecordedIntent::new(IntentKind::ReadyToStart, 0.9), // +3
            RecordedIntent::new(IntentKind::Unknown, 0.0),      // -1
            RecordedIntent::new(IntentKind::Greeting, 0.8),     // +1
        ];
        let score = qualifier.calculate(&ConversationProfile::default(), 0, &intents);
        assert_eq!(score.breakdown.intents, 3);

        // All low intents clamp at zero, never negative.
        let lows = vec![
            RecordedIntent::new(IntentKind::NotInterested, 0.9),
            RecordedIntent::new(IntentKind::Unknown, 0.0),
        ];
        let score = qualifier.calculate(&ConversationProfile::default(), 0, &lows);
        assert_eq!(score.breakdown.intents, 0);
    }

    #[test]
    fn test_disqualify_explicit_decline() {
        let qualifier = LeadQualifier::default();
        let mut profile = ConversationProfile::default();
        profile.explicitly_declined = true;
        let score = qualifier.calculate(&profile, 10, &[]);
        assert!(qualifier.should_disqualify(&score, &profile));
    }

    #[test]
    fn test_disqualify_needs_low_score() {
        let qualifier = LeadQualifier::default();

        // Tight budget alone is not enough; the default floors keep the
        // score above the disqualification line.
        let mut profile = ConversationProfile::default();
        profile.budget_range = Some(BudgetRange::Tight);
        let score = qualifier.calculate(&profile, 4, &[]);
        assert!(score.score >= 15);
        assert!(!qualifier.should_disqualify(&score, &profile));
    }

    #[test]
    fn test_disqualification_reason() {
        let qualifier = LeadQualifier::default();

        let mut profile = ConversationProfile::default();
        profile.budget_range = Some(BudgetRange::Tight);
        assert_eq!(
            qualifier.disqualification_reason(&profile),
            DisqualificationReason::BudgetTooLow
        );

        let mut profile = ConversationProfile::default();
        profile.timeline_urgency = Some(TimelineUrgency::Exploring);
        assert_eq!(
            qualifier.disqualification_reason(&profile),
            DisqualificationReason::JustExploring
        );

        assert_eq!(
            qualifier.disqualification_reason(&ConversationProfile::default()),
            DisqualificationReason::NotAFit
        );
    }

    #[test]
    fn test_insights_reflect_breakdown() {
        let qualifier = LeadQualifier::default();
        let score = qualifier.calculate(&full_profile(), 12, &buying_intents(3));
        let insights = qualifier.insights(&score, &full_profile());

        assert!(insights
            .strengths
            .iter()
            .any(|s| s.contains("business type")));
        assert!(insights.strengths.iter().any(|s| s.contains("budget")));
        assert!(!insights.next_steps.is_empty());

        let cold_profile = ConversationProfile::default();
        let cold = qualifier.calculate(&cold_profile, 1, &[]);
        let cold_insights = qualifier.insights(&cold, &cold_profile);
        assert!(cold_insights
            .weaknesses
            .iter()
            .any(|w| w.contains("pain points")));
        assert!(cold_insights
            .next_steps
            .iter()
            .any(|s| s.contains("Qualify budget")));
    }
}
