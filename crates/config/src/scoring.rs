//! Lead scoring weights
//!
//! Every constant the qualifier uses lives here so the scoring model can be
//! tuned without touching the scoring logic.

use chatbot_core::{BudgetRange, BusinessType, DecisionMaker, LeadLevel, TimelineUrgency};
use serde::{Deserialize, Serialize};

/// Points per business type (0-20)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessTypePoints {
    #[serde(default = "default_restaurant_pts")]
    pub restaurant: u8,
    #[serde(default = "default_salon_pts")]
    pub salon: u8,
    #[serde(default = "default_fitness_pts")]
    pub fitness: u8,
    #[serde(default = "default_cafe_pts")]
    pub cafe: u8,
    #[serde(default = "default_bar_pts")]
    pub bar: u8,
    #[serde(default = "default_retail_pts")]
    pub retail: u8,
    #[serde(default = "default_other_pts")]
    pub other: u8,
}

fn default_restaurant_pts() -> u8 {
    20
}
fn default_salon_pts() -> u8 {
    18
}
fn default_fitness_pts() -> u8 {
    18
}
fn default_cafe_pts() -> u8 {
    16
}
fn default_bar_pts() -> u8 {
    14
}
fn default_retail_pts() -> u8 {
    16
}
fn default_other_pts() -> u8 {
    10
}

impl Default for BusinessTypePoints {
    fn default() -> Self {
        Self {
            restaurant: default_restaurant_pts(),
            salon: default_salon_pts(),
            fitness: default_fitness_pts(),
            cafe: default_cafe_pts(),
            bar: default_bar_pts(),
            retail: default_retail_pts(),
            other: default_other_pts(),
        }
    }
}

impl BusinessTypePoints {
    /// Unknown business type scores zero; spa has no row of its own and
    /// scores as `other`.
    pub fn points(&self, business_type: Option<BusinessType>) -> u8 {
        match business_type {
            None => 0,
            Some(BusinessType::Restaurant) => self.restaurant,
            Some(BusinessType::Salon) => self.salon,
            Some(BusinessType::Fitness) => self.fitness,
            Some(BusinessType::Cafe) => self.cafe,
            Some(BusinessType::Bar) => self.bar,
            Some(BusinessType::Retail) => self.retail,
            Some(BusinessType::Spa) | Some(BusinessType::Other) => self.other,
        }
    }
}

/// Points per budget range (5-30; unknown scores the floor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPoints {
    #[serde(default = "default_tight_pts")]
    pub tight: u8,
    #[serde(default = "default_essential_pts")]
    pub essential: u8,
    #[serde(default = "default_professional_pts")]
    pub professional: u8,
    #[serde(default = "default_premium_pts")]
    pub premium: u8,
    #[serde(default = "default_premium_pts")]
    pub flexible: u8,
    #[serde(default = "default_unknown_budget_pts")]
    pub unknown: u8,
}

fn default_tight_pts() -> u8 {
    10
}
fn default_essential_pts() -> u8 {
    15
}
fn default_professional_pts() -> u8 {
    25
}
fn default_premium_pts() -> u8 {
    30
}
fn default_unknown_budget_pts() -> u8 {
    5
}

impl Default for BudgetPoints {
    fn default() -> Self {
        Self {
            tight: default_tight_pts(),
            essential: default_essential_pts(),
            professional: default_professional_pts(),
            premium: default_premium_pts(),
            flexible: default_premium_pts(),
            unknown: default_unknown_budget_pts(),
        }
    }
}

impl BudgetPoints {
    pub fn points(&self, budget: Option<BudgetRange>) -> u8 {
        match budget {
            None => self.unknown,
            Some(BudgetRange::Tight) => self.tight,
            Some(BudgetRange::Essential) => self.essential,
            Some(BudgetRange::Professional) => self.professional,
            Some(BudgetRange::Premium) => self.premium,
            Some(BudgetRange::Flexible) => self.flexible,
        }
    }
}

/// Points per timeline urgency (5-20; unknown scores the floor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoints {
    #[serde(default = "default_urgent_pts")]
    pub urgent: u8,
    #[serde(default = "default_soon_pts")]
    pub soon: u8,
    #[serde(default = "default_flexible_pts")]
    pub flexible: u8,
    #[serde(default = "default_exploring_pts")]
    pub exploring: u8,
    #[serde(default = "default_exploring_pts")]
    pub unknown: u8,
}

fn default_urgent_pts() -> u8 {
    20
}
fn default_soon_pts() -> u8 {
    15
}
fn default_flexible_pts() -> u8 {
    10
}
fn default_exploring_pts() -> u8 {
    5
}

impl Default for TimelinePoints {
    fn default() -> Self {
        Self {
            urgent: default_urgent_pts(),
            soon: default_soon_pts(),
            flexible: default_flexible_pts(),
            exploring: default_exploring_pts(),
            unknown: default_exploring_pts(),
        }
    }
}

impl TimelinePoints {
    pub fn points(&self, timeline: Option<TimelineUrgency>) -> u8 {
        match timeline {
            None => self.unknown,
            Some(TimelineUrgency::Urgent) => self.urgent,
            Some(TimelineUrgency::Soon) => self.soon,
            Some(TimelineUrgency::Flexible) => self.flexible,
            Some(TimelineUrgency::Exploring) => self.exploring,
        }
    }
}

/// Points per decision-maker status (5-20; unknown scores the midpoint)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionMakerPoints {
    #[serde(default = "default_owner_pts")]
    pub owner: u8,
    #[serde(default = "default_influencer_pts")]
    pub influencer: u8,
    #[serde(default = "default_needs_approval_pts")]
    pub needs_approval: u8,
    #[serde(default = "default_unknown_dm_pts")]
    pub unknown: u8,
}

fn default_owner_pts() -> u8 {
    20
}
fn default_influencer_pts() -> u8 {
    12
}
fn default_needs_approval_pts() -> u8 {
    5
}
fn default_unknown_dm_pts() -> u8 {
    10
}

impl Default for DecisionMakerPoints {
    fn default() -> Self {
        Self {
            owner: default_owner_pts(),
            influencer: default_influencer_pts(),
            needs_approval: default_needs_approval_pts(),
            unknown: default_unknown_dm_pts(),
        }
    }
}

impl DecisionMakerPoints {
    pub fn points(&self, status: Option<DecisionMaker>) -> u8 {
        match status {
            None => self.unknown,
            Some(DecisionMaker::Owner) => self.owner,
            Some(DecisionMaker::Influencer) => self.influencer,
            Some(DecisionMaker::NeedsApproval) => self.needs_approval,
        }
    }
}

/// All scoring weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub business_type: BusinessTypePoints,
    #[serde(default)]
    pub budget: BudgetPoints,
    #[serde(default)]
    pub timeline: TimelinePoints,
    #[serde(default)]
    pub decision_maker: DecisionMakerPoints,

    /// Points per pain point
    #[serde(default = "default_pain_point_pts")]
    pub pain_point_points: u8,
    /// Cap on the pain-point component
    #[serde(default = "default_component_cap")]
    pub pain_point_cap: u8,

    /// Points per high-value feature (ordering, booking, AI, e-commerce)
    #[serde(default = "default_high_value_feature_pts")]
    pub high_value_feature_points: u8,
    /// Points per other feature
    #[serde(default = "default_other_feature_pts")]
    pub other_feature_points: u8,
    /// Cap on the feature component
    #[serde(default = "default_component_cap")]
    pub feature_cap: u8,

    /// Engagement points by message count: <=2, <=5, <=10, above
    #[serde(default = "default_engagement_bands")]
    pub engagement_bands: [u8; 4],

    /// Added per buying intent in recent history
    #[serde(default = "default_buying_intent_pts")]
    pub buying_intent_points: i8,
    /// Subtracted per low intent in recent history
    #[serde(default = "default_low_intent_pts")]
    pub low_intent_points: i8,
    /// Added per neutral intent in recent history
    #[serde(default = "default_neutral_intent_pts")]
    pub neutral_intent_points: i8,
    /// Cap on the intent-quality component
    #[serde(default = "default_component_cap")]
    pub intent_cap: u8,

    /// Minimum score for the qualified tier
    #[serde(default = "default_qualified_floor")]
    pub qualified_floor: u8,
    /// Minimum score for the hot tier
    #[serde(default = "default_hot_floor")]
    pub hot_floor: u8,
    /// Minimum score for the warm tier
    #[serde(default = "default_warm_floor")]
    pub warm_floor: u8,

    /// Scores below this are disqualification candidates
    #[serde(default = "default_disqualify_score")]
    pub disqualify_score: u8,
    /// Engagement component at or above this marks an engaged-but-poor-fit lead
    #[serde(default = "default_disqualify_engagement")]
    pub disqualify_engagement: u8,
}

fn default_pain_point_pts() -> u8 {
    2
}
fn default_component_cap() -> u8 {
    10
}
fn default_high_value_feature_pts() -> u8 {
    3
}
fn default_other_feature_pts() -> u8 {
    1
}
fn default_engagement_bands() -> [u8; 4] {
    [5, 10, 13, 15]
}
fn default_buying_intent_pts() -> i8 {
    3
}
fn default_low_intent_pts() -> i8 {
    -1
}
fn default_neutral_intent_pts() -> i8 {
    1
}
fn default_qualified_floor() -> u8 {
    86
}
fn default_hot_floor() -> u8 {
    61
}
fn default_warm_floor() -> u8 {
    31
}
fn default_disqualify_score() -> u8 {
    15
}
fn default_disqualify_engagement() -> u8 {
    12
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            business_type: BusinessTypePoints::default(),
            budget: BudgetPoints::default(),
            timeline: TimelinePoints::default(),
            decision_maker: DecisionMakerPoints::default(),
            pain_point_points: default_pain_point_pts(),
            pain_point_cap: default_component_cap(),
            high_value_feature_points: default_high_value_feature_pts(),
            other_feature_points: default_other_feature_pts(),
            feature_cap: default_component_cap(),
            engagement_bands: default_engagement_bands(),
            buying_intent_points: default_buying_intent_pts(),
            low_intent_points: default_low_intent_pts(),
            neutral_intent_points: default_neutral_intent_pts(),
            intent_cap: default_component_cap(),
            qualified_floor: default_qualified_floor(),
            hot_floor: default_hot_floor(),
            warm_floor: default_warm_floor(),
            disqualify_score: default_disqualify_score(),
            disqualify_engagement: default_disqualify_engagement(),
        }
    }
}

impl ScoringConfig {
    /// Engagement points for a message count
    pub fn engagement_points(&self, message_count: u32) -> u8 {
        let [low, moderate, good, high] = self.engagement_bands;
        if message_count <= 2 {
            low
        } else if message_count <= 5 {
            moderate
        } else if message_count <= 10 {
            good
        } else {
            high
        }
    }

    /// Map a clamped score to its tier
    pub fn level_for(&self, score: u8) -> LeadLevel {
        if score >= self.qualified_floor {
            LeadLevel::Qualified
        } else if score >= self.hot_floor {
            LeadLevel::Hot
        } else if score >= self.warm_floor {
            LeadLevel::Warm
        } else {
            LeadLevel::Cold
        }
    }
}
