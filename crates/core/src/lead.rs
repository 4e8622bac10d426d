//! Lead scoring result types

use serde::{Deserialize, Serialize};

/// Four-tier lead temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadLevel {
    /// 0-30: just browsing
    Cold,
    /// 31-60: somewhat interested
    Warm,
    /// 61-85: very interested
    Hot,
    /// 86-100: ready to buy
    Qualified,
}

impl LeadLevel {
    pub fn description(&self) -> &'static str {
        match self {
            LeadLevel::Qualified => "Ready to buy - high budget, urgent timeline, decision maker",
            LeadLevel::Hot => "Very interested - good fit, needs features, engaged",
            LeadLevel::Warm => "Somewhat interested - exploring options, may need nurturing",
            LeadLevel::Cold => "Low interest - just browsing, not ready yet",
        }
    }
}

impl std::fmt::Display for LeadLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LeadLevel::Cold => "cold",
            LeadLevel::Warm => "warm",
            LeadLevel::Hot => "hot",
            LeadLevel::Qualified => "qualified",
        };
        write!(f, "{s}")
    }
}

/// Per-component contribution to the lead score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub business_type: u8,
    pub budget: u8,
    pub timeline: u8,
    pub decision_maker: u8,
    pub pain_points: u8,
    pub features: u8,
    pub engagement: u8,
    pub intents: u8,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.business_type as u32
            + self.budget as u32
            + self.timeline as u32
            + self.decision_maker as u32
            + self.pain_points as u32
            + self.features as u32
            + self.engagement as u32
            + self.intents as u32
    }
}

/// Full scoring result: total, tier, and the components that produced it.
///
/// Recomputed from scratch every turn; purely a function of the current
/// profile and session metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadScore {
    /// Clamped to [0, 100]
    pub score: u8,
    pub level: LeadLevel,
    pub breakdown: ScoreBreakdown,
}

impl LeadScore {
    pub fn cold() -> Self {
        Self {
            score: 0,
            level: LeadLevel::Cold,
            breakdown: ScoreBreakdown::default(),
        }
    }
}

impl Default for LeadScore {
    fn default() -> Self {
        Self::cold()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_total() {
        let breakdown = ScoreBreakdown {
            business_type: 20,
            budget: 30,
            timeline: 20,
            decision_maker: 20,
            pain_points: 10,
            features: 10,
            engagement: 15,
            intents: 10,
        };
        // Maximal components overshoot 100; the qualifier clamps.
        assert_eq!(breakdown.total(), 135);
    }

    #[test]
    fn test_level_ordering() {
        assert!(LeadLevel::Qualified > LeadLevel::Hot);
        assert!(LeadLevel::Warm > LeadLevel::Cold);
    }
}
