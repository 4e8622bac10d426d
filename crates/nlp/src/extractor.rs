//! Entity extraction from free text
//!
//! Nine independent sub-extractors over keyword tables and regexes compiled
//! once at construction. Each returns nothing rather than erroring when the
//! text carries no signal.

use chatbot_core::{
    BudgetRange, BusinessType, ConversationProfile, DecisionMaker, FeatureTag, PainPointTag,
    TimelineUrgency,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Keyword rows for one business type. Table order is match priority:
/// cafe keywords are a subset of the generic food-service vocabulary and
/// must be tried before the restaurant row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessTypeRow {
    pub business_type: BusinessType,
    pub keywords: Vec<String>,
}

/// Keyword rows for one timeline urgency, in priority order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    pub urgency: TimelineUrgency,
    pub keywords: Vec<String>,
}

/// Keyword rows for one feature (non-exclusive; all matches union)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub feature: FeatureTag,
    pub keywords: Vec<String>,
}

/// Keyword rows for one pain point (non-exclusive; all matches union)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PainPointRow {
    pub pain_point: PainPointTag,
    pub keywords: Vec<String>,
}

/// Dollar thresholds for bucketing a stated amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetBuckets {
    /// Amounts below this are `tight`
    #[serde(default = "default_tight_below")]
    pub tight_below: u32,
    /// Amounts below this are `essential`
    #[serde(default = "default_essential_below")]
    pub essential_below: u32,
    /// Amounts below this are `professional`; everything above is `premium`
    #[serde(default = "default_professional_below")]
    pub professional_below: u32,
    /// Amounts below this are ignored as noise
    #[serde(default = "default_min_amount")]
    pub min_amount: u32,
}

fn default_tight_below() -> u32 {
    2000
}
fn default_essential_below() -> u32 {
    2500
}
fn default_professional_below() -> u32 {
    6000
}
fn default_min_amount() -> u32 {
    100
}

impl Default for BudgetBuckets {
    fn default() -> Self {
        Self {
            tight_below: default_tight_below(),
            essential_below: default_essential_below(),
            professional_below: default_professional_below(),
            min_amount: default_min_amount(),
        }
    }
}

impl BudgetBuckets {
    pub fn bucket(&self, amount: u32) -> BudgetRange {
        if amount < self.tight_below {
            BudgetRange::Tight
        } else if amount < self.essential_below {
            BudgetRange::Essential
        } else if amount < self.professional_below {
            BudgetRange::Professional
        } else {
            BudgetRange::Premium
        }
    }
}

/// All extractor keyword tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorTables {
    /// Priority-ordered business type rows
    pub business_types: Vec<BusinessTypeRow>,
    /// Priority-ordered timeline rows (urgent first)
    pub timelines: Vec<TimelineRow>,
    pub features: Vec<FeatureRow>,
    pub pain_points: Vec<PainPointRow>,
    /// Phrases implying a tight budget when no amount is stated
    pub tight_budget: Vec<String>,
    /// Phrases implying a flexible budget when no amount is stated
    pub flexible_budget: Vec<String>,
    /// Phrases implying the speaker owns the decision
    pub owner_phrases: Vec<String>,
    /// Phrases implying someone else must approve
    pub approval_phrases: Vec<String>,
    /// Phrases implying the speaker is researching for someone else
    pub influencer_phrases: Vec<String>,
    #[serde(default)]
    pub budget_buckets: BudgetBuckets,
}

fn strings(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

impl Default for ExtractorTables {
    fn default() -> Self {
        Self {
            business_types: vec![
                BusinessTypeRow {
                    business_type: BusinessType::Cafe,
                    keywords: strings(&[
                        "cafe", "coffee shop", "coffee house", "espresso", "latte", "cappuccino",
                    ]),
                },
                BusinessTypeRow {
                    business_type: BusinessType::Salon,
                    keywords: strings(&[
                        "salon", "spa", "beauty", "hair", "barber", "stylist", "nails",
                        "manicure", "pedicure", "facial", "massage", "aesthetics", "cosmetic",
                    ]),
                },
                BusinessTypeRow {
                    business_type: BusinessType::Fitness,
                    keywords: strings(&[
                        "gym", "fitness", "yoga", "pilates", "crossfit", "training", "workout",
                        "exercise", "wellness", "health club", "studio", "personal training",
                    ]),
                },
                BusinessTypeRow {
                    business_type: BusinessType::Bar,
                    keywords: strings(&[
                        "bar", "pub", "tavern", "brewery", "cocktail", "nightclub", "lounge",
                    ]),
                },
                BusinessTypeRow {
                    business_type: BusinessType::Restaurant,
                    keywords: strings(&[
                        "restaurant", "bistro", "cafe", "diner", "eatery", "food", "dining",
                        "pizza", "burger", "sushi", "mexican", "italian", "chinese", "thai",
                        "taco", "burrito", "sandwich", "grill", "kitchen", "chef",
                    ]),
                },
            ],
            timelines: vec![
                TimelineRow {
                    urgency: TimelineUrgency::Urgent,
                    keywords: strings(&[
                        "asap", "urgent", "urgently", "rush", "immediately", "now", "yesterday",
                        "right away", "as soon as possible",
                    ]),
                },
                TimelineRow {
                    urgency: TimelineUrgency::Soon,
                    keywords: strings(&["2 weeks", "3 weeks", "2-3 weeks", "soon", "quickly", "fast"]),
                },
                TimelineRow {
                    urgency: TimelineUrgency::Flexible,
                    keywords: strings(&[
                        "no rush", "whenever", "flexible", "no hurry", "take your time",
                    ]),
                },
                TimelineRow {
                    urgency: TimelineUrgency::Exploring,
                    keywords: strings(&[
                        "just looking", "just browsing", "exploring", "researching",
                        "checking out", "considering",
                    ]),
                },
            ],
            features: vec![
                FeatureRow {
                    feature: FeatureTag::Ai,
                    keywords: strings(&["ai", "chatbot", "bot", "virtual assistant", "automation"]),
                },
                FeatureRow {
                    feature: FeatureTag::Ordering,
                    keywords: strings(&[
                        "online ordering", "order online", "delivery", "takeout", "pickup",
                        "doordash", "uber eats", "grubhub", "food ordering",
                    ]),
                },
                FeatureRow {
                    feature: FeatureTag::Booking,
                    keywords: strings(&[
                        "online booking", "book online", "appointment", "reservation",
                        "schedule", "calendar", "booking system",
                    ]),
                },
                FeatureRow {
                    feature: FeatureTag::Seo,
                    keywords: strings(&[
                        "seo", "search engine", "google", "ranking", "found online",
                        "search results", "visibility", "organic traffic",
                    ]),
                },
                FeatureRow {
                    feature: FeatureTag::CustomDesign,
                    keywords: strings(&[
                        "custom design", "unique design", "tailored", "personalized", "brand",
                        "not a template",
                    ]),
                },
                FeatureRow {
                    feature: FeatureTag::Payments,
                    keywords: strings(&[
                        "payment", "credit card", "stripe", "square", "paypal", "checkout",
                    ]),
                },
                FeatureRow {
                    feature: FeatureTag::Email,
                    keywords: strings(&[
                        "email", "newsletter", "mailchimp", "email marketing", "campaign",
                    ]),
                },
            ],
            pain_points: vec![
                PainPointRow {
                    pain_point: PainPointTag::NoOnlinePresence,
                    keywords: strings(&[
                        "no website", "don't have a website", "no online presence", "not online",
                        "no web presence",
                    ]),
                },
                PainPointRow {
                    pain_point: PainPointTag::OutdatedWebsite,
                    keywords: strings(&[
                        "outdated", "old website", "looks old", "ancient", "from 2010",
                        "needs updating", "terrible", "ugly",
                    ]),
                },
                PainPointRow {
                    pain_point: PainPointTag::NoOnlineOrders,
                    keywords: strings(&[
                        "no online ordering", "can't order online", "need ordering",
                        "want online orders", "delivery problem",
                    ]),
                },
                PainPointRow {
                    pain_point: PainPointTag::NoBookings,
                    keywords: strings(&[
                        "no online booking", "can't book online", "need booking",
                        "want online appointments", "reservation problem",
                    ]),
                },
                PainPointRow {
                    pain_point: PainPointTag::LosingCustomers,
                    keywords: strings(&[
                        "losing customers", "losing business", "customers go elsewhere",
                        "competitor winning", "miss out",
                    ]),
                },
                PainPointRow {
                    pain_point: PainPointTag::NotOnGoogle,
                    keywords: strings(&[
                        "not on google", "can't find me", "not showing up", "no ranking",
                        "not visible",
                    ]),
                },
                PainPointRow {
                    pain_point: PainPointTag::LooksUnprofessional,
                    keywords: strings(&[
                        "unprofessional", "looks bad", "embarrassing", "amateur",
                        "cheap looking",
                    ]),
                },
                PainPointRow {
                    pain_point: PainPointTag::NoMobileVersion,
                    keywords: strings(&[
                        "no mobile", "not mobile friendly", "doesn't work on phone",
                        "mobile version", "not responsive",
                    ]),
                },
                PainPointRow {
                    pain_point: PainPointTag::CantUpdateSelf,
                    keywords: strings(&[
                        "can't update", "can't change", "locked", "pay someone to update",
                        "need developer",
                    ]),
                },
            ],
            tight_budget: strings(&[
                "tight budget", "limited budget", "small budget", "low budget", "cheap",
                "cheaper", "affordable", "minimum", "basic", "under 2",
            ]),
            flexible_budget: strings(&[
                "flexible", "no limit", "whatever it takes", "worth it", "invest",
                "not concerned", "money is not an issue", "quality matters",
            ]),
            owner_phrases: strings(&[
                "i'm the owner", "i own", "i run", "i manage", "i decide", "my business",
                "my restaurant", "my salon", "my gym", "it's up to me", "my decision",
                "i'm in charge",
            ]),
            approval_phrases: strings(&[
                "need to ask", "check with", "talk to my partner", "ask my boss",
                "not the decision maker", "need approval", "permission", "my boss decides",
            ]),
            influencer_phrases: strings(&[
                "i recommend", "i'm helping", "looking for my boss", "for someone else",
                "evaluating options",
            ]),
            budget_buckets: BudgetBuckets::default(),
        }
    }
}

/// Entity extractor with tables and compiled regexes
pub struct EntityExtractor {
    tables: ExtractorTables,
    name_called: Regex,
    name_owned: Regex,
    name_prefix: Regex,
    dollar_amount: Regex,
    k_amount: Regex,
    context_amount: Regex,
    email: Regex,
    phone: Regex,
}

impl EntityExtractor {
    pub fn new() -> Self {
        Self::with_tables(ExtractorTables::default())
    }

    pub fn with_tables(tables: ExtractorTables) -> Self {
        let extractor = Self {
            tables,
            name_called: Regex::new(r"(?i)(?:called|named)\s+([a-z0-9 '\-]+)").unwrap(),
            name_owned: Regex::new(
                r"(?i)(?:own|have|run|operate)\s+([a-z0-9 '\-]+?)\s+(?:restaurant|salon|gym|spa|cafe|bar|bistro)",
            )
            .unwrap(),
            name_prefix: Regex::new(
                r"(?i)^([a-z0-9 '\-]+?)\s+(?:restaurant|salon|gym|spa|cafe|bar|bistro|fitness)",
            )
            .unwrap(),
            dollar_amount: Regex::new(r"\$\s*(\d{1,3}(?:,\d{3})*|\d+)").unwrap(),
            k_amount: Regex::new(r"(?i)(\d+)k").unwrap(),
            context_amount: Regex::new(r"(?i)(?:around|about|spend|budget|afford)\s+\$?\s*(\d{3,})")
                .unwrap(),
            email: Regex::new(r"([a-zA-Z0-9._\-]+@[a-zA-Z0-9._\-]+\.[a-zA-Z0-9_\-]+)").unwrap(),
            phone: Regex::new(r"(\+?1?\s*\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4})").unwrap(),
        };
        tracing::debug!(
            business_rows = extractor.tables.business_types.len(),
            feature_rows = extractor.tables.features.len(),
            "entity extractor ready"
        );
        extractor
    }

    pub fn tables(&self) -> &ExtractorTables {
        &self.tables
    }

    /// Run all sub-extractors and return whatever each found
    pub fn extract_all(&self, text: &str) -> ConversationProfile {
        let lower = text.to_lowercase();
        ConversationProfile {
            business_type: self.extract_business_type(&lower),
            business_name: self.extract_business_name(text),
            budget_range: self.extract_budget_range(text, &lower),
            timeline_urgency: self.extract_timeline(&lower),
            features_needed: self
                .tables
                .features
                .iter()
                .filter(|row| contains_any(&lower, &row.keywords))
                .map(|row| row.feature)
                .collect(),
            pain_points: self
                .tables
                .pain_points
                .iter()
                .filter(|row| contains_any(&lower, &row.keywords))
                .map(|row| row.pain_point)
                .collect(),
            decision_maker: self.extract_decision_maker(&lower),
            email: self
                .email
                .captures(text)
                .map(|c| c[1].to_string()),
            phone: self
                .phone
                .captures(text)
                .map(|c| c[1].to_string()),
            explicitly_declined: false,
        }
    }

    /// First matching row wins; table order is the documented priority.
    fn extract_business_type(&self, lower: &str) -> Option<BusinessType> {
        self.tables
            .business_types
            .iter()
            .find(|row| contains_any(lower, &row.keywords))
            .map(|row| row.business_type)
    }

    fn extract_business_name(&self, text: &str) -> Option<String> {
        for pattern in [&self.name_called, &self.name_owned, &self.name_prefix] {
            if let Some(captures) = pattern.captures(text) {
                return Some(capitalize_words(captures[1].trim()));
            }
        }
        None
    }

    /// Numeric amounts take precedence; the largest stated amount is
    /// bucketed. Phrasing keywords only apply when no amount was found.
    fn extract_budget_range(&self, text: &str, lower: &str) -> Option<BudgetRange> {
        let mut amounts: Vec<u32> = Vec::new();

        for captures in self.dollar_amount.captures_iter(text) {
            if let Ok(amount) = captures[1].replace(',', "").parse::<u32>() {
                amounts.push(amount);
            }
        }
        for captures in self.k_amount.captures_iter(text) {
            if let Ok(thousands) = captures[1].parse::<u32>() {
                amounts.push(thousands.saturating_mul(1000));
            }
        }
        for captures in self.context_amount.captures_iter(text) {
            if let Ok(amount) = captures[1].parse::<u32>() {
                amounts.push(amount);
            }
        }

        amounts.retain(|a| *a >= self.tables.budget_buckets.min_amount);
        if let Some(max) = amounts.iter().max() {
            return Some(self.tables.budget_buckets.bucket(*max));
        }

        if contains_any(lower, &self.tables.tight_budget) {
            return Some(BudgetRange::Tight);
        }
        if contains_any(lower, &self.tables.flexible_budget) {
            return Some(BudgetRange::Flexible);
        }
        None
    }

    fn extract_timeline(&self, lower: &str) -> Option<TimelineUrgency> {
        self.tables
            .timelines
            .iter()
            .find(|row| contains_any(lower, &row.keywords))
            .map(|row| row.urgency)
    }

    fn extract_decision_maker(&self, lower: &str) -> Option<DecisionMaker> {
        if contains_any(lower, &self.tables.owner_phrases) {
            return Some(DecisionMaker::Owner);
        }
        if contains_any(lower, &self.tables.approval_phrases) {
            return Some(DecisionMaker::NeedsApproval);
        }
        if contains_any(lower, &self.tables.influencer_phrases) {
            return Some(DecisionMaker::Influencer);
        }
        None
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

fn capitalize_words(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
