//! Intent pattern library
//!
//! One declarative pattern table per intent: literal phrases for the exact
//! layer, weighted keywords for the scoring layer. The tables are plain
//! serde data so deployments can ship edited copies without touching the
//! matching code.

use chatbot_core::IntentKind;
use serde::{Deserialize, Serialize};

/// Match data for one intent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentPattern {
    /// Literal phrases; lowercased trimmed input equality, and the corpus
    /// for n-gram containment
    #[serde(default)]
    pub exact: Vec<String>,
    /// Strong keywords
    #[serde(default)]
    pub primary: Vec<String>,
    /// Supporting keywords
    #[serde(default)]
    pub secondary: Vec<String>,
    /// Keywords that argue against this intent
    #[serde(default)]
    pub negative: Vec<String>,
}

/// One library row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentEntry {
    pub kind: IntentKind,
    pub pattern: IntentPattern,
}

/// The complete pattern library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentLibrary {
    pub entries: Vec<IntentEntry>,
}

impl IntentLibrary {
    pub fn iter(&self) -> impl Iterator<Item = &IntentEntry> {
        self.entries.iter()
    }

    pub fn pattern(&self, kind: IntentKind) -> Option<&IntentPattern> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| &e.pattern)
    }
}

fn entry(
    kind: IntentKind,
    exact: &[&str],
    primary: &[&str],
    secondary: &[&str],
    negative: &[&str],
) -> IntentEntry {
    let to_vec = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect();
    IntentEntry {
        kind,
        pattern: IntentPattern {
            exact: to_vec(exact),
            primary: to_vec(primary),
            secondary: to_vec(secondary),
            negative: to_vec(negative),
        },
    }
}

impl Default for IntentLibrary {
    fn default() -> Self {
        use IntentKind::*;
        Self {
            entries: vec![
                entry(
                    Greeting,
                    &[
                        "hi", "hello", "hey", "hola", "howdy", "greetings", "good morning",
                        "good afternoon", "good evening", "what's up", "whats up", "sup",
                    ],
                    &["hi", "hello", "hey", "hola", "greet"],
                    &["morning", "afternoon", "evening", "day"],
                    &[],
                ),
                entry(
                    GetStarted,
                    &[
                        "i need a website", "i want a website", "i'm looking for a website",
                        "need a site", "want a site", "looking for a site", "build me a website",
                        "create a website", "make me a website", "can you build",
                        "can you create", "can you make",
                    ],
                    &[
                        "need", "want", "looking", "build", "create", "make", "develop", "design",
                    ],
                    &["website", "site", "web", "page", "online", "presence", "platform"],
                    &["don't", "not", "no", "never"],
                ),
                entry(
                    PricingInquiry,
                    &[
                        "how much", "how much does it cost", "what does it cost",
                        "what's the price", "whats the price", "how much is it", "cost", "price",
                        "pricing", "rates", "fees", "how expensive", "is this affordable",
                        "affordable",
                    ],
                    &[
                        "cost", "price", "pricing", "expensive", "cheap", "afford", "pay", "fee",
                        "rate", "affordable",
                    ],
                    &["much", "money", "dollar", "budget", "investment", "this"],
                    &[],
                ),
                entry(
                    PackageComparison,
                    &[
                        "what's the difference", "whats the difference", "difference between",
                        "compare packages", "compare plans", "which package", "which plan",
                        "essential vs professional", "professional vs premium", "what's better",
                        "whats better", "which is better",
                    ],
                    &["difference", "compare", "comparison", "better", "best", "recommend"],
                    &["package", "plan", "tier", "option", "between", "versus", "vs"],
                    &[],
                ),
                entry(
                    EssentialDetails,
                    &[
                        "tell me about essential", "what is essential", "essential package",
                        "cheapest option", "basic package", "basic plan", "starter package",
                    ],
                    &["essential", "basic", "starter", "cheap", "minimum", "simplest"],
                    &["package", "plan", "tier", "option"],
                    &[],
                ),
                entry(
                    ProfessionalDetails,
                    &[
                        "tell me about professional", "what is professional",
                        "professional package", "middle option", "mid-tier", "standard package",
                    ],
                    &["professional", "standard", "middle", "mid"],
                    &["package", "plan", "tier", "option"],
                    &[],
                ),
                entry(
                    PremiumDetails,
                    &[
                        "tell me about premium", "what is premium", "premium package",
                        "best package", "most expensive", "top tier", "complete package",
                    ],
                    &["premium", "best", "top", "complete", "full", "ultimate", "advanced"],
                    &["package", "plan", "tier", "option"],
                    &[],
                ),
                entry(
                    TimelineInquiry,
                    &[
                        "how long", "how long does it take", "when can i get it",
                        "delivery time", "turnaround time", "how fast", "how quickly", "asap",
                        "urgent", "rush", "how long will it take",
                    ],
                    &[
                        "long", "fast", "quick", "soon", "when", "time", "delivery",
                        "turnaround", "deadline", "take",
                    ],
                    &["ready", "done", "finish", "complete", "launch", "will", "it", "how"],
                    &[],
                ),
                entry(
                    UrgentTimeline,
                    &[
                        "asap", "as soon as possible", "urgent", "urgently", "rush",
                        "i need it now", "i need it fast", "yesterday", "immediately",
                    ],
                    &[
                        "asap", "urgent", "rush", "immediately", "now", "fast", "quick",
                        "yesterday",
                    ],
                    &["need", "want", "deadline", "hurry"],
                    &[],
                ),
                entry(
                    RestaurantMention,
                    &[
                        "i own a restaurant", "i have a restaurant", "i run a restaurant",
                        "my restaurant", "for my restaurant", "restaurant owner",
                    ],
                    &["restaurant", "cafe", "bistro", "diner", "eatery", "food", "dining"],
                    &["own", "have", "run", "manage", "operate"],
                    &[],
                ),
                entry(
                    SalonMention,
                    &[
                        "i own a salon", "i have a salon", "i run a salon", "my salon",
                        "for my salon", "salon owner", "hair salon", "beauty salon",
                        "my salon needs", "my salon needs a website",
                    ],
                    &["salon", "spa", "beauty", "hair", "barber", "stylist"],
                    &["own", "have", "run", "manage", "operate", "my", "needs"],
                    &[],
                ),
                entry(
                    FitnessMention,
                    &[
                        "i own a gym", "i have a gym", "i run a gym", "my gym", "for my gym",
                        "gym owner", "fitness center", "yoga studio",
                    ],
                    &["gym", "fitness", "yoga", "pilates", "crossfit", "training", "workout"],
                    &["own", "have", "run", "manage", "operate", "studio", "center"],
                    &[],
                ),
                entry(
                    AiChatbotInquiry,
                    &[
                        "tell me about ai", "what is the ai chatbot", "how does the ai work",
                        "ai features", "chatbot", "virtual assistant", "do you do ai chatbots",
                        "ai chatbot", "do you do chatbots",
                    ],
                    &["ai", "chatbot", "bot", "assistant", "automation", "automated", "chatbots"],
                    &["feature", "work", "does", "help", "answer", "customer", "do", "you"],
                    &[],
                ),
                entry(
                    OnlineOrderingNeed,
                    &[
                        "i need online ordering", "online orders", "order online",
                        "customers order online", "delivery orders", "takeout orders",
                    ],
                    &["ordering", "order", "delivery", "takeout", "pickup", "doordash", "uber"],
                    &["online", "customer", "food", "menu"],
                    &[],
                ),
                entry(
                    OnlineBookingNeed,
                    &[
                        "i need online booking", "online appointments", "book appointments",
                        "customers book online", "reservation system", "scheduling",
                        "i want online booking", "online booking", "book online",
                    ],
                    &["booking", "appointment", "reservation", "schedule", "calendar", "book"],
                    &["online", "customer", "time", "slot", "want", "need"],
                    &[],
                ),
                entry(
                    SeoInquiry,
                    &[
                        "seo", "search engine optimization", "google ranking",
                        "show up on google", "get found online", "ranking",
                    ],
                    &["seo", "google", "search", "ranking", "visibility", "traffic", "found"],
                    &["engine", "optimization", "result", "page"],
                    &[],
                ),
                entry(
                    NoWebsite,
                    &[
                        "i don't have a website", "i have no website", "no online presence",
                        "not online", "no web presence",
                    ],
                    &["no", "don't", "doesn't", "without", "need"],
                    &["website", "site", "online", "presence", "web"],
                    &[],
                ),
                entry(
                    OutdatedWebsite,
                    &[
                        "my website is outdated", "old website", "looks old", "from 2010",
                        "ancient website", "needs updating",
                    ],
                    &["outdated", "old", "ancient", "dated", "ugly", "terrible"],
                    &["website", "site", "design", "looks"],
                    &[],
                ),
                entry(
                    LosingCustomers,
                    &[
                        "losing customers", "losing business", "competitors winning",
                        "customers go elsewhere", "losing to competitors",
                    ],
                    &["losing", "lost", "miss", "missing"],
                    &["customer", "business", "sale", "competitor", "elsewhere"],
                    &[],
                ),
                entry(
                    BudgetConcern,
                    &[
                        "too expensive", "can't afford", "out of budget", "over budget",
                        "that's a lot", "too much money", "cheaper option", "discount",
                        "this is too expensive",
                    ],
                    &[
                        "expensive", "afford", "budget", "cheap", "cheaper", "discount", "deal",
                        "too",
                    ],
                    &["much", "cost", "price", "money", "pay", "this", "is"],
                    &[],
                ),
                entry(
                    BudgetTight,
                    &[
                        "tight budget", "limited budget", "small budget", "low budget",
                        "under $2000", "under 2k", "less than $2000", "i have a tight budget",
                    ],
                    &["tight", "limited", "small", "low", "under", "less"],
                    &["budget", "money", "afford", "spend", "have"],
                    &[],
                ),
                entry(
                    BudgetFlexible,
                    &[
                        "flexible budget", "no budget limit", "whatever it takes",
                        "not concerned about price", "money is not an issue",
                        "worth the investment",
                    ],
                    &["flexible", "no limit", "whatever", "worth", "invest", "value"],
                    &["budget", "concern", "issue", "problem"],
                    &["concern", "worry", "issue"],
                ),
                entry(
                    NotReady,
                    &[
                        "i'm not ready", "not ready yet", "just looking", "just browsing",
                        "still thinking", "need to think", "let me think about it",
                    ],
                    &["not ready", "just", "thinking", "considering", "browsing", "looking"],
                    &["maybe", "later", "soon", "future"],
                    &[],
                ),
                entry(
                    NeedApproval,
                    &[
                        "need to ask", "check with", "talk to my partner", "ask my boss",
                        "not the decision maker", "need approval",
                    ],
                    &["ask", "check", "talk", "approval", "permission", "boss", "partner"],
                    &["need", "have to", "must", "should"],
                    &[],
                ),
                entry(
                    ReadyToStart,
                    &[
                        "let's do it", "let's get started", "i'm ready", "i want to start",
                        "sign me up", "let's go", "i'm in", "yes let's do this",
                        "where do i sign", "how do i get started", "i'm ready to get started",
                        "ready to get started",
                    ],
                    &["ready", "start", "begin", "sign", "yes", "go", "proceed", "started"],
                    &["let's", "want", "get", "now", "i'm", "to"],
                    &["not", "don't", "no"],
                ),
                entry(
                    QuoteRequest,
                    &[
                        "send me a quote", "get a quote", "i want a quote", "send proposal",
                        "get pricing", "send me pricing",
                    ],
                    &["quote", "proposal", "estimate", "pricing", "details"],
                    &["send", "get", "want", "need", "email"],
                    &[],
                ),
                entry(
                    PaymentPlanInquiry,
                    &[
                        "payment plan", "monthly payments", "pay in installments",
                        "split payment", "can i pay monthly", "financing",
                    ],
                    &[
                        "payment", "pay", "monthly", "installment", "plan", "financing", "split",
                    ],
                    &["how", "can", "option", "available"],
                    &[],
                ),
                entry(
                    SeeExamples,
                    &[
                        "show me examples", "can i see examples", "demo", "sample",
                        "portfolio", "previous work", "past projects", "case studies",
                    ],
                    &["example", "demo", "sample", "portfolio", "show", "see", "look"],
                    &["work", "project", "site", "website"],
                    &[],
                ),
                entry(
                    SupportInquiry,
                    &[
                        "do you provide support", "customer support", "help after launch",
                        "ongoing support", "maintenance", "updates",
                    ],
                    &["support", "help", "assist", "maintenance", "update", "fix", "bug"],
                    &["after", "ongoing", "continue", "service"],
                    &[],
                ),
                entry(
                    Gratitude,
                    &[
                        "thank you", "thanks", "thank you so much", "thanks a lot",
                        "appreciate it", "thanks for your help", "helpful",
                    ],
                    &["thank", "thanks", "appreciate", "grateful", "helpful"],
                    &["you", "much", "lot", "help"],
                    &[],
                ),
                entry(
                    NotInterested,
                    &[
                        "not interested", "no thanks", "no thank you", "i'll pass",
                        "not for me", "maybe later",
                    ],
                    &["not interested", "no", "pass", "later", "nevermind", "forget"],
                    &["thanks", "thank you"],
                    &[],
                ),
                entry(
                    Goodbye,
                    &[
                        "bye", "goodbye", "bye bye", "see you", "see ya", "talk later",
                        "gotta go", "have a good one",
                    ],
                    &["bye", "goodbye", "farewell"],
                    &["see", "later", "go"],
                    &[],
                ),
                entry(
                    Clarification,
                    &[
                        "what do you mean", "i don't understand", "can you explain",
                        "confused", "huh", "what",
                    ],
                    &["mean", "understand", "explain", "confused", "clarify", "huh", "what"],
                    &["can you", "don't", "not sure"],
                    &[],
                ),
                entry(
                    CompetitorComparison,
                    &[
                        "vs wix", "vs squarespace", "vs wordpress", "vs shopify",
                        "better than wix", "compared to squarespace",
                    ],
                    &["wix", "squarespace", "wordpress", "shopify", "weebly", "godaddy"],
                    &["vs", "versus", "compared", "better", "difference"],
                    &[],
                ),
                entry(
                    OwnershipInquiry,
                    &[
                        "do i own the website", "who owns the website", "is it mine",
                        "do i own the code", "intellectual property", "ownership",
                    ],
                    &["own", "ownership", "mine", "belong", "rights", "property"],
                    &["website", "code", "design", "content"],
                    &[],
                ),
                entry(
                    MobileInquiry,
                    &[
                        "mobile friendly", "mobile responsive", "works on mobile",
                        "works on phone", "responsive", "mobile version",
                    ],
                    &["mobile", "phone", "responsive", "tablet", "ipad", "device"],
                    &["friendly", "work", "version", "compatible"],
                    &[],
                ),
                entry(
                    HostingInquiry,
                    &[
                        "do you provide hosting", "web hosting", "server",
                        "where is it hosted", "hosting included", "domain",
                    ],
                    &["hosting", "host", "server", "domain", "url", "address"],
                    &["provide", "include", "need", "where"],
                    &[],
                ),
                entry(
                    CustomDesignInquiry,
                    &[
                        "custom design", "unique design", "not a template",
                        "tailored to my brand", "personalized", "custom made",
                    ],
                    &["custom", "unique", "personalized", "tailored", "brand", "specific"],
                    &["design", "look", "style", "template"],
                    &["template", "generic"],
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_has_match_data() {
        let library = IntentLibrary::default();
        for entry in library.iter() {
            assert!(
                !entry.pattern.exact.is_empty() || !entry.pattern.primary.is_empty(),
                "{} has no patterns",
                entry.kind
            );
        }
    }

    #[test]
    fn test_no_duplicate_intents() {
        let library = IntentLibrary::default();
        let mut kinds: Vec<_> = library.iter().map(|e| e.kind).collect();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), library.entries.len());
    }

    #[test]
    fn test_reserved_intents_have_no_patterns() {
        let library = IntentLibrary::default();
        assert!(library.pattern(IntentKind::Unknown).is_none());
        assert!(library.pattern(IntentKind::InvalidInput).is_none());
    }

    #[test]
    fn test_lookup() {
        let library = IntentLibrary::default();
        let greeting = library.pattern(IntentKind::Greeting).unwrap();
        assert!(greeting.exact.iter().any(|p| p == "hello"));
    }
}
