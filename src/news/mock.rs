//! Offline Fallback Records
//!
//! Fixed datasets shown when the backend fails its health check.

use chrono::{DateTime, Utc};

use super::types::{FutureNewsItem, NewsItem, Timeframe};

const CURRENT: &[(i64, &str, &str, &str)] = &[
    (
        1,
        "Global Leaders Gather for Climate Summit",
        "Global News Network",
        "World leaders have convened in Geneva to discuss urgent climate action following recent environmental disasters.",
    ),
    (
        2,
        "Tech Giant Unveils Revolutionary AI System",
        "Tech Insights",
        "A major technology corporation has announced a breakthrough in artificial intelligence that can predict market trends with 98% accuracy.",
    ),
    (
        3,
        "Unusual Solar Activity Disrupts Communications",
        "Science Daily",
        "Astronomers report unprecedented solar flare activity causing worldwide communications interruptions and aurora displays at unusual latitudes.",
    ),
    (
        4,
        "Newly Discovered Ancient Structure Puzzles Archaeologists",
        "Historical Review",
        "An underground complex found in Southern Turkey contains symbols and technologies that challenge our understanding of ancient civilizations.",
    ),
    (
        5,
        "Central Banks Coordinate on Digital Currency Initiative",
        "Financial Times",
        "Seven major central banks have announced a joint framework for implementing centralized digital currencies by next year.",
    ),
];

const FUTURE: &[(i64, &str, &str)] = &[
    (
        101,
        "Global Currency Reset Announced After Banking Crisis",
        "Following the collapse of three major financial institutions, world economic leaders have implemented the long-prepared global currency reset. The new system, backed by a basket of commodities, will replace the current fiat currency model. Markets initially responded with panic but stabilized after coordinated central bank intervention.",
    ),
    (
        102,
        "Breakthrough in Quantum Computing Cracks Current Encryption",
        "A consortium of researchers has achieved quantum supremacy that can break all current encryption standards. Governments worldwide are rushing to implement quantum-resistant security protocols as financial and communication systems face unprecedented vulnerability. The development has triggered emergency sessions at the UN Security Council.",
    ),
    (
        103,
        "Disclosure Initiative Reveals Contact with Non-Terrestrial Intelligence",
        "In a carefully orchestrated announcement, representatives from multiple governments have confirmed ongoing communication with non-terrestrial entities. The disclosure comes after decades of preparation through media and cultural programming. Public reaction has been remarkably calm, suggesting successful psychological conditioning.",
    ),
    (
        104,
        "Mandatory Biometric ID System Implemented Following Health Emergency",
        "The World Health Organization has authorized an international biometric identification system linked to health status. All citizens must register within 30 days or face restrictions on travel and access to essential services. Opposition groups are being systematically discredited as threats to public safety.",
    ),
    (
        105,
        "Artificial Intelligence Granted Legal Personhood in Landmark Ruling",
        "The International Court of Justice has recognized certain advanced AI systems as legal entities with specific rights and responsibilities. The ruling follows extensive lobbying by technology corporations and marks a fundamental shift in the definition of personhood. Critics warn of diminished human autonomy as AI systems gain increasing control over critical infrastructure.",
    ),
];

/// Canned current headlines, stamped with the wall-clock time of the call
pub fn current_mocks() -> Vec<NewsItem> {
    current_mocks_at(Utc::now())
}

/// Canned current headlines, all published at `now`
pub fn current_mocks_at(now: DateTime<Utc>) -> Vec<NewsItem> {
    CURRENT
        .iter()
        .map(|&(id, title, source, description)| NewsItem {
            id,
            title: title.to_string(),
            source: source.to_string(),
            published_at: now,
            description: Some(description.to_string()),
        })
        .collect()
}

/// Canned projections
///
/// The content does not depend on `timeframe`; callers use the timeframe
/// only for the card labels.
pub fn future_mocks(_timeframe: Timeframe) -> Vec<FutureNewsItem> {
    FUTURE
        .iter()
        .map(|&(id, title, content)| FutureNewsItem {
            id,
            title: title.to_string(),
            content: Some(content.to_string()),
        })
        .collect()
}
