//! Subscription categories and keyword-based detection.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::EngineError;

/// Fixed set of categories a subscription can belong to.
///
/// Declaration order is used as the stable order in reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Entertainment,
    Productivity,
    Cloud,
    Education,
    Business,
    Home,
    Health,
    News,
    Transport,
    Food,
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Entertainment,
        Category::Productivity,
        Category::Cloud,
        Category::Education,
        Category::Business,
        Category::Home,
        Category::Health,
        Category::News,
        Category::Transport,
        Category::Food,
        Category::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Entertainment => "entertainment",
            Category::Productivity => "productivity",
            Category::Cloud => "cloud",
            Category::Education => "education",
            Category::Business => "business",
            Category::Home => "home",
            Category::Health => "health",
            Category::News => "news",
            Category::Transport => "transport",
            Category::Food => "food",
            Category::Other => "other",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Category::Entertainment => "🎬",
            Category::Productivity => "🛠️",
            Category::Cloud => "☁️",
            Category::Education => "📚",
            Category::Business => "💼",
            Category::Home => "🏠",
            Category::Health => "❤️",
            Category::News => "📰",
            Category::Transport => "🚗",
            Category::Food => "🍔",
            Category::Other => "📦",
        }
    }

    /// Name with the first letter upper-cased, used as a list header.
    #[must_use]
    pub fn title(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == key)
            .ok_or_else(|| EngineError::KeyNotFound(format!("category {key}")))
    }
}

// Records written with a category outside the fixed set are read back as `Other`.
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(Category::Other))
    }
}

/// Keyword table, first matching category wins.
const KEYWORDS: [(Category, &[&str]); 10] = [
    (
        Category::Entertainment,
        &[
            "netflix",
            "spotify",
            "disney",
            "hulu",
            "hbo",
            "youtube",
            "prime",
            "apple music",
            "twitch",
            "audible",
            "kindle",
        ],
    ),
    (
        Category::Productivity,
        &[
            "notion", "slack", "jira", "trello", "asana", "monday", "clickup", "linear", "obsidian",
        ],
    ),
    (
        Category::Cloud,
        &[
            "aws",
            "azure",
            "google cloud",
            "dropbox",
            "icloud",
            "drive",
            "cloud",
            "firebase",
            "supabase",
        ],
    ),
    (
        Category::Education,
        &[
            "coursera",
            "udemy",
            "masterclass",
            "skillshare",
            "linkedin learning",
            "edx",
            "khan",
            "duolingo",
            "babbel",
        ],
    ),
    (
        Category::Business,
        &[
            "figma", "adobe", "github", "canva", "zoom", "webex", "blue", "miro", "mural",
        ],
    ),
    (
        Category::Home,
        &["ring", "nest", "ecobee", "smart", "security", "camera", "home"],
    ),
    (
        Category::Health,
        &[
            "fitbit",
            "myfitnesspal",
            "calm",
            "headspace",
            "whoop",
            "oura",
            "strava",
            "garmin",
            "yoga",
            "fitness",
        ],
    ),
    (
        Category::News,
        &[
            "newspaper",
            "magazine",
            "times",
            "post",
            "guardian",
            "economist",
            "washington",
            "nytimes",
        ],
    ),
    (
        Category::Transport,
        &[
            "uber", "lyft", "bolt", "car2go", "share now", "deutsche", "bahn", "vvs",
        ],
    ),
    (
        Category::Food,
        &[
            "doordash",
            "ubereats",
            "hellofresh",
            "blue apron",
            "grubhub",
            "delivery",
            "glovo",
            "lieferando",
        ],
    ),
];

/// Guesses the category of a subscription from its name.
///
/// The lower-cased name is matched by substring against [`KEYWORDS`] in table
/// order, so "Uber Eats" lands in transport before food is tried.
#[must_use]
pub fn detect_category(name: &str) -> Category {
    let lower = name.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map_or(Category::Other, |(category, _)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_known_services() {
        assert_eq!(detect_category("Netflix"), Category::Entertainment);
        assert_eq!(detect_category("AWS"), Category::Cloud);
        assert_eq!(detect_category("Duolingo Plus"), Category::Education);
        assert_eq!(detect_category("HelloFresh"), Category::Food);
    }

    #[test]
    fn first_table_entry_wins() {
        // "ubereats" contains "uber", transport is listed before food.
        assert_eq!(detect_category("UberEats"), Category::Transport);
        // "blue apron" contains "blue", business is listed before food.
        assert_eq!(detect_category("Blue Apron"), Category::Business);
    }

    #[test]
    fn unknown_name_is_other() {
        assert_eq!(detect_category("Gym membership"), Category::Other);
        assert_eq!(detect_category(""), Category::Other);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Cloud".parse::<Category>().unwrap(), Category::Cloud);
        assert!("monthly".parse::<Category>().is_err());
    }

    #[test]
    fn unknown_category_in_json_reads_as_other() {
        let parsed: Category = serde_json::from_str("\"gaming\"").unwrap();
        assert_eq!(parsed, Category::Other);
        assert_eq!(serde_json::to_string(&Category::Food).unwrap(), "\"food\"");
    }

    #[test]
    fn title_capitalizes() {
        assert_eq!(Category::Entertainment.title(), "Entertainment");
    }
}
