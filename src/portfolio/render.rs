// Card construction for rendered repositories.
// Produces view models the TUI draws; no I/O happens here.

use std::sync::LazyLock;

use chrono::{DateTime, Local, Locale, NaiveDate};

use crate::github::Repository;

use super::category::Category;
use super::thumbnail;

/// Shown when a repository has no description.
pub const NO_DESCRIPTION: &str = "No description provided.";
/// Language badge text when GitHub reports none.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// A rendered repository card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub category: Category,
    pub owner: String,
    pub repo_name: String,
    /// Link target for both thumbnail and title.
    pub html_url: String,
    pub thumbnail: String,
    pub thumbnail_alt: String,
    pub title: String,
    pub language: String,
    pub stars: u64,
    pub fork: bool,
    pub description: String,
    pub updated: String,
    /// Cleared when the card does not match the search query.
    pub visible: bool,
}

impl Card {
    /// Visible text of the card, in display order.
    pub fn text_content(&self) -> String {
        let mut parts = vec![
            self.title.clone(),
            self.language.clone(),
            self.stars.to_string(),
        ];
        if self.fork {
            parts.push("fork".to_string());
        }
        parts.push(self.description.clone());
        parts.push(self.updated.clone());
        parts.join(" ")
    }

    /// Whether the card matches an already lowercased search query.
    pub fn matches(&self, query_lower: &str) -> bool {
        query_lower.is_empty() || self.text_content().to_lowercase().contains(query_lower)
    }
}

/// An entry in a category container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardSlot {
    /// Content-free placeholder while the repository list is in flight.
    Skeleton,
    Card(Card),
}

impl CardSlot {
    pub fn card(&self) -> Option<&Card> {
        match self {
            CardSlot::Card(card) => Some(card),
            CardSlot::Skeleton => None,
        }
    }

    pub fn card_mut(&mut self) -> Option<&mut Card> {
        match self {
            CardSlot::Card(card) => Some(card),
            CardSlot::Skeleton => None,
        }
    }
}

/// `count` skeleton placeholders.
pub fn skeletons(count: usize) -> Vec<CardSlot> {
    vec![CardSlot::Skeleton; count]
}

/// Build the card for a repository already classified into `category`.
pub fn render_card(repo: &Repository, category: Category) -> Card {
    let description = repo
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(NO_DESCRIPTION);

    Card {
        category,
        owner: repo.owner.login.clone(),
        repo_name: repo.name.clone(),
        html_url: repo.html_url.clone(),
        thumbnail: thumbnail::pick(category, repo).to_string(),
        thumbnail_alt: format!("{} thumbnail", repo.name),
        title: repo.name.clone(),
        language: repo
            .language
            .clone()
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
        stars: repo.stargazers_count,
        fork: repo.fork,
        description: description.to_string(),
        updated: format_date(&repo.updated_at),
        visible: true,
    }
}

/// Locale for card dates, read once from the environment.
static DATE_LOCALE: LazyLock<Locale> = LazyLock::new(env_locale);

/// First non-empty of `LC_ALL`, `LC_TIME`, `LANG`; POSIX if it names no known locale.
fn env_locale() -> Locale {
    ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|value| parse_locale(&value))
        .unwrap_or(Locale::POSIX)
}

/// Locale from a POSIX locale string such as `de_DE.UTF-8@euro`.
fn parse_locale(value: &str) -> Option<Locale> {
    let name = value.split(['.', '@']).next().unwrap_or(value);
    Locale::try_from(name).ok()
}

/// Format an API timestamp as a date in the user's locale, or return it unchanged.
pub fn format_date(raw: &str) -> String {
    format_date_in(raw, *DATE_LOCALE)
}

/// Format an RFC 3339 timestamp or `YYYY-MM-DD` date with the locale's date format.
pub fn format_date_in(raw: &str, locale: Locale) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt
            .with_timezone(&Local)
            .format_localized("%x", locale)
            .to_string();
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.format_localized("%x", locale).to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::test_repo;

    #[test]
    fn test_render_card_fields() {
        let mut repo = test_repo("my-ui-kit");
        repo.language = Some("TypeScript".to_string());
        repo.stargazers_count = 9;
        repo.description = Some("Figma prototypes".to_string());

        let card = render_card(&repo, Category::UiUx);

        assert_eq!(card.title, "my-ui-kit");
        assert_eq!(card.html_url, "https://github.com/alice/my-ui-kit");
        assert_eq!(card.thumbnail_alt, "my-ui-kit thumbnail");
        assert!(card.thumbnail.starts_with("assets/img/portfolio/product-"));
        assert_eq!(card.language, "TypeScript");
        assert_eq!(card.stars, 9);
        assert!(!card.fork);
        assert_eq!(card.description, "Figma prototypes");
        assert!(card.visible);
    }

    #[test]
    fn test_render_card_placeholders() {
        let mut repo = test_repo("bare");
        repo.fork = true;
        repo.description = Some(String::new());

        let card = render_card(&repo, Category::Web);

        assert_eq!(card.language, UNKNOWN_LANGUAGE);
        assert_eq!(card.description, NO_DESCRIPTION);
        assert!(card.fork);
        assert!(card.text_content().contains("fork"));
    }

    #[test]
    fn test_format_date_follows_locale() {
        assert_eq!(
            format_date_in("2024-03-15T12:00:00Z", Locale::de_DE),
            "15.03.2024"
        );
        assert_eq!(format_date_in("2024-03-15", Locale::de_DE), "15.03.2024");
        assert_eq!(format_date_in("2024-03-15", Locale::en_US), "03/15/2024");
        assert_eq!(format_date_in("2024-03-15", Locale::POSIX), "03/15/24");
    }

    #[test]
    fn test_format_date_keeps_unparsable() {
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date_in("2024-13-40", Locale::de_DE), "2024-13-40");
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!(parse_locale("de_DE.UTF-8"), Some(Locale::de_DE));
        assert_eq!(parse_locale("fr_FR@euro"), Some(Locale::fr_FR));
        assert_eq!(parse_locale("en_US"), Some(Locale::en_US));
        assert_eq!(parse_locale("klingon"), None);
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let mut repo = test_repo("Landing-Page");
        repo.description = Some("Marketing site".to_string());
        let card = render_card(&repo, Category::Web);

        assert!(card.matches("landing"));
        assert!(card.matches("marketing"));
        assert!(card.matches(""));
        assert!(!card.matches("figma"));
    }

    #[test]
    fn test_skeletons() {
        let slots = skeletons(3);
        assert_eq!(slots.len(), 3);
        assert!(slots.iter().all(|s| s.card().is_none()));
    }
}
