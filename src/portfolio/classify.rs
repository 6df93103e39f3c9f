// Repository classifier.
// Keyword heuristic over name, description, and language.

use crate::github::Repository;

use super::category::Category;

const UI_KEYWORDS: &[&str] = &["figma", "prototype", "ui", "ux", "design", "wireframe"];
const COPY_KEYWORDS: &[&str] = &["copy", "content", "blog", "newsletter", "post", "article"];
const GRAPHIC_KEYWORDS: &[&str] = &[
    "logo",
    "brand",
    "illustration",
    "graphics",
    "poster",
    "svg",
    "design",
];
const WEB_LANGUAGES: &[&str] = &[
    "javascript",
    "typescript",
    "html",
    "css",
    "php",
    "ruby",
    "python",
    "go",
];

/// Sort a repository into a category.
///
/// Keyword groups are tried in priority order (UI/UX, copywriting, graphics)
/// with plain substring matching, so "webdesign" matches "design". Anything
/// unmatched lands in `Web`.
pub fn classify(repo: &Repository) -> Category {
    let lang = repo.language.as_deref().unwrap_or("").to_lowercase();
    let text = format!(
        "{} {} {}",
        repo.name.to_lowercase(),
        repo.description.as_deref().unwrap_or("").to_lowercase(),
        lang
    );

    let matches_any = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    if matches_any(UI_KEYWORDS) {
        return Category::UiUx;
    }
    if matches_any(COPY_KEYWORDS) {
        return Category::Copywriting;
    }
    if matches_any(GRAPHIC_KEYWORDS) {
        return Category::Graphics;
    }

    // Both branches resolve to Web until languages map elsewhere.
    if WEB_LANGUAGES.contains(&lang.as_str()) {
        return Category::Web;
    }

    Category::Web
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::test_repo;

    fn repo(name: &str, description: &str, language: Option<&str>) -> Repository {
        Repository {
            description: Some(description.to_string()),
            language: language.map(str::to_string),
            ..test_repo(name)
        }
    }

    #[test]
    fn test_keyword_beats_language() {
        let r = repo("my-ui-kit", "figma prototypes", Some("JavaScript"));
        assert_eq!(classify(&r), Category::UiUx);
    }

    #[test]
    fn test_copywriting_by_name() {
        let r = repo("blog-posts", "", Some("Markdown"));
        assert_eq!(classify(&r), Category::Copywriting);
    }

    #[test]
    fn test_graphics_keywords() {
        let r = repo("brand-kit", "Logo set", None);
        assert_eq!(classify(&r), Category::Graphics);
    }

    #[test]
    fn test_priority_ui_over_graphics() {
        // "design" is in both the UI/UX and graphics groups.
        let r = repo("poster-design", "", None);
        assert_eq!(classify(&r), Category::UiUx);
    }

    #[test]
    fn test_partial_word_matches_are_kept() {
        // "build" contains "ui".
        let r = repo("build-tools", "", Some("Rust"));
        assert_eq!(classify(&r), Category::UiUx);
    }

    #[test]
    fn test_language_fallback_is_always_web() {
        assert_eq!(
            classify(&repo("tracker", "", Some("Python"))),
            Category::Web
        );
        assert_eq!(classify(&repo("kernel", "", Some("Rust"))), Category::Web);
        assert_eq!(classify(&repo("misc", "", None)), Category::Web);
    }

    #[test]
    fn test_missing_description() {
        let mut r = test_repo("newsletter");
        r.description = None;
        assert_eq!(classify(&r), Category::Copywriting);
    }

    #[test]
    fn test_deterministic() {
        let r = repo("svg-icons", "icon set", Some("CSS"));
        let first = classify(&r);
        for _ in 0..10 {
            assert_eq!(classify(&r), first);
        }
        assert!(Category::ALL.contains(&first));
    }
}
