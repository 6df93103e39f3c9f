// Placeholder thumbnail selection.
// Stable per repository across sessions via a 32-bit FNV-1a style hash.

use crate::github::Repository;

use super::category::Category;

const WEB_POOL: [&str; 3] = [
    "assets/img/portfolio/app-1.jpg",
    "assets/img/portfolio/app-2.jpg",
    "assets/img/portfolio/app-3.jpg",
];
const UIUX_POOL: [&str; 3] = [
    "assets/img/portfolio/product-1.jpg",
    "assets/img/portfolio/product-2.jpg",
    "assets/img/portfolio/product-3.jpg",
];
const GRAPHICS_POOL: [&str; 3] = [
    "assets/img/portfolio/branding-1.jpg",
    "assets/img/portfolio/branding-2.jpg",
    "assets/img/portfolio/branding-3.jpg",
];
const COPYWRITING_POOL: [&str; 3] = [
    "assets/img/portfolio/books-1.jpg",
    "assets/img/portfolio/books-2.jpg",
    "assets/img/portfolio/books-3.jpg",
];

fn pool(category: Category) -> &'static [&'static str] {
    match category {
        Category::Web => &WEB_POOL,
        Category::UiUx => &UIUX_POOL,
        Category::Graphics => &GRAPHICS_POOL,
        Category::Copywriting => &COPYWRITING_POOL,
    }
}

/// Hash over UTF-16 code units, seeded with the FNV offset basis.
pub fn hash_key(key: &str) -> u32 {
    let mut h: u32 = 2_166_136_261;
    for unit in key.encode_utf16() {
        h ^= u32::from(unit);
        h = h
            .wrapping_add(h << 1)
            .wrapping_add(h << 4)
            .wrapping_add(h << 7)
            .wrapping_add(h << 8)
            .wrapping_add(h << 24);
    }
    h
}

/// Hash key for a repository: its name, or its id when unnamed.
fn repo_key(repo: &Repository) -> String {
    if repo.name.is_empty() {
        repo.id.to_string()
    } else {
        repo.name.clone()
    }
}

/// Pick the placeholder image for a repository in `category`.
pub fn pick(category: Category, repo: &Repository) -> &'static str {
    pick_by_id(category.id(), &repo_key(repo))
}

/// Pick by category id; unknown ids use the web pool.
pub fn pick_by_id(category_id: &str, key: &str) -> &'static str {
    let pool = Category::from_id(category_id).map_or(&WEB_POOL[..], pool);
    pick_from(pool, key)
}

fn pick_from(pool: &'static [&'static str], key: &str) -> &'static str {
    let index = hash_key(key) as usize % pool.len();
    pool[index]
}
