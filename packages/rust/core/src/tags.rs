//! Category-to-tag transformation.
//!
//! Wiki categories double as the catalogue's tags. Administrative categories
//! are dropped, the `Category:` prefix and ` Interviews` suffix are stripped,
//! and the remainder is ordered by a fixed priority list so related media
//! always lead and story-part tags follow in sequence.

/// Administrative/meta categories that never become tags.
pub const EXCLUDED_CATEGORIES: [&str; 2] =
    ["Category:Interviews", "Category:Pages Needing Expansion"];

/// Prefix stripped from every category title.
const CATEGORY_PREFIX: &str = "Category:";

/// Suffix stripped from every category title.
const CATEGORY_SUFFIX: &str = " Interviews";

/// Fixed display order for known tags. Unlisted tags sort after all of
/// these, keeping their original relative order.
pub const TAG_PRIORITY: [&str; 21] = [
    "Manga",
    "Anime",
    "OVA",
    "Film",
    "TV Drama",
    "Video Game",
    "Novel",
    "Music",
    "Part 1",
    "Part 2",
    "Part 3",
    "Part 4",
    "Part 5",
    "Part 6",
    "Part 7",
    "Part 8",
    "Part 9",
    "Thus Spoke Kishibe Rohan",
    "Cool Shock B.T.",
    "Baoh the Visitor",
    "Miscellaneous",
];

/// Turn raw `Category:`-prefixed titles into ordered display tags.
pub fn filter_and_order(raw: Vec<String>) -> Vec<String> {
    let mut tags: Vec<String> = raw
        .into_iter()
        .filter(|category| !EXCLUDED_CATEGORIES.contains(&category.as_str()))
        .map(|category| {
            let tag = category.strip_prefix(CATEGORY_PREFIX).unwrap_or(&category);
            let tag = tag.strip_suffix(CATEGORY_SUFFIX).unwrap_or(tag);
            tag.to_string()
        })
        .collect();

    // Stable sort: ties (all unlisted tags) keep their incoming order.
    tags.sort_by_key(|tag| priority_rank(tag));
    tags
}

fn priority_rank(tag: &str) -> usize {
    TAG_PRIORITY
        .iter()
        .position(|known| *known == tag)
        .unwrap_or(TAG_PRIORITY.len())
}
