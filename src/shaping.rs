//! Result shaping applied to upstream lists.
//!
//! Every rule here is a stable filter: surviving items keep their upstream
//! relative order, then the list is cut to the caller's limit. Because the
//! filters drop items, callers over-fetch first (see [`over_fetch`]).

use std::collections::HashSet;

use crate::types::CatalogItem;

/// Largest page size the upstream accepts.
pub const MAX_PAGE_SIZE: usize = 25;

/// Manga formats kept by the "top" view.
pub const TOP_MANGA_TYPES: &[&str] = &["Manga", "Manhwa", "Manhua", "One-shot", "Doujinshi"];

/// Manga formats kept by the "latest" view. Stricter than the top view:
/// Korean, Chinese and self-published works are left out.
pub const LATEST_MANGA_TYPES: &[&str] = &["Manga", "One-shot"];

/// Page size to request so that `limit` items are likely to survive
/// filtering: `min(limit * factor, 25)`.
pub fn over_fetch(limit: usize, factor: usize) -> usize {
    limit.saturating_mul(factor).min(MAX_PAGE_SIZE)
}

/// Whether `text` contains Hiragana (U+3040–U+309F) or Katakana
/// (U+30A0–U+30FF).
///
/// Japanese titles almost always contain kana; Chinese co-productions
/// listed with a Han-only title do not.
pub fn has_native_japanese_script(text: &str) -> bool {
    text.chars()
        .any(|c| matches!(c, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}'))
}

/// Whether an airing entry looks like a Japanese production.
pub fn is_native_production<T: CatalogItem>(item: &T) -> bool {
    let Some(title) = item.native_title() else {
        return false;
    };
    let has_kana = has_native_japanese_script(title);
    // Web releases without kana are overwhelmingly donghua.
    if item.kind() == Some("ONA") && !has_kana {
        return false;
    }
    has_kana
}

/// Keep native productions, in order, up to `limit`.
pub fn retain_native<T: CatalogItem>(items: Vec<T>, limit: usize) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| is_native_production(item))
        .take(limit)
        .collect()
}

/// Keep items whose `type` is in `allowed`, in order, up to `limit`.
/// Items without a type are dropped.
pub fn retain_types<T: CatalogItem>(items: Vec<T>, allowed: &[&str], limit: usize) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| item.kind().is_some_and(|kind| allowed.contains(&kind)))
        .take(limit)
        .collect()
}

/// Drop later repeats of an identifier (first occurrence wins), then cut to
/// `limit`.
pub fn dedup_by_id<T: CatalogItem>(items: Vec<T>, limit: usize) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.mal_id()))
        .take(limit)
        .collect()
}
