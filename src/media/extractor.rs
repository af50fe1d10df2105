use super::types::{MediaItem, MediaKind, MediaReference, ResolutionResult};
use crate::config::ServiceConfig;
use crate::error::ExtractError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// One extraction strategy per known listing-page markup shape.
pub trait ExtractStrategy: Send + Sync {
    /// Human-readable name of the strategy
    fn name(&self) -> &'static str;

    /// Whether this strategy understands pages of the given kind
    fn supports(&self, kind: MediaKind) -> bool;

    /// Extract the ordered item list and page title from the markup
    fn extract(
        &self,
        markup: &str,
        reference: &MediaReference,
    ) -> Result<ResolutionResult, ExtractError>;
}

static TITLE_RE: OnceLock<Regex> = OnceLock::new();

fn title_re() -> &'static Regex {
    TITLE_RE.get_or_init(|| Regex::new(r"(?s)<title>(.*?)</title>").expect("valid title pattern"))
}

/// Derives the display title from the page `<title>`, stripping the
/// configured service suffixes. Falls back to the reference key.
pub(crate) fn page_title(markup: &str, service: &ServiceConfig, key: &str) -> String {
    let captured = title_re()
        .captures(markup)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim());

    let Some(mut title) = captured else {
        return key.to_string();
    };

    for suffix in &service.title_suffixes {
        if let Some(stripped) = title.strip_suffix(suffix.as_str()) {
            title = stripped.trim_end();
            break;
        }
    }

    if title.is_empty() {
        key.to_string()
    } else {
        title.to_string()
    }
}

/// Shared tail of every strategy: drop the album's self-referential first
/// pair, then deduplicate preserving first-seen order.
pub(crate) fn finalize_items(
    mut items: Vec<MediaItem>,
    reference: &MediaReference,
) -> Result<Vec<MediaItem>, ExtractError> {
    // The container's own hash re-matches the item pattern on albums with
    // more than one image; a lone pair equal to the key is a real item.
    if items.len() > 1 && items[0].identifier == reference.key {
        items.remove(0);
    }

    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.clone()));

    if items.is_empty() {
        return Err(ExtractError::EmptyAlbum);
    }
    Ok(items)
}

/// `.jpg?1` -> `.jpg`
pub(crate) fn strip_query_suffix(extension: &str) -> &str {
    match extension.find('?') {
        Some(idx) => &extension[..idx],
        None => extension,
    }
}
