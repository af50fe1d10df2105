use super::types::{MediaKind, MediaReference};
use crate::config::ServiceConfig;
use crate::error::ResolveError;
use url::Url;

/// Parses an input URL into a typed media reference.
///
/// Recognized path shapes: `/{key}[.ext]` (single image, direct media when
/// the extension is a known one), `/a/{key}` (album), `/gallery/{key}`
/// (gallery) and `/r/{category}/{key}` (subreddit-filed item). Fragments
/// like `#6` are ignored. Anything else is rejected.
pub fn classify(input: &str, service: &ServiceConfig) -> Result<MediaReference, ResolveError> {
    let parsed =
        Url::parse(input).map_err(|_| ResolveError::InvalidUrl(input.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ResolveError::InvalidUrl(input.to_string()));
    }

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|split| split.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let (kind, key, explicit_extension) = match segments.as_slice() {
        [name] => {
            let (key, extension) = split_media_suffix(name, service);
            (MediaKind::Single, key, extension)
        }
        ["a", key] => (MediaKind::Album, *key, None),
        ["gallery", key] => (MediaKind::Gallery, *key, None),
        ["r", _category, key] => (MediaKind::Subreddit, *key, None),
        _ => return Err(ResolveError::InvalidUrl(input.to_string())),
    };

    if !is_valid_key(key) {
        return Err(ResolveError::InvalidUrl(input.to_string()));
    }

    Ok(MediaReference {
        kind,
        key: key.to_string(),
        explicit_extension,
        url: input.to_string(),
    })
}

/// Splits a known media extension off a path segment, leaving unknown
/// suffixes attached so the alphabet check can reject them.
fn split_media_suffix<'a>(name: &'a str, service: &ServiceConfig) -> (&'a str, Option<String>) {
    if let Some(dot) = name.rfind('.') {
        let (stem, extension) = name.split_at(dot);
        if service.is_media_extension(extension) {
            return (stem, Some(extension.to_string()));
        }
    }
    (name, None)
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
