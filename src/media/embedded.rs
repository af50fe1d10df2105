use super::extractor::{finalize_items, page_title, strip_query_suffix, ExtractStrategy};
use super::types::{MediaItem, MediaKind, MediaReference, ResolutionResult};
use crate::config::ServiceConfig;
use crate::error::ExtractError;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

static ITEM_BLOCK_RE: OnceLock<Regex> = OnceLock::new();
static HASH_EXT_RE: OnceLock<Regex> = OnceLock::new();

fn item_block_re() -> &'static Regex {
    ITEM_BLOCK_RE.get_or_init(|| Regex::new(r"(?s)_item:.*?\};").expect("valid block pattern"))
}

fn hash_ext_re() -> &'static Regex {
    HASH_EXT_RE.get_or_init(|| {
        Regex::new(r#""hash":"([A-Za-z0-9_]+)"[^}]*?"ext":"(\.[A-Za-z0-9]+(?:\?[0-9]+)?)""#)
            .expect("valid item pattern")
    })
}

/// Reads the `_item: {...};` data block the service embeds in its pages.
///
/// Scoping the pair scan to that block keeps thumbnails of unrelated
/// recommended content out of the result.
pub struct EmbeddedScriptStrategy {
    service: ServiceConfig,
}

impl EmbeddedScriptStrategy {
    pub fn new(service: ServiceConfig) -> Self {
        Self { service }
    }
}

impl ExtractStrategy for EmbeddedScriptStrategy {
    fn name(&self) -> &'static str {
        "embedded-script"
    }

    fn supports(&self, _kind: MediaKind) -> bool {
        true
    }

    fn extract(
        &self,
        markup: &str,
        reference: &MediaReference,
    ) -> Result<ResolutionResult, ExtractError> {
        let block = item_block_re()
            .find(markup)
            .ok_or(ExtractError::MissingItemData)?
            .as_str();

        let items: Vec<MediaItem> = hash_ext_re()
            .captures_iter(block)
            .map(|captures| MediaItem {
                identifier: captures[1].to_string(),
                extension: strip_query_suffix(&captures[2]).to_string(),
            })
            .collect();
        debug!("Found {} raw item pairs in data block", items.len());

        let items = finalize_items(items, reference)?;

        Ok(ResolutionResult {
            key: reference.key.clone(),
            title: page_title(markup, &self.service, &reference.key),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> EmbeddedScriptStrategy {
        EmbeddedScriptStrategy::new(ServiceConfig::default())
    }

    fn reference(kind: MediaKind, key: &str) -> MediaReference {
        MediaReference {
            kind,
            key: key.to_string(),
            explicit_extension: None,
            url: format!("https://imgur.com/a/{}", key),
        }
    }

    fn album_markup() -> &'static str {
        r#"<html>
<head><title>Vacation Shots - Album on Imgur</title></head>
<body><script>
    _item: {"hash":"XYZ1","title":"container","ext":".png",
    "album_images":{"images":[
        {"hash":"aaa","description":null,"ext":".png?1"},
        {"hash":"bbb","description":null,"ext":".gif"},
        {"hash":"aaa","description":null,"ext":".png"}
    ]}};
</script></body></html>"#
    }

    #[test]
    fn test_extracts_pairs_from_data_block() {
        let result = strategy()
            .extract(album_markup(), &reference(MediaKind::Album, "XYZ1"))
            .unwrap();

        assert_eq!(result.title, "Vacation Shots");
        assert_eq!(
            result.items,
            vec![
                MediaItem {
                    identifier: "aaa".to_string(),
                    extension: ".png".to_string(),
                },
                MediaItem {
                    identifier: "bbb".to_string(),
                    extension: ".gif".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_ignores_pairs_outside_the_block() {
        let markup = r#"<html><body>
<script>_item: {"hash":"solo","ext":".jpg"};</script>
<div>"hash":"unrelated","ext":".png"</div>
</body></html>"#;

        let result = strategy()
            .extract(markup, &reference(MediaKind::Single, "solo"))
            .unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].identifier, "solo");
    }

    #[test]
    fn test_single_item_gallery_keeps_self_pair() {
        let markup = r#"<script>_item: {"hash":"jK0fB","ext":".jpg"};</script>"#;
        let result = strategy()
            .extract(markup, &reference(MediaKind::Gallery, "jK0fB"))
            .unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.title, "jK0fB");
    }

    #[test]
    fn test_missing_block_is_a_parse_failure() {
        let markup = "<html><body>nothing structured here</body></html>";
        assert!(matches!(
            strategy().extract(markup, &reference(MediaKind::Album, "XYZ1")),
            Err(ExtractError::MissingItemData)
        ));
    }

    #[test]
    fn test_block_with_no_pairs_is_empty_album() {
        let markup = r#"<script>_item: {"id":12,"views":0};</script>"#;
        assert!(matches!(
            strategy().extract(markup, &reference(MediaKind::Album, "XYZ1")),
            Err(ExtractError::EmptyAlbum)
        ));
    }

    #[test]
    fn test_strips_query_suffix_from_extension() {
        let markup = r#"<script>_item: {"hash":"qq1","ext":".jpg?1"};</script>"#;
        let result = strategy()
            .extract(markup, &reference(MediaKind::Single, "qq1"))
            .unwrap();
        assert_eq!(result.items[0].extension, ".jpg");
    }
}
