use super::extractor::{finalize_items, page_title, strip_query_suffix, ExtractStrategy};
use super::types::{MediaItem, MediaKind, MediaReference, ResolutionResult};
use crate::config::ServiceConfig;
use crate::error::ExtractError;
use regex::Regex;
use tracing::debug;

/// Scans `<img>` tags pointing at the media host, the layout served to
/// clients without script support. Only consulted when a page carries no
/// embedded data block.
pub struct NoscriptImageStrategy {
    service: ServiceConfig,
    image_re: Regex,
}

impl NoscriptImageStrategy {
    pub fn new(service: ServiceConfig) -> Self {
        let host = service
            .media_base
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');
        let pattern = format!(
            r#"<img\s[^>]*?src="https?://{}/([A-Za-z0-9_]+)(\.[A-Za-z0-9]+(?:\?[0-9]+)?)""#,
            regex::escape(host)
        );
        let image_re = Regex::new(&pattern).expect("valid image pattern");
        Self { service, image_re }
    }
}

impl ExtractStrategy for NoscriptImageStrategy {
    fn name(&self) -> &'static str {
        "noscript-images"
    }

    fn supports(&self, kind: MediaKind) -> bool {
        matches!(kind, MediaKind::Album | MediaKind::Gallery)
    }

    fn extract(
        &self,
        markup: &str,
        reference: &MediaReference,
    ) -> Result<ResolutionResult, ExtractError> {
        let items: Vec<MediaItem> = self
            .image_re
            .captures_iter(markup)
            .map(|captures| MediaItem {
                identifier: captures[1].to_string(),
                extension: strip_query_suffix(&captures[2]).to_string(),
            })
            .collect();
        debug!("Found {} image tags for the media host", items.len());

        // No matching tags at all means this isn't the noscript layout.
        if items.is_empty() {
            return Err(ExtractError::MissingItemData);
        }

        let items = finalize_items(items, reference)?;

        Ok(ResolutionResult {
            key: reference.key.clone(),
            title: page_title(markup, &self.service, &reference.key),
            items,
        })
    }
}
