mod classify;
mod embedded;
mod engine;
mod extractor;
mod fetcher;
mod names;
mod noscript;
#[cfg(test)]
pub mod testutil;
mod types;

pub use engine::{DownloadEngine, ProgressObserver};
pub use fetcher::{FetchError, Fetcher, HttpFetcher};
pub use names::DownloadPlan;
pub use types::{BatchSummary, MediaItem, MediaKind, ResolutionResult};

use crate::config::ServiceConfig;
use crate::error::{ExtractError, ResolveError};
use embedded::EmbeddedScriptStrategy;
use extractor::ExtractStrategy;
use noscript::NoscriptImageStrategy;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns an input URL into the ordered list of media items it refers to.
pub struct Resolver {
    fetcher: Arc<dyn Fetcher>,
    strategies: Vec<Box<dyn ExtractStrategy>>,
    service: ServiceConfig,
}

impl Resolver {
    pub fn new(fetcher: Arc<dyn Fetcher>, service: ServiceConfig) -> Self {
        // Strategy order matters: the embedded data block is authoritative,
        // the noscript image scan only covers pages without one.
        let strategies: Vec<Box<dyn ExtractStrategy>> = vec![
            Box::new(EmbeddedScriptStrategy::new(service.clone())),
            Box::new(NoscriptImageStrategy::new(service.clone())),
        ];

        Self {
            fetcher,
            strategies,
            service,
        }
    }

    pub async fn resolve(
        &self,
        url: &str,
        name_override: Option<&str>,
    ) -> Result<ResolutionResult, ResolveError> {
        let reference = classify::classify(url, &self.service)?;
        debug!(
            "Classified {} as {:?} with key {}",
            url, reference.kind, reference.key
        );

        // Direct media links synthesize a one-element result, no fetch.
        if let Some(extension) = &reference.explicit_extension {
            return Ok(ResolutionResult {
                key: reference.key.clone(),
                title: name_override.unwrap_or(&reference.key).to_string(),
                items: vec![MediaItem {
                    identifier: reference.key.clone(),
                    extension: extension.clone(),
                }],
            });
        }

        let listing_url = self.listing_url(&reference);
        info!("Reading listing page: {}", listing_url);
        let page = self.fetcher.fetch_text(&listing_url).await?;
        debug!("Listing page resolved to {}", page.final_url);

        let mut result = self.extract(&page.body, &reference)?;
        if let Some(name) = name_override {
            result.title = name.to_string();
        }
        Ok(result)
    }

    fn listing_url(&self, reference: &types::MediaReference) -> String {
        match reference.kind {
            // Albums and galleries are read through the no-script album
            // layout, which lists every contained item on one page.
            MediaKind::Album | MediaKind::Gallery => format!(
                "{}/a/{}/layout/blog",
                self.service.page_base.trim_end_matches('/'),
                reference.key
            ),
            MediaKind::Single | MediaKind::Subreddit => reference.url.clone(),
        }
    }

    fn extract(
        &self,
        markup: &str,
        reference: &types::MediaReference,
    ) -> Result<ResolutionResult, ResolveError> {
        let mut failures = Vec::new();

        for strategy in &self.strategies {
            if !strategy.supports(reference.kind) {
                continue;
            }
            match strategy.extract(markup, reference) {
                Ok(result) => {
                    debug!(
                        "Extracted {} items with {}",
                        result.items.len(),
                        strategy.name()
                    );
                    return Ok(result);
                }
                Err(ExtractError::EmptyAlbum) => return Err(ResolveError::EmptyAlbum),
                Err(e) => {
                    warn!("{} found nothing: {}", strategy.name(), e);
                    failures.push(format!("{}: {}", strategy.name(), e));
                }
            }
        }

        Err(ResolveError::Parse(failures.join(". ")))
    }
}
