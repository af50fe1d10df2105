use super::fetcher::Fetcher;
use super::names::{DownloadPlan, PlannedItem};
use super::types::{BatchSummary, DownloadOutcome};
use crate::config::DownloadConfig;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Hooks invoked around each item and at the end of a batch.
pub trait ProgressObserver: Send + Sync {
    /// Called exactly once per item, before the destination existence check
    fn on_item_start(&self, index: usize, source_url: &str, dest: &Path);

    /// Called exactly once after every item has been processed
    fn on_batch_complete(&self);
}

pub struct DownloadEngine {
    fetcher: Arc<dyn Fetcher>,
    config: DownloadConfig,
}

impl DownloadEngine {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: DownloadConfig) -> Self {
        Self { fetcher, config }
    }

    /// Processes the plan strictly in order, one item at a time. A failed
    /// item is counted and logged, never fatal for the batch.
    pub async fn run(
        &self,
        plan: &DownloadPlan,
        observer: &dyn ProgressObserver,
    ) -> Result<BatchSummary> {
        // The reference payload is read once per batch, not once per item.
        let placeholder = match &self.config.placeholder_asset {
            Some(path) => Some(tokio::fs::read(path).await.with_context(|| {
                format!("Failed to read placeholder asset {}", path.display())
            })?),
            None => None,
        };

        tokio::fs::create_dir_all(&plan.folder)
            .await
            .with_context(|| format!("Failed to create directory {}", plan.folder.display()))?;

        let mut summary = BatchSummary::default();
        for entry in &plan.entries {
            observer.on_item_start(entry.index, &entry.source_url, &entry.dest);

            let outcome = self.download_item(entry, placeholder.as_deref()).await;
            match &outcome {
                DownloadOutcome::Saved => debug!("Saved {}", entry.dest.display()),
                DownloadOutcome::SkippedExisting => {
                    info!("Skipping {}, already exists", entry.dest.display())
                }
                DownloadOutcome::SkippedPlaceholder => {
                    info!("Skipping {}, content no longer exists", entry.source_url)
                }
                DownloadOutcome::Failed(reason) => {
                    warn!("Download of {} failed: {}", entry.source_url, reason)
                }
            }
            summary.record(outcome, &entry.dest);
        }

        observer.on_batch_complete();
        Ok(summary)
    }

    async fn download_item(
        &self,
        entry: &PlannedItem,
        placeholder: Option<&[u8]>,
    ) -> DownloadOutcome {
        if entry.dest.exists() {
            return DownloadOutcome::SkippedExisting;
        }

        let fetched = match self.fetcher.fetch_bytes(&entry.source_url).await {
            Ok(fetched) => fetched,
            Err(e) => return DownloadOutcome::Failed(e.to_string()),
        };

        if self
            .config
            .removed_landing
            .iter()
            .any(|landing| landing == &fetched.final_url)
        {
            return DownloadOutcome::Failed(format!(
                "redirected to removed-content page {}",
                fetched.final_url
            ));
        }

        if let Some(reference) = placeholder {
            if fetched.data == reference {
                return DownloadOutcome::SkippedPlaceholder;
            }
        }

        if let Err(e) = tokio::fs::write(&entry.dest, &fetched.data).await {
            // never leave a partial file behind
            let _ = tokio::fs::remove_file(&entry.dest).await;
            return DownloadOutcome::Failed(format!("write failed: {}", e));
        }

        DownloadOutcome::Saved
    }
}
