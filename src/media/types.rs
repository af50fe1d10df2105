use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// A single image page, or a direct media link.
    Single,
    /// An album of items grouped under one page.
    Album,
    /// Service-curated variant of an album; may contain exactly one item.
    Gallery,
    /// An item filed under a subreddit-style category.
    Subreddit,
}

/// The parsed identity of the input URL, created once per invocation.
#[derive(Debug, Clone)]
pub struct MediaReference {
    pub kind: MediaKind,
    pub key: String,
    /// Present only for direct media links; implies no listing fetch.
    pub explicit_extension: Option<String>,
    pub url: String,
}

/// One downloadable unit inside a resolved album or gallery.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaItem {
    pub identifier: String,
    pub extension: String,
}

/// Output of resolving a reference against fetched markup. `items` keeps
/// page order, which determines filename sequence numbers.
#[derive(Debug, Clone)]
pub struct ResolutionResult {
    pub key: String,
    pub title: String,
    pub items: Vec<MediaItem>,
}

impl ResolutionResult {
    /// Extension occurrence counts, most common first.
    pub fn extension_histogram(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for item in &self.items {
            *counts.entry(item.extension.as_str()).or_default() += 1;
        }

        let mut histogram: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(extension, count)| (extension.to_string(), count))
            .collect();
        histogram.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        histogram
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved,
    SkippedExisting,
    SkippedPlaceholder,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub saved: usize,
    pub skipped_existing: usize,
    pub skipped_placeholder: usize,
    pub failed: usize,
    /// Files actually written this run, in processing order.
    #[allow(dead_code)]
    pub saved_files: Vec<PathBuf>,
}

impl BatchSummary {
    pub fn skipped(&self) -> usize {
        self.skipped_existing + self.skipped_placeholder + self.failed
    }

    pub(crate) fn record(&mut self, outcome: DownloadOutcome, dest: &Path) {
        match outcome {
            DownloadOutcome::Saved => {
                self.saved += 1;
                self.saved_files.push(dest.to_path_buf());
            }
            DownloadOutcome::SkippedExisting => self.skipped_existing += 1,
            DownloadOutcome::SkippedPlaceholder => self.skipped_placeholder += 1,
            DownloadOutcome::Failed(_) => self.failed += 1,
        }
    }
}
