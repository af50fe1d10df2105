use super::types::ResolutionResult;
use crate::config::ServiceConfig;
use crate::utils::sanitize_component;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct PlannedItem {
    /// 1-based position in page order.
    pub index: usize,
    pub identifier: String,
    pub extension: String,
    pub source_url: String,
    pub dest: PathBuf,
}

/// Everything the engine needs to know, computed before any I/O happens.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadPlan {
    pub folder: PathBuf,
    pub entries: Vec<PlannedItem>,
}

impl DownloadPlan {
    /// Allocates a stable, collision-free path per item.
    ///
    /// Single-item results are written as `{name}{ext}` directly under the
    /// target directory; larger results get zero-padded `N-{id}{ext}` files
    /// inside a folder named after the override, the album key (when
    /// `use_key` is set) or the page title.
    pub fn build(
        result: &ResolutionResult,
        service: &ServiceConfig,
        target_dir: &Path,
        override_name: Option<&str>,
        use_key: bool,
    ) -> Self {
        let folder_name = sanitize_component(match (override_name, use_key) {
            (Some(name), _) => name,
            (None, true) => &result.key,
            (None, false) => &result.title,
        });

        let single = result.items.len() == 1;
        let folder = if single {
            target_dir.to_path_buf()
        } else {
            target_dir.join(&folder_name)
        };
        let width = sequence_width(result.items.len());

        let entries = result
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let index = i + 1;
                let extension = canonical_extension(service, &item.extension);
                let source_url = format!(
                    "{}/{}{}",
                    service.media_base.trim_end_matches('/'),
                    item.identifier,
                    extension
                );
                let filename = if single {
                    format!("{}{}", folder_name, extension)
                } else {
                    format!("{:0width$}-{}{}", index, item.identifier, extension)
                };
                PlannedItem {
                    index,
                    identifier: item.identifier.clone(),
                    extension,
                    source_url,
                    dest: folder.join(filename),
                }
            })
            .collect();

        Self { folder, entries }
    }
}

/// Digits needed so that zero-padded sequence numbers sort lexically in
/// page order: ceil(log10(count + 1)).
fn sequence_width(count: usize) -> usize {
    let mut width = 1;
    let mut bound = 10;
    while bound <= count {
        width += 1;
        bound *= 10;
    }
    width
}

/// Animated-gif video containers are fetched and saved under the playable
/// extension, before either URL or filename is built.
fn canonical_extension(service: &ServiceConfig, extension: &str) -> String {
    for (alias, canonical) in &service.playable_aliases {
        if extension.eq_ignore_ascii_case(alias) {
            return canonical.clone();
        }
    }
    extension.to_string()
}
