use crate::media::FetchError;
use thiserror::Error;

/// Errors that abort a whole invocation before any file is written.
///
/// Per-item download failures are deliberately not part of this taxonomy;
/// the engine records them as `DownloadOutcome::Failed` and moves on.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("not a recognized album, gallery or image URL: {0}")]
    InvalidUrl(String),

    #[error("error reading listing page: {0}")]
    Transport(#[from] FetchError),

    /// The page loaded but the expected item data was missing, which
    /// usually means the page format changed upstream.
    #[error("no item data found in listing page ({0})")]
    Parse(String),

    /// Distinct from `Parse`: the page parsed fine but references nothing
    /// downloadable, e.g. the content has been removed.
    #[error("album contains no downloadable items")]
    EmptyAlbum,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("expected item data block not found")]
    MissingItemData,

    #[error("item data block contains no items")]
    EmptyAlbum,
}
