//! Artwork URL resolution.

use reqwest::Url;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArtworkError {
    #[error("Record has no artwork")]
    Missing,

    #[error("Invalid artwork path {path:?}: {reason}")]
    Invalid { path: String, reason: String },
}

/// Resolve a stored artwork reference to an absolute URL.
///
/// Absolute URLs are returned unchanged and scheme-relative ones (`//host/..`)
/// take the scheme of `base`. Relative paths, with any leading `/` removed,
/// are resolved under `base`.
pub fn resolve_artwork_url(artwork_url: &str, base: &Url) -> Result<String, ArtworkError> {
    let artwork_url = artwork_url.trim();
    if artwork_url.is_empty() {
        return Err(ArtworkError::Missing);
    }

    if Url::parse(artwork_url).is_ok() {
        return Ok(artwork_url.to_string());
    }

    let relative = if artwork_url.starts_with("//") {
        artwork_url
    } else {
        artwork_url.trim_start_matches('/')
    };

    base.join(relative)
        .map(String::from)
        .map_err(|e| ArtworkError::Invalid {
            path: artwork_url.to_string(),
            reason: e.to_string(),
        })
}
