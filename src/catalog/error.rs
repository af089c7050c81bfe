use thiserror::Error;

/// Failure modes for catalog calls.
///
/// Lookups for ids the catalog does not know come back as `Upstream` with
/// a 404 status; `is_not_found` names that case for callers. Single-call
/// operations propagate the first failure unchanged; the multi-page
/// fetchers catch per-page failures and record the page numbers instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request could not be sent or completed (includes client-side
    /// timeouts).
    #[error("catalog request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The catalog answered with a non-2xx status. `message` is the
    /// upstream `status_message` when the error body parses, otherwise
    /// the raw body.
    #[error("catalog returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// A 2xx body that does not match the expected shape.
    #[error("could not decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Upstream { status: 404, .. })
    }
}
