use survey_spec::CatalogError;
use thiserror::Error;

/// Failure of a single answer-store call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store base url '{0}'")]
    InvalidBaseUrl(String),
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode store response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Short message suitable for the session advisory.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Network(_) | StoreError::Unavailable(_) => {
                "the answer store could not be reached".to_string()
            }
            StoreError::Status { status, .. } => format!("the answer store replied {}", status),
            StoreError::Decode(_) => "the answer store sent an unexpected reply".to_string(),
            StoreError::InvalidBaseUrl(url) => format!("'{}' is not a valid store url", url),
        }
    }
}

/// Fatal failure while loading the question catalog.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("could not fetch questions: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
