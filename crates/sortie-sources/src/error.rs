use thiserror::Error;

/// Errors returned by the provider clients.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The client was constructed with an unparsable base URL.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
