use thiserror::Error;

/// Errors returned by model provider adapters.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The model service answered with a non-2xx status.
    #[error("model API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response parsed but carried no usable content.
    #[error("empty model response from {context}")]
    EmptyResponse { context: String },
}
