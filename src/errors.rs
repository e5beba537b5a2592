use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Graph store error: {0}")]
    Graph(#[from] GraphError),
    #[error("Summarization error: {0}")]
    Summary(#[from] SummaryError),
    #[error("Invalid bind address '{0}': {1}")]
    InvalidBindAddr(String, #[source] std::net::AddrParseError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("Failed to parse TOML from file '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
}

/// Store faults are deliberately one opaque kind. An unreachable store, a
/// failed auth handshake and malformed Cypher all reach the caller the same
/// way; none of them is a condition this layer recovers from.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph query failed: {0}")]
    Query(String),
}

impl GraphError {
    pub(crate) fn query(err: impl std::fmt::Display) -> Self {
        Self::Query(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("no API key configured for the text-generation service")]
    MissingApiKey,
    #[error("request to text-generation service failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected response from text-generation service: {0}")]
    UnexpectedResponse(String),
}
