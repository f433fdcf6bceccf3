use thiserror::Error;

/// Errors raised at the fetch boundary.
///
/// The display text is what ends up in front of the user, so each variant
/// forwards the description of the underlying failure.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error, status: {0}")]
    Status(u16),

    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Errors raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid endpoint '{0}'")]
    InvalidEndpoint(String),

    #[error("request timeout must be at least one second")]
    InvalidTimeout,
}

/// Errors raised while setting up a browser
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
