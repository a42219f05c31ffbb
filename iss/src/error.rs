use std::path::PathBuf;

use thiserror::Error;

/// Errors found while assembling a `Client`, either from builder calls or from a
/// configuration file.
///
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("empty URL string")]
    EmptyUrl,
    #[error("nil http client")]
    NilHttpClient,
    #[error("timeout must be between 1 and 3600 seconds")]
    BadTimeout,
    #[error("building http client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("reading {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing configuration: {0}")]
    Parse(#[from] hcl::Error),
    #[error("bad configuration file version {0}")]
    BadVersion(usize),
}

/// Custom error type for the whole request chain, allow us to differentiate between the
/// stage that failed.
///
#[derive(Debug, Error)]
pub enum IssError {
    #[error("invalid client configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("calling ISS API: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected response status code: {0}")]
    Status(u16),
    #[error("decoding ISS response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("converting coordinate {field} value {value:?} to decimal: {reason}")]
    Conversion {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("creating ISS client: {0}")]
    Creating(#[source] Box<IssError>),
    #[error("retrieving ISS position: {0}")]
    Retrieving(#[source] Box<IssError>),
}

impl IssError {
    /// Strip the stage wrappers and return the error that actually happened.
    ///
    pub fn root(&self) -> &IssError {
        match self {
            IssError::Creating(e) | IssError::Retrieving(e) => e.root(),
            e => e,
        }
    }
}
