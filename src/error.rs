// Error type shared by the API client and the seeder. The binary wraps
// these in `anyhow` at the edges; inside the library every call site
// wants to print the failure and move on, so the variants carry enough
// text to make a readable status line.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout and friends.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not the JSON shape we expected.
    #[error("invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A 201 response whose body names no id.
    #[error("response has no id")]
    MissingId,

    #[error("cannot read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}
