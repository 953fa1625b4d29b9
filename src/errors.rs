use thiserror::Error;

/// Why a pool stats request produced no usable payload.
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connection, timeout or body read failure.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The pool answered with something other than 200.
    #[error("pool API returned HTTP {status}")]
    Http { status: u16 },

    /// The body was not the expected JSON shape.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::Malformed(error.to_string())
    }
}
