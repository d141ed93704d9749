use thiserror::Error;

/// Failures surfaced to callers.
///
/// A response with a status other than `200` is *not* an error: the
/// endpoint methods report it as `Ok(None)` (or `Ok(())` for endpoints
/// without a value).
#[derive(Error, Debug)]
pub enum Error {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("reading the response body failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("serializing request failed: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("deserializing response failed: {source}\n{body}")]
    Deserialize {
        body: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
