use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between sending a request to the market-data API and holding
/// a decoded value.
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (DNS, TLS, connection reset, body read, ...).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The configured base URL, or a URL derived from it, is not valid.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server answered with a non-success status code.
    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },

    /// The API answered `200 OK` but wrapped an error message in its response envelope.
    #[error("market data API error: {0}")]
    Api(String),

    /// The body was not the JSON shape we expected.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The quote response did not contain the requested pair.
    #[error("no quote for {crypto}/{fiat} in the response")]
    MissingQuote { crypto: String, fiat: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
