use crate::error::{Error, Result};
use crate::schema::{CatalogEntry, Quote};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, trace};
use url::Url;

/// Source of the two datasets the app consumes.
///
/// The HTTP implementation lives in [`crate::endp::cryptocompare`]; anything else implementing
/// this (fixtures, recorded responses) can stand in for the network.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// The top `limit` cryptocurrencies by market capitalisation, priced in `currency`,
    /// in the order the source ranks them.
    async fn top_by_market_cap(&self, limit: usize, currency: &str) -> Result<Vec<CatalogEntry>>;

    /// A live display-formatted quote for `crypto` priced in `fiat`.
    async fn quote(&self, crypto: &str, fiat: &str) -> Result<Quote>;
}

/// GET `url` and deserialize the body into `D`.
///
/// Non-success status codes and the API's in-band error envelope are both turned into errors
/// before any attempt to read the body as `D`.
pub async fn fetch_de<D>(http_client: &HttpClient, url: &Url) -> Result<D>
where
    D: DeserializeOwned,
{
    trace!("GET {url}");
    let response = http_client.get(url.clone()).send().await.map_err(|e| {
        error!("failed fetching response from {url}");
        e
    })?;

    let status = response.status();
    if !status.is_success() {
        error!("{url} responded with {status}");
        return Err(Error::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.text().await?;
    decode(&body).map_err(|e| {
        error!("failed deserializing from {url}");
        e
    })
}

/// Deserialize a response body, surfacing `{"Response": "Error", "Message": ...}` as
/// [`Error::Api`].
pub fn decode<D>(body: &str) -> Result<D>
where
    D: DeserializeOwned,
{
    let value: Value = serde_json::from_str(body)?;

    if value.get("Response").and_then(Value::as_str) == Some("Error") {
        let message = value
            .get("Message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(Error::Api(message));
    }

    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    struct Payload {
        #[serde(rename = "Data")]
        data: Vec<u32>,
    }

    #[test]
    fn decodes_a_plain_body() {
        let payload: Payload = decode(r#"{"Response": "Success", "Data": [1, 2, 3]}"#).unwrap();
        assert_eq!(payload.data, vec![1, 2, 3]);
    }

    #[test]
    fn error_envelope_becomes_api_error() {
        let body = r#"{"Response": "Error", "Message": "fsyms param is empty", "Data": {}}"#;
        match decode::<Payload>(body) {
            Err(Error::Api(message)) => assert_eq!(message, "fsyms param is empty"),
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[test]
    fn error_envelope_without_message() {
        match decode::<Payload>(r#"{"Response": "Error"}"#) {
            Err(Error::Api(message)) => assert_eq!(message, "unknown error"),
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(matches!(decode::<Payload>("<html>"), Err(Error::Decode(_))));
        assert!(matches!(
            decode::<Payload>(r#"{"Data": "not a list"}"#),
            Err(Error::Decode(_))
        ));
    }
}
