use crate::api::{fetch_de, MarketData};
use crate::error::{Error, Result};
use crate::schema::{CatalogEntry, Quote};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

pub const BASE_URL: &str = "https://min-api.cryptocompare.com";

const TOP_LIST_PATH: &str = "data/top/mktcapfull";
const QUOTE_PATH: &str = "data/pricemultifull";

////////////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Client
//
////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// The CryptoCompare public API; no key is required for either endpoint.
#[derive(Debug, Clone)]
pub struct CryptoCompare {
    http_client: HttpClient,
    base_url: Url,
}

impl CryptoCompare {
    pub fn new(http_client: HttpClient, base_url: &str) -> Result<Self> {
        // `Url::join` drops the last path segment unless it ends in a slash
        let base_url = match base_url.ends_with('/') {
            true => Url::parse(base_url)?,
            false => Url::parse(&format!("{base_url}/"))?,
        };
        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// `{base}/data/top/mktcapfull?limit={limit}&tsym={currency}`
    pub fn top_list_url(&self, limit: usize, currency: &str) -> Result<Url> {
        let mut url = self.base_url.join(TOP_LIST_PATH)?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("tsym", currency);
        Ok(url)
    }

    /// `{base}/data/pricemultifull?fsyms={crypto}&tsyms={fiat}`
    pub fn quote_url(&self, crypto: &str, fiat: &str) -> Result<Url> {
        let mut url = self.base_url.join(QUOTE_PATH)?;
        url.query_pairs_mut()
            .append_pair("fsyms", crypto)
            .append_pair("tsyms", fiat);
        Ok(url)
    }
}

#[async_trait]
impl MarketData for CryptoCompare {
    async fn top_by_market_cap(&self, limit: usize, currency: &str) -> Result<Vec<CatalogEntry>> {
        let url = self.top_list_url(limit, currency)?;
        let top_list: TopList = fetch_de(&self.http_client, &url).await?;
        debug!("top list returned {} coins", top_list.data.len());
        Ok(top_list.into_catalog())
    }

    async fn quote(&self, crypto: &str, fiat: &str) -> Result<Quote> {
        let url = self.quote_url(crypto, fiat)?;
        let prices: PriceMultiFull = fetch_de(&self.http_client, &url).await?;
        prices.into_quote(crypto, fiat)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Deserialization
//
////////////////////////////////////////////////////////////////////////////////////////////////////////////

// {
//   "Message": "Success",
//   "Type": 100,
//   "Data": [
//     {
//       "CoinInfo": { "Id": "1182", "Name": "BTC", "FullName": "Bitcoin", ... },
//       "RAW": { ... },
//       "DISPLAY": { ... }
//     },
//     ...
//   ]
// }
#[derive(Deserialize, Debug)]
pub struct TopList {
    #[serde(rename = "Data")]
    pub data: Vec<CoinRecord>,
}

#[derive(Deserialize, Debug)]
pub struct CoinRecord {
    #[serde(rename = "CoinInfo")]
    pub coin_info: CoinInfo,
}

#[derive(Deserialize, Debug)]
pub struct CoinInfo {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "FullName")]
    pub full_name: String,
}

impl TopList {
    /// Catalog entries in the same order the API ranked them.
    pub fn into_catalog(self) -> Vec<CatalogEntry> {
        self.data
            .into_iter()
            .map(|record| CatalogEntry {
                display_name: record.coin_info.full_name,
                symbol: record.coin_info.name,
            })
            .collect()
    }
}

// {
//   "RAW": { ... },
//   "DISPLAY": {
//     "BTC": {
//       "USD": {
//         "PRICE": "$ 64,210.3",
//         "HIGHDAY": "$ 65,002.1",
//         "LOWDAY": "$ 63,870.0",
//         "CHANGEPCT24HOUR": "-1.24",
//         "LASTUPDATE": "Just now",
//         ...
//       }
//     }
//   }
// }
#[derive(Deserialize, Debug)]
pub struct PriceMultiFull {
    #[serde(rename = "DISPLAY", default)]
    pub display: HashMap<String, HashMap<String, DisplayQuote>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DisplayQuote {
    #[serde(rename = "PRICE", deserialize_with = "de_display")]
    pub price: String,
    #[serde(rename = "HIGHDAY", deserialize_with = "de_display")]
    pub high_day: String,
    #[serde(rename = "LOWDAY", deserialize_with = "de_display")]
    pub low_day: String,
    #[serde(rename = "CHANGEPCT24HOUR", deserialize_with = "de_display")]
    pub change_pct_24_hour: String,
    #[serde(rename = "LASTUPDATE", deserialize_with = "de_display")]
    pub last_update: String,
}

impl PriceMultiFull {
    /// Pull the `crypto`/`fiat` record out of the nested `DISPLAY` map. Symbols are matched
    /// case-insensitively.
    pub fn into_quote(self, crypto: &str, fiat: &str) -> Result<Quote> {
        let missing = || Error::MissingQuote {
            crypto: crypto.to_string(),
            fiat: fiat.to_string(),
        };

        let (_, fiats) = self
            .display
            .into_iter()
            .find(|(symbol, _)| symbol.eq_ignore_ascii_case(crypto))
            .ok_or_else(missing)?;
        let (_, display) = fiats
            .into_iter()
            .find(|(symbol, _)| symbol.eq_ignore_ascii_case(fiat))
            .ok_or_else(missing)?;

        Ok(Quote {
            price: display.price,
            day_high: display.high_day,
            day_low: display.low_day,
            change_pct_24h: display.change_pct_24_hour,
            last_update: display.last_update,
        })
    }
}

/// Display fields are usually pre-formatted strings, but a number is accepted and kept as its
/// JSON text.
pub fn de_display<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a display string or number, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    const TOP_LIST: &str = r#"{
        "Message": "Success",
        "Type": 100,
        "Data": [
            {"CoinInfo": {"Id": "1182", "Name": "BTC", "FullName": "Bitcoin"}, "RAW": {}},
            {"CoinInfo": {"Id": "7605", "Name": "ETH", "FullName": "Ethereum"}, "RAW": {}},
            {"CoinInfo": {"Id": "171986", "Name": "USDT", "FullName": "Tether"}, "RAW": {}}
        ]
    }"#;

    const PRICE_MULTI_FULL: &str = r#"{
        "RAW": {"BTC": {"USD": {"PRICE": 1000.0}}},
        "DISPLAY": {
            "BTC": {
                "USD": {
                    "FROMSYMBOL": "Ƀ",
                    "PRICE": "$1000",
                    "HIGHDAY": "$1050",
                    "LOWDAY": "$950",
                    "CHANGEPCT24HOUR": "5",
                    "LASTUPDATE": "2022-01-01 12:00:00"
                }
            }
        }
    }"#;

    fn api() -> CryptoCompare {
        CryptoCompare::new(HttpClient::new(), BASE_URL).unwrap()
    }

    /// Answer a single request on a loopback port with `status` and `body`; returns the base
    /// URL to point the client at.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            let response = format!(
                "HTTP/1.1 {status}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        format!("http://{addr}")
    }

    fn loopback(base_url: &str) -> CryptoCompare {
        let http_client = HttpClient::builder().no_proxy().build().unwrap();
        CryptoCompare::new(http_client, base_url).unwrap()
    }

    #[test]
    fn top_list_url_carries_limit_and_currency() {
        let url = api().top_list_url(10, "USD").unwrap();
        assert_eq!(
            url.as_str(),
            "https://min-api.cryptocompare.com/data/top/mktcapfull?limit=10&tsym=USD"
        );
    }

    #[test]
    fn quote_url_carries_both_symbols() {
        let url = api().quote_url("BTC", "EUR").unwrap();
        assert_eq!(
            url.as_str(),
            "https://min-api.cryptocompare.com/data/pricemultifull?fsyms=BTC&tsyms=EUR"
        );
    }

    #[test]
    fn base_url_with_a_path_is_kept() {
        let api = CryptoCompare::new(HttpClient::new(), "http://127.0.0.1:8080/proxy").unwrap();
        let url = api.quote_url("ETH", "GBP").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/proxy/data/pricemultifull?fsyms=ETH&tsyms=GBP"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            CryptoCompare::new(HttpClient::new(), "not a url"),
            Err(Error::Url(_))
        ));
    }

    #[test]
    fn top_list_keeps_api_order() {
        let top_list: TopList = decode(TOP_LIST).unwrap();
        let catalog = top_list.into_catalog();

        let symbols: Vec<&str> = catalog.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, ["BTC", "ETH", "USDT"]);
        assert_eq!(
            catalog[0],
            CatalogEntry {
                display_name: "Bitcoin".to_string(),
                symbol: "BTC".to_string(),
            }
        );
    }

    #[test]
    fn quote_is_extracted_from_display() {
        let prices: PriceMultiFull = decode(PRICE_MULTI_FULL).unwrap();
        let quote = prices.into_quote("BTC", "USD").unwrap();

        assert_eq!(quote.price, "$1000");
        assert_eq!(quote.day_high, "$1050");
        assert_eq!(quote.day_low, "$950");
        assert_eq!(quote.change_pct_24h, "5");
        assert_eq!(quote.last_update, "2022-01-01 12:00:00");
    }

    #[test]
    fn quote_symbols_match_case_insensitively() {
        let prices: PriceMultiFull = decode(PRICE_MULTI_FULL).unwrap();
        assert!(prices.into_quote("btc", "usd").is_ok());
    }

    #[test]
    fn numeric_display_fields_are_accepted() {
        let body = r#"{"DISPLAY": {"ETH": {"EUR": {
            "PRICE": 3100.5, "HIGHDAY": 3200, "LOWDAY": 3000, "CHANGEPCT24HOUR": -2.5,
            "LASTUPDATE": 1700000000
        }}}}"#;
        let prices: PriceMultiFull = decode(body).unwrap();
        let quote = prices.into_quote("ETH", "EUR").unwrap();

        assert_eq!(quote.price, "3100.5");
        assert_eq!(quote.change_pct_24h, "-2.5");
        assert_eq!(quote.last_update, "1700000000");
    }

    #[test]
    fn missing_pair_is_reported() {
        let prices: PriceMultiFull = decode(PRICE_MULTI_FULL).unwrap();
        match prices.into_quote("BTC", "MXN") {
            Err(Error::MissingQuote { crypto, fiat }) => {
                assert_eq!(crypto, "BTC");
                assert_eq!(fiat, "MXN");
            }
            other => panic!("expected a missing quote, got {other:?}"),
        }

        let empty: PriceMultiFull = decode("{}").unwrap();
        assert!(matches!(
            empty.into_quote("BTC", "USD"),
            Err(Error::MissingQuote { .. })
        ));
    }

    #[test]
    fn null_display_field_is_malformed() {
        let body = r#"{"DISPLAY": {"BTC": {"USD": {
            "PRICE": null, "HIGHDAY": "1", "LOWDAY": "1", "CHANGEPCT24HOUR": "1", "LASTUPDATE": "1"
        }}}}"#;
        assert!(matches!(
            decode::<PriceMultiFull>(body),
            Err(Error::Decode(_))
        ));
    }

    #[tokio::test]
    async fn server_error_status_is_reported() {
        let base_url = serve_once("500 Internal Server Error", "{}");
        let api = loopback(&base_url);

        match api.top_by_market_cap(10, "USD").await {
            Err(Error::Status { url, status }) => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(url, format!("{base_url}/data/top/mktcapfull?limit=10&tsym=USD"));
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_envelope_on_success_status_is_reported() {
        let base_url = serve_once(
            "200 OK",
            r#"{"Response": "Error", "Message": "bad pair", "Data": {}}"#,
        );
        let api = loopback(&base_url);

        match api.quote("BTC", "XYZ").await {
            Err(Error::Api(message)) => assert_eq!(message, "bad pair"),
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn top_list_is_fetched_over_http() {
        let base_url = serve_once("200 OK", TOP_LIST);
        let api = loopback(&base_url);

        let catalog = api.top_by_market_cap(3, "USD").await.unwrap();
        let symbols: Vec<&str> = catalog.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, ["BTC", "ETH", "USDT"]);
    }
}
