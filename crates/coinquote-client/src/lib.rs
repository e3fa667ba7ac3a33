pub mod api;
pub mod endp;
pub mod error;
pub mod schema;

pub use api::MarketData;
pub use error::{Error, Result};
pub use schema::{CatalogEntry, FiatCurrency, Quote, FIAT_CURRENCIES};

pub mod prelude {
    pub use crate::api::MarketData;
    pub use crate::endp::cryptocompare::{CryptoCompare, BASE_URL};
    pub use crate::schema::*;

    pub fn build_client(user_agent: &str) -> crate::Result<reqwest::Client> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(user_agent)
            .build()?;
        Ok(client)
    }
}
