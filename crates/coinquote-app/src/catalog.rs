use crate::failure::Failure;
use crate::notify::Notifier;
use crate::surface::Surface;
use coinquote_client::{CatalogEntry, MarketData};
use std::sync::Arc;
use tracing::{error, info};

/// Fills the crypto selector with the top cryptocurrencies by market cap.
pub struct CatalogLoader<A, S> {
    api: Arc<A>,
    surface: Arc<S>,
    notifier: Arc<Notifier<S>>,
    limit: usize,
    currency: String,
}

impl<A: MarketData, S: Surface> CatalogLoader<A, S> {
    pub fn new(
        api: Arc<A>,
        surface: Arc<S>,
        notifier: Arc<Notifier<S>>,
        limit: usize,
        currency: &str,
    ) -> Self {
        Self {
            api,
            surface,
            notifier,
            limit,
            currency: currency.to_string(),
        }
    }

    /// One request; on success every entry is populated in the order received, on failure
    /// nothing is populated and the error is notified. Never retried.
    pub async fn load(&self) -> Result<Vec<CatalogEntry>, Failure> {
        info!(
            "Loading top {} cryptocurrencies by market cap ({})",
            self.limit, self.currency
        );

        match self.api.top_by_market_cap(self.limit, &self.currency).await {
            Ok(entries) => {
                self.surface.populate(&entries);
                info!("Catalog loaded with {} entries", entries.len());
                Ok(entries)
            }
            Err(e) => {
                error!("Catalog load failed | {e}");
                let failure = Failure::Network(e);
                self.notifier.notify(failure.to_string());
                Err(failure)
            }
        }
    }
}
