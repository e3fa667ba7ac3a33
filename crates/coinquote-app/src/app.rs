use crate::catalog::CatalogLoader;
use crate::config::Config;
use crate::failure::Failure;
use crate::notify::Notifier;
use crate::quote::{QuoteFetcher, Submission};
use crate::selection::{Control, Selection};
use crate::surface::Surface;
use coinquote_client::{CatalogEntry, MarketData};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// The whole front end behind one surface: it owns the selection and dispatches the three
/// kinds of event (start, change, submit) to the flows.
pub struct App<A, S> {
    selection: Mutex<Selection>,
    notifier: Arc<Notifier<S>>,
    catalog: CatalogLoader<A, S>,
    fetcher: QuoteFetcher<A, S>,
}

impl<A: MarketData, S: Surface> App<A, S> {
    pub fn new(api: A, surface: Arc<S>, config: &Config) -> Self {
        let api = Arc::new(api);
        let notifier = Arc::new(Notifier::new(surface.clone(), config.notice_duration));
        let catalog = CatalogLoader::new(
            api.clone(),
            surface.clone(),
            notifier.clone(),
            config.listing_limit,
            &config.listing_currency,
        );
        let fetcher = QuoteFetcher::new(api, surface, notifier.clone());

        Self {
            selection: Mutex::new(Selection::default()),
            notifier,
            catalog,
            fetcher,
        }
    }

    /// Startup: load the catalog into the crypto selector.
    pub async fn start(&self) -> Result<Vec<CatalogEntry>, Failure> {
        self.catalog.load().await
    }

    /// A selector changed.
    pub fn change(&self, control: Control, value: impl Into<String>) {
        let value = value.into();
        debug!("{control} changed to {value:?}");
        self.lock_selection().set(control, value);
    }

    /// The form was submitted; the selection is snapshotted before anything is awaited.
    pub async fn submit(&self) -> Submission {
        let selection = self.selection();
        self.fetcher.submit(selection).await
    }

    pub fn selection(&self) -> Selection {
        self.lock_selection().clone()
    }

    pub fn notifier(&self) -> &Notifier<S> {
        &self.notifier
    }

    fn lock_selection(&self) -> std::sync::MutexGuard<'_, Selection> {
        self.selection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
