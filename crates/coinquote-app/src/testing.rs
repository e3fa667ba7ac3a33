//! In-memory stand-ins for the network and the terminal.

use crate::surface::Surface;
use crate::view::{Notice, View};
use async_trait::async_trait;
use coinquote_client::{CatalogEntry, Error, MarketData, Quote};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Populate(Vec<CatalogEntry>),
    Render(View),
    ShowNotice(Notice),
    DismissNotice,
}

#[derive(Default)]
pub struct RecordingSurface {
    events: Mutex<Vec<SurfaceEvent>>,
}

impl RecordingSurface {
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Every option appended to the crypto selector, in order.
    pub fn options(&self) -> Vec<CatalogEntry> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SurfaceEvent::Populate(entries) => Some(entries),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn renders(&self) -> Vec<View> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SurfaceEvent::Render(view) => Some(view),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SurfaceEvent::ShowNotice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    /// What the output region shows right now.
    pub fn region(&self) -> View {
        self.renders().pop().unwrap_or(View::Idle)
    }

    fn push(&self, event: SurfaceEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Surface for RecordingSurface {
    fn populate(&self, entries: &[CatalogEntry]) {
        self.push(SurfaceEvent::Populate(entries.to_vec()));
    }

    fn render(&self, view: &View) {
        self.push(SurfaceEvent::Render(view.clone()));
    }

    fn show_notice(&self, notice: &Notice) {
        self.push(SurfaceEvent::ShowNotice(notice.clone()));
    }

    fn dismiss_notice(&self) {
        self.push(SurfaceEvent::DismissNotice);
    }
}

/// Canned responses; `Err(message)` is served as an API error envelope.
pub struct FakeMarket {
    pub catalog: Result<Vec<CatalogEntry>, String>,
    pub quote: Result<Quote, String>,
    pub catalog_calls: AtomicUsize,
    pub quote_calls: AtomicUsize,
    pub last_quote: Mutex<Option<(String, String)>>,
}

impl FakeMarket {
    pub fn new(catalog: Result<Vec<CatalogEntry>, String>, quote: Result<Quote, String>) -> Self {
        Self {
            catalog,
            quote,
            catalog_calls: AtomicUsize::new(0),
            quote_calls: AtomicUsize::new(0),
            last_quote: Mutex::new(None),
        }
    }

    pub fn quote_calls(&self) -> usize {
        self.quote_calls.load(Ordering::SeqCst)
    }

    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }
}

impl Default for FakeMarket {
    fn default() -> Self {
        Self::new(Ok(catalog()), Ok(quote()))
    }
}

#[async_trait]
impl MarketData for FakeMarket {
    async fn top_by_market_cap(
        &self,
        _limit: usize,
        _currency: &str,
    ) -> coinquote_client::Result<Vec<CatalogEntry>> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        self.catalog.clone().map_err(Error::Api)
    }

    async fn quote(&self, crypto: &str, fiat: &str) -> coinquote_client::Result<Quote> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_quote.lock().unwrap() = Some((crypto.to_string(), fiat.to_string()));
        self.quote.clone().map_err(Error::Api)
    }
}

pub fn catalog() -> Vec<CatalogEntry> {
    [("Bitcoin", "BTC"), ("Ethereum", "ETH"), ("Tether", "USDT")]
        .into_iter()
        .map(|(name, symbol)| CatalogEntry {
            display_name: name.to_string(),
            symbol: symbol.to_string(),
        })
        .collect()
}

pub fn quote() -> Quote {
    Quote {
        price: "$1000".to_string(),
        day_high: "$1050".to_string(),
        day_low: "$950".to_string(),
        change_pct_24h: "5".to_string(),
        last_update: "2022-01-01 12:00:00".to_string(),
    }
}
