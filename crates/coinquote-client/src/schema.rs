/// One selectable cryptocurrency: the label shown to the user and the ticker sent to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub display_name: String,
    pub symbol: String,
}

/// A snapshot of price & daily statistics for one crypto/fiat pair.
///
/// Every field is kept exactly as the API formats it for display, e.g.
/// ```text
/// price:          "$ 64,210.3"
/// day_high:       "$ 65,002.1"
/// day_low:        "$ 63,870.0"
/// change_pct_24h: "-1.24"
/// last_update:    "Just now"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub price: String,
    pub day_high: String,
    pub day_low: String,
    pub change_pct_24h: String,
    pub last_update: String,
}

/// A fiat currency offered as the pricing denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiatCurrency {
    pub code: &'static str,
    pub name: &'static str,
}

/// Statically defined fiat currencies.
///
/// This is currently maintained manually.
pub const FIAT_CURRENCIES: [FiatCurrency; 4] = [
    FiatCurrency {
        code: "USD",
        name: "US Dollar",
    },
    FiatCurrency {
        code: "MXN",
        name: "Mexican Peso",
    },
    FiatCurrency {
        code: "EUR",
        name: "Euro",
    },
    FiatCurrency {
        code: "GBP",
        name: "Pound Sterling",
    },
];
