use coinquote_client::Quote;

pub const PRICE_LABEL: &str = "Price";
pub const HIGH_LABEL: &str = "Highest price of the day";
pub const LOW_LABEL: &str = "Lowest price of the day";
pub const CHANGE_LABEL: &str = "Change over the last 24 hours";
pub const LAST_UPDATE_LABEL: &str = "Last update";

/// Full contents of the output region. Rendering a `View` always replaces whatever was there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Nothing shown.
    Idle,
    /// Indeterminate loading indicator.
    Loading,
    /// A rendered quote.
    Quote(QuoteView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub label: &'static str,
    pub value: String,
}

/// The five labeled lines of a quote, always in this order:
/// price, day high, day low, 24h change (with `%`), last update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteView {
    lines: [Line; 5],
}

impl QuoteView {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

impl From<&Quote> for QuoteView {
    fn from(quote: &Quote) -> Self {
        let line = |label, value: &str| Line {
            label,
            value: value.to_string(),
        };
        Self {
            lines: [
                line(PRICE_LABEL, &quote.price),
                line(HIGH_LABEL, &quote.day_high),
                line(LOW_LABEL, &quote.day_low),
                Line {
                    label: CHANGE_LABEL,
                    value: percent(&quote.change_pct_24h),
                },
                line(LAST_UPDATE_LABEL, &quote.last_update),
            ],
        }
    }
}

fn percent(value: &str) -> String {
    match value.ends_with('%') {
        true => value.to_string(),
        false => format!("{value}%"),
    }
}

/// Text of the single transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
