use crate::failure::Failure;
use std::fmt;

/// The two user-facing selectors, by logical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    FiatCurrency,
    CryptoSymbol,
}

impl Control {
    pub fn name(self) -> &'static str {
        match self {
            Control::FiatCurrency => "fiat-currency",
            Control::CryptoSymbol => "crypto-symbol",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current value of each selector. Both start empty and are written by change events only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub fiat_currency: String,
    pub crypto_symbol: String,
}

impl Selection {
    /// Write `value` under `control`. No validation happens here.
    pub fn set(&mut self, control: Control, value: impl Into<String>) {
        let value = value.into();
        match control {
            Control::FiatCurrency => self.fiat_currency = value,
            Control::CryptoSymbol => self.crypto_symbol = value,
        }
    }

    /// Validate into the value a single quote request is made from.
    pub fn request(&self) -> Result<QuoteRequest, Failure> {
        QuoteRequest::new(&self.fiat_currency, &self.crypto_symbol)
    }
}

/// Both symbols of one submission, trimmed and known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    fiat: String,
    crypto: String,
}

impl QuoteRequest {
    pub fn new(fiat: &str, crypto: &str) -> Result<Self, Failure> {
        let (fiat, crypto) = (fiat.trim(), crypto.trim());
        if fiat.is_empty() || crypto.is_empty() {
            return Err(Failure::Validation);
        }
        Ok(Self {
            fiat: fiat.to_string(),
            crypto: crypto.to_string(),
        })
    }

    pub fn fiat(&self) -> &str {
        &self.fiat
    }

    pub fn crypto(&self) -> &str {
        &self.crypto
    }
}
