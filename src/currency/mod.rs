//! Currency normalization to the canonical currency (DOP).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::MoniError;

/// Supported entry currencies.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum Currency {
    #[serde(rename = "DOP")]
    #[default]
    Dop,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Dop, Currency::Usd, Currency::Eur];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Dop => "DOP",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = MoniError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DOP" => Ok(Currency::Dop),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(MoniError::UnknownCurrency(other.to_string())),
        }
    }
}

pub fn symbol_for(currency: Currency) -> &'static str {
    match currency {
        Currency::Dop => "RD$",
        Currency::Usd => "$",
        Currency::Eur => "€",
    }
}

/// Conversion rates into the canonical currency.
///
/// Injected wherever amounts are normalized so callers can refresh rates
/// without touching the aggregation logic. The default table carries the
/// fixed reference rates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateTable {
    to_dop: BTreeMap<Currency, f64>,
}

impl RateTable {
    pub fn empty() -> Self {
        Self {
            to_dop: BTreeMap::new(),
        }
    }

    pub fn with_rate(mut self, currency: Currency, rate: f64) -> Self {
        self.set_rate(currency, rate);
        self
    }

    pub fn set_rate(&mut self, currency: Currency, rate: f64) {
        self.to_dop.insert(currency, rate);
    }

    pub fn rate(&self, currency: Currency) -> Option<f64> {
        self.to_dop.get(&currency).copied()
    }

    /// Converts an entry amount into canonical DOP.
    pub fn to_canonical(&self, amount: f64, currency: Currency) -> Result<f64, MoniError> {
        let rate = self
            .rate(currency)
            .ok_or_else(|| MoniError::UnknownCurrency(currency.code().to_string()))?;
        Ok(amount * rate)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::empty()
            .with_rate(Currency::Dop, 1.0)
            .with_rate(Currency::Usd, 58.50)
            .with_rate(Currency::Eur, 63.20)
    }
}

/// Formats a canonical amount as `RD$ 1,234.56`.
pub fn format_dop(amount: f64) -> String {
    let negative = amount < 0.0;
    let body = format!("{:.2}", amount.abs());
    let (int_part, dec_part) = body.split_once('.').unwrap_or((body.as_str(), "00"));
    let grouped = group_digits(int_part, ',');
    let sign = if negative { "-" } else { "" };
    format!("RD$ {}{}.{}", sign, grouped, dec_part)
}

/// Formats an amount in its entry currency, e.g. `$ 12.50`.
pub fn format_amount(amount: f64, currency: Currency) -> String {
    format!("{} {:.2}", symbol_for(currency), amount)
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_conversion_is_identity_for_dop() {
        let rates = RateTable::default();
        for amount in [0.01, 1.0, 150.0, 98_765.43] {
            let converted = rates.to_canonical(amount, Currency::Dop).unwrap();
            assert!((converted - amount).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn canonical_conversion_applies_fixed_rates() {
        let rates = RateTable::default();
        let usd = rates.to_canonical(10.0, Currency::Usd).unwrap();
        assert!((usd - 585.0).abs() < 1e-9);
        let eur = rates.to_canonical(10.0, Currency::Eur).unwrap();
        assert!((eur - 632.0).abs() < 1e-9);
    }

    #[test]
    fn missing_rate_is_an_error() {
        let rates = RateTable::empty().with_rate(Currency::Dop, 1.0);
        let err = rates.to_canonical(5.0, Currency::Eur).unwrap_err();
        assert!(matches!(err, MoniError::UnknownCurrency(code) if code == "EUR"));
    }

    #[test]
    fn unknown_codes_are_rejected_at_parse_time() {
        assert!(matches!(
            "GBP".parse::<Currency>(),
            Err(MoniError::UnknownCurrency(code)) if code == "GBP"
        ));
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
    }

    #[test]
    fn formats_grouped_canonical_amounts() {
        assert_eq!(format_dop(1234.5), "RD$ 1,234.50");
        assert_eq!(format_dop(-98.4), "RD$ -98.40");
        assert_eq!(format_dop(1_000_000.0), "RD$ 1,000,000.00");
    }

    #[test]
    fn formats_entry_currency_with_its_symbol() {
        assert_eq!(format_amount(12.5, Currency::Usd), "$ 12.50");
        assert_eq!(format_amount(8.0, Currency::Eur), "€ 8.00");
        assert_eq!(format_amount(150.0, Currency::Dop), "RD$ 150.00");
    }
}
