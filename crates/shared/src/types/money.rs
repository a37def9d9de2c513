//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major units (e.g. reais).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: Currency,
}

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Brazilian Real
    #[default]
    Brl,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
}

impl Currency {
    /// Symbol printed before the amount.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Brl => "R$",
            Self::Usd => "US$",
            Self::Eur => "€",
        }
    }
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates an amount in Brazilian reais.
    #[must_use]
    pub const fn brl(amount: Decimal) -> Self {
        Self::new(amount, Currency::Brl)
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Formats the amount the pt-BR way: `R$ 1.234,56`, `-R$ 10,00`.
    #[must_use]
    pub fn format_brl(&self) -> String {
        let rounded = self
            .amount
            .abs()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let text = format!("{rounded:.2}");
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        let sign = if self.is_negative() { "-" } else { "" };
        format!("{sign}{} {grouped},{frac_part}", self.currency.symbol())
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Brl => write!(f, "BRL"),
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BRL" => Ok(Self::Brl),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_money_new() {
        let amount = dec!(100.00);
        let money = Money::new(amount, Currency::Usd);
        assert_eq!(money.amount, amount);
        assert_eq!(money.currency, Currency::Usd);
    }

    #[test]
    fn test_money_zero() {
        let money = Money::zero(Currency::Brl);
        assert!(money.is_zero());
        assert_eq!(money.amount, Decimal::ZERO);
    }

    #[test]
    fn test_money_is_negative() {
        assert!(!Money::brl(dec!(10)).is_negative());
        assert!(Money::brl(dec!(-10)).is_negative());
        assert!(!Money::brl(dec!(0)).is_negative());
    }

    #[rstest]
    #[case(dec!(0), "R$ 0,00")]
    #[case(dec!(5.5), "R$ 5,50")]
    #[case(dec!(999.999), "R$ 1.000,00")]
    #[case(dec!(1234.56), "R$ 1.234,56")]
    #[case(dec!(1234567.8), "R$ 1.234.567,80")]
    #[case(dec!(-10), "-R$ 10,00")]
    fn test_format_brl(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(Money::brl(amount).format_brl(), expected);
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Brl.to_string(), "BRL");
        assert_eq!(Currency::Usd.to_string(), "USD");
        assert_eq!(Currency::Eur.to_string(), "EUR");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("BRL").unwrap(), Currency::Brl);
        assert_eq!(Currency::from_str("brl").unwrap(), Currency::Brl);
        assert_eq!(Currency::from_str("EUR").unwrap(), Currency::Eur);
        assert!(Currency::from_str("INVALID").is_err());
    }
}
