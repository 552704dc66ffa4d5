//! Display currency
//!
//! Currency only affects formatting. Prices in the catalogs are plain
//! numbers and are never converted.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Supported display currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    #[default]
    Gbp,
    Jpy,
    Cad,
    Aud,
    Chf,
    Cny,
    Inr,
    Brl,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> String {
        self.to_string()
    }

    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Jpy | Self::Cny => "¥",
            Self::Cad => "C$",
            Self::Aud => "A$",
            Self::Chf => "CHF",
            Self::Inr => "₹",
            Self::Brl => "R$",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Usd => "US Dollar",
            Self::Eur => "Euro",
            Self::Gbp => "British Pound",
            Self::Jpy => "Japanese Yen",
            Self::Cad => "Canadian Dollar",
            Self::Aud => "Australian Dollar",
            Self::Chf => "Swiss Franc",
            Self::Cny => "Chinese Yuan",
            Self::Inr => "Indian Rupee",
            Self::Brl => "Brazilian Real",
        }
    }

    /// Currency for a POSIX locale string such as `en_US.UTF-8` or `de_DE`.
    ///
    /// Returns `None` for `C`/`POSIX` and for countries outside the table.
    pub fn from_locale(locale: &str) -> Option<Self> {
        let base = locale.split(['.', '@']).next().unwrap_or_default();
        let country = base.split('_').nth(1)?;

        let currency = match country.to_ascii_uppercase().as_str() {
            "US" => Self::Usd,
            "GB" => Self::Gbp,
            "JP" => Self::Jpy,
            "CA" => Self::Cad,
            "AU" => Self::Aud,
            "CH" => Self::Chf,
            "CN" => Self::Cny,
            "IN" => Self::Inr,
            "BR" => Self::Brl,
            "DE" | "FR" | "ES" | "IT" | "NL" | "BE" | "AT" | "IE" | "PT" | "FI" | "GR" => {
                Self::Eur
            }
            _ => return None,
        };

        Some(currency)
    }

    /// Currency from the `LC_ALL`, `LC_MONETARY` or `LANG` environment variables.
    pub fn from_env() -> Option<Self> {
        ["LC_ALL", "LC_MONETARY", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|value| Self::from_locale(&value))
    }

    /// Format an amount rounded to whole units, with thousands separators.
    pub fn format_amount(&self, amount: f64) -> String {
        let rounded = amount.round();
        let sign = if rounded < 0.0 { "-" } else { "" };
        let digits = format!("{:.0}", rounded.abs());

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        format!("{}{}{}", sign, self.symbol(), grouped)
    }
}
