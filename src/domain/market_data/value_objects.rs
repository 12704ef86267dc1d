use derive_more::{Constructor, Display, From, Into};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Grams per troy ounce; per-gram tier divisor.
pub const GRAMS_PER_OUNCE: f64 = 31.1;
/// Ten-gram tier divisor.
pub const TEN_GRAMS_PER_OUNCE: f64 = 3.11;

/// Years covered by the synthetic history.
pub const HISTORY_YEARS: [u16; 5] = [2019, 2020, 2021, 2022, 2023];

/// Rounds half-way cases towards positive infinity, the way browser `Math.round` does.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Rounds to one decimal place with the same tie rule.
pub fn round_one_decimal(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

/// Value Object - precious metal
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString, AsRefStr,
    Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Metal {
    #[display(fmt = "Gold")]
    Gold,
    #[display(fmt = "Silver")]
    Silver,
    #[display(fmt = "Platinum")]
    Platinum,
    #[display(fmt = "Palladium")]
    Palladium,
}

impl Metal {
    pub const ALL: [Metal; 4] = [Metal::Gold, Metal::Silver, Metal::Platinum, Metal::Palladium];

    /// ISO 4217 commodity code used by the metals provider.
    pub fn provider_symbol(&self) -> &'static str {
        match self {
            Metal::Gold => "XAU",
            Metal::Silver => "XAG",
            Metal::Platinum => "XPT",
            Metal::Palladium => "XPD",
        }
    }

    pub fn from_provider_symbol(symbol: &str) -> Option<Metal> {
        Self::ALL.into_iter().find(|metal| metal.provider_symbol() == symbol)
    }
}

/// Value Object - fiat currency
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString, AsRefStr,
    Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[display(fmt = "USD")]
    Usd,
    #[display(fmt = "INR")]
    Inr,
    #[display(fmt = "EUR")]
    Eur,
    #[display(fmt = "GBP")]
    Gbp,
    #[display(fmt = "JPY")]
    Jpy,
    #[display(fmt = "CAD")]
    Cad,
    #[display(fmt = "AUD")]
    Aud,
    #[display(fmt = "CHF")]
    Chf,
}

impl Currency {
    /// Currencies every metal is priced in.
    pub const PRICED: [Currency; 5] =
        [Currency::Usd, Currency::Inr, Currency::Eur, Currency::Gbp, Currency::Jpy];

    /// Currencies derived from the USD price.
    pub const CONVERTED: [Currency; 4] =
        [Currency::Inr, Currency::Eur, Currency::Gbp, Currency::Jpy];

    /// Row order of the exchange-rate table.
    pub const TABLE: [Currency; 8] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Inr,
        Currency::Cad,
        Currency::Aud,
        Currency::Chf,
    ];

    /// Upper-case code as used by rate providers.
    pub fn code(&self) -> &str {
        self.as_ref()
    }
}

/// Value Object - price per troy ounce
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, From, Into, Constructor, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn per_gram(&self) -> f64 {
        round_half_up(self.0 / GRAMS_PER_OUNCE)
    }

    pub fn per_ten_grams(&self) -> f64 {
        round_half_up(self.0 / TEN_GRAMS_PER_OUNCE)
    }
}
