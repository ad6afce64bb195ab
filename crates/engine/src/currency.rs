use serde::{Deserialize, Serialize};

use crate::MoneyCents;

/// Currency attached to every subscription.
///
/// The tracker is mono-currency: amounts are always shown in euro and there is
/// no conversion. The value is still stored per record so the file keeps the
/// symbol next to each amount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "€", alias = "EUR")]
    Eur,
}

impl Currency {
    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Eur => "€",
        }
    }

    /// `15.99€`, the form used next to a single charge.
    #[must_use]
    pub fn suffixed(self, amount: MoneyCents) -> String {
        format!("{amount}{}", self.symbol())
    }

    /// `€15.99`, the form used for totals.
    #[must_use]
    pub fn prefixed(self, amount: MoneyCents) -> String {
        format!("{}{amount}", self.symbol())
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.symbol())
    }
}
