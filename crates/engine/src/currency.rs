use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Currency an event's expenses are denominated in.
///
/// Every expense in a report must carry the same currency; the aggregator
/// rejects mixed snapshots via [`ensure_event_currency`]. Only `EUR` exists
/// today, and it is the default.
///
/// Amounts themselves are stored in minor units (`MoneyCents`);
/// [`Currency::minor_units`] says how many fraction digits that scale
/// implies, so `1050` minor units of EUR reads as `10.50`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
}

impl Currency {
    /// Three-letter code used in views and error messages.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
        }
    }

    /// Scale between stored minor units and displayed major units.
    ///
    /// EUR is 2: amounts are kept in cents.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Eur => 2,
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// Ensure an expense currency matches the event currency.
pub(crate) fn ensure_event_currency(
    event_currency: Currency,
    actual: Currency,
) -> Result<(), EngineError> {
    if event_currency != actual {
        return Err(EngineError::CurrencyMismatch(format!(
            "event currency is {}, got {}",
            event_currency.code(),
            actual.code()
        )));
    }
    Ok(())
}
