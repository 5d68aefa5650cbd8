use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the engine (expense totals,
/// calculated shares, balances, transfer amounts) to avoid floating-point
/// drift. Conversion to major units happens only at the view boundary.
///
/// The value is signed:
/// - positive = credit / money owed to a participant
/// - negative = debit / money a participant owes
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34€");
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
#[serde(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[must_use]
    pub const fn abs(self) -> MoneyCents {
        MoneyCents(self.0.abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }

    /// Computes `self * num / den` in fixed point, rounding half-up.
    ///
    /// The intermediate product is taken in `i128`, so percentage and
    /// weighted splits cannot overflow for any realistic expense. Requires
    /// `den > 0` and `num >= 0`; callers validate raw split inputs before
    /// reaching this point, so a violation is a programming error and maps
    /// to an [`EngineError::InvalidAmount`].
    ///
    /// ```rust
    /// use engine::MoneyCents;
    ///
    /// // 60% of 200.00 = 120.00
    /// let amount = MoneyCents::new(20_000);
    /// assert_eq!(
    ///     amount.mul_ratio_round_half_up(6_000, 10_000).unwrap().cents(),
    ///     12_000
    /// );
    /// ```
    pub fn mul_ratio_round_half_up(self, num: i64, den: i64) -> Result<MoneyCents, EngineError> {
        if den <= 0 {
            return Err(EngineError::InvalidAmount(format!(
                "ratio denominator must be > 0, got {den}"
            )));
        }
        if num < 0 {
            return Err(EngineError::InvalidAmount(format!(
                "ratio numerator must be >= 0, got {num}"
            )));
        }
        let product = i128::from(self.0) * i128::from(num);
        let den = i128::from(den);
        // Half-up for the non-negative products this engine produces.
        let rounded = if product >= 0 {
            (product + den / 2) / den
        } else {
            (product - den / 2) / den
        };
        i64::try_from(rounded)
            .map(MoneyCents)
            .map_err(|_| EngineError::InvalidAmount("amount too large".to_string()))
    }

    /// Converts to major units for display (e.g. `1050` → `10.50`).
    ///
    /// Only the `api_types` boundary uses this; the engine never computes
    /// on the result.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let euros = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{euros}.{cents:02}€")
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 + rhs.0)
    }
}

impl AddAssign for MoneyCents {
    fn add_assign(&mut self, rhs: MoneyCents) {
        self.0 += rhs.0;
    }
}

impl Sub for MoneyCents {
    type Output = MoneyCents;

    fn sub(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 - rhs.0)
    }
}

impl SubAssign for MoneyCents {
    fn sub_assign(&mut self, rhs: MoneyCents) {
        self.0 -= rhs.0;
    }
}

impl Neg for MoneyCents {
    type Output = MoneyCents;

    fn neg(self) -> Self::Output {
        MoneyCents(-self.0)
    }
}

impl Sum for MoneyCents {
    fn sum<I: Iterator<Item = MoneyCents>>(iter: I) -> Self {
        iter.fold(MoneyCents::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pads_cents_and_keeps_the_sign() {
        // error messages and log lines render amounts through Display
        assert_eq!(MoneyCents::ZERO.to_string(), "0.00€");
        assert_eq!(MoneyCents::new(7).to_string(), "0.07€");
        assert_eq!(MoneyCents::new(31_337).to_string(), "313.37€");
        assert_eq!(MoneyCents::new(-205).to_string(), "-2.05€");
    }

    #[test]
    fn ratio_rounds_half_up() {
        // one third of 1.00 rounds 33.33.. to 33
        let amount = MoneyCents::new(100);
        assert_eq!(amount.mul_ratio_round_half_up(1, 3).unwrap().cents(), 33);
        // half a cent rounds up
        assert_eq!(amount.mul_ratio_round_half_up(1, 200).unwrap().cents(), 1);
        // 60% of 200.00
        let amount = MoneyCents::new(20_000);
        assert_eq!(
            amount.mul_ratio_round_half_up(6_000, 10_000).unwrap().cents(),
            12_000
        );
    }

    #[test]
    fn ratio_rejects_bad_operands() {
        let amount = MoneyCents::new(100);
        assert!(amount.mul_ratio_round_half_up(1, 0).is_err());
        assert!(amount.mul_ratio_round_half_up(-1, 3).is_err());
    }

    #[test]
    fn major_conversion_is_display_only() {
        assert_eq!(MoneyCents::new(1050).to_major(), 10.50);
        assert_eq!(MoneyCents::new(-1).to_major(), -0.01);
    }
}
