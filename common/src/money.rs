//! [`Money`]-related definitions.

use std::{fmt, iter, ops, str::FromStr};

#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// Amount of money with exactly two fractional digits.
///
/// All amounts are expressed in the single currency the business operates
/// in, so no currency is carried along.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Money(Decimal);

impl Money {
    /// Number of fractional digits kept by [`Money`].
    pub const SCALE: u32 = 2;

    /// Zero [`Money`] (`0.00`).
    pub const ZERO: Self = Self(Decimal::from_parts(0, 0, 0, false, 2));

    /// Creates a new [`Money`] by quantizing the provided `amount` to
    /// [`Money::SCALE`] fractional digits.
    ///
    /// Midpoints are rounded to the nearest even digit ("banker's rounding"),
    /// so `0.125` becomes `0.12` while `0.135` becomes `0.14`.
    #[must_use]
    pub fn quantize(amount: Decimal) -> Self {
        let mut amount = amount.round_dp(Self::SCALE);
        amount.rescale(Self::SCALE);
        Self(amount)
    }

    /// Returns the amount of this [`Money`].
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Adds the `other` [`Money`] to this one, returning [`None`] on
    /// overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self::quantize)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s).map_err(|_| "invalid amount")?;
        if amount.normalize().scale() > Self::SCALE {
            return Err("too many fractional digits");
        }
        Ok(Self::quantize(amount))
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::quantize(self.0 + rhs.0)
    }
}

impl iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, ops::Add::add)
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Amount of money in `{major}.{minor}` format, where `minor` has at most
    /// two digits.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Money;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn quantizes_with_bankers_rounding() {
        assert_eq!(Money::quantize(decimal("0.125")).to_string(), "0.12");
        assert_eq!(Money::quantize(decimal("0.135")).to_string(), "0.14");
        assert_eq!(Money::quantize(decimal("10.126")).to_string(), "10.13");
        assert_eq!(Money::quantize(decimal("6000")).to_string(), "6000.00");
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45").unwrap().amount(),
            decimal("123.45"),
        );
        assert_eq!(Money::from_str("123").unwrap().to_string(), "123.00");
        assert_eq!(Money::from_str("123.400").unwrap().to_string(), "123.40");

        assert!(Money::from_str("123.456").is_err());
        assert!(Money::from_str("123.45USD").is_err());
        assert!(Money::from_str("").is_err());
    }

    #[test]
    fn zero_has_two_fractional_digits() {
        assert_eq!(Money::ZERO.to_string(), "0.00");
        assert_eq!(Money::default(), Money::ZERO);
    }

    #[test]
    fn sums_amounts() {
        let total = ["1.10", "2.20", "3.30"]
            .into_iter()
            .map(|s| Money::from_str(s).unwrap())
            .sum::<Money>();

        assert_eq!(total.to_string(), "6.60");
        assert_eq!([].into_iter().sum::<Money>(), Money::ZERO);
    }
}
