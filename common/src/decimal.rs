//! Fixed-point decimal definitions.

use rust_decimal::Decimal;

/// Precision of a fixed-point decimal value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Precision {
    /// Maximum number of digits in total.
    pub max_digits: u32,

    /// Number of fractional digits.
    pub decimal_places: u32,
}

impl Precision {
    /// Creates a new [`Precision`].
    #[must_use]
    pub const fn new(max_digits: u32, decimal_places: u32) -> Self {
        Self {
            max_digits,
            decimal_places,
        }
    }

    /// Checks whether the provided `value` fits into this [`Precision`].
    ///
    /// Trailing fractional zeros are not significant, so `1.500` fits into
    /// two decimal places.
    #[must_use]
    pub fn fits(&self, value: Decimal) -> bool {
        let value = value.normalize();
        if value.scale() > self.decimal_places {
            return false;
        }

        let whole_digits = self.max_digits.saturating_sub(self.decimal_places);
        10_i128
            .checked_pow(whole_digits)
            .and_then(|bound| Decimal::try_from_i128_with_scale(bound, 0).ok())
            .map_or(true, |bound| value.abs() < bound)
    }

    /// Rescales the provided `value` to exactly
    /// [`Precision::decimal_places`] fractional digits, if it
    /// [`Precision::fits()`].
    #[must_use]
    pub fn apply(&self, value: Decimal) -> Option<Decimal> {
        self.fits(value).then(|| {
            let mut value = value.normalize();
            value.rescale(self.decimal_places);
            value
        })
    }
}

/// Macro for defining a fixed-point decimal newtype.
///
/// Generated type wraps a [`Decimal`] which always has exactly
/// `decimal_places` fractional digits and at most `max_digits` digits in
/// total.
///
/// # Example
///
/// ```rust
/// # use common::define_decimal;
///
/// define_decimal! {
///     #[doc = "Height of a box."]
///     struct Height(max_digits = 5, decimal_places = 2);
/// }
///
/// assert_eq!(Height::new("1.5".parse().unwrap()).unwrap().to_string(), "1.50");
/// assert!(Height::new("1000".parse().unwrap()).is_none());
/// ```
#[macro_export]
macro_rules! define_decimal {
    (
        #[doc = $doc:literal]
        struct $name:ident(
            max_digits = $max_digits:literal,
            decimal_places = $decimal_places:literal $(,)?
        );
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
        )]
        #[doc = $doc]
        pub struct $name($crate::private::rust_decimal::Decimal);

        impl $name {
            /// Precision of this type.
            pub const PRECISION: $crate::Precision =
                $crate::Precision::new($max_digits, $decimal_places);

            /// Creates a new value if the provided `value` fits into its
            /// precision.
            #[must_use]
            pub fn new(
                value: $crate::private::rust_decimal::Decimal,
            ) -> ::core::option::Option<Self> {
                Self::PRECISION.apply(value).map(Self)
            }

            /// Returns the underlying decimal value.
            #[must_use]
            pub const fn decimal(&self) -> $crate::private::rust_decimal::Decimal {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(
                &self,
                f: &mut ::core::fmt::Formatter<'_>,
            ) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<$crate::private::rust_decimal::Decimal>()
                    .map_err(|_| {
                        ::core::concat!(
                            "invalid `",
                            ::core::stringify!($name),
                            "`: not a number",
                        )
                    })?;
                Self::new(value).ok_or(::core::concat!(
                    "invalid `",
                    ::core::stringify!($name),
                    "`: at most ",
                    ::core::stringify!($max_digits),
                    " digits with ",
                    ::core::stringify!($decimal_places),
                    " decimal places are allowed",
                ))
            }
        }

        impl ::core::convert::From<$name>
            for $crate::private::rust_decimal::Decimal
        {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        #[cfg(feature = "postgres")]
        impl<'a> $crate::private::postgres_types::FromSql<'a> for $name {
            $crate::private::postgres_types::accepts!(NUMERIC);

            fn from_sql(
                ty: &$crate::private::postgres_types::Type,
                raw: &'a [u8],
            ) -> ::core::result::Result<
                $name,
                ::std::boxed::Box<
                    dyn ::std::error::Error
                        + ::core::marker::Sync
                        + ::core::marker::Send
                >,
            > {
                let value = <
                    $crate::private::rust_decimal::Decimal
                    as $crate::private::postgres_types::FromSql
                >::from_sql(ty, raw)?;
                Self::new(value).ok_or_else(|| {
                    ::std::format!(
                        "invalid `{}` value: {value}",
                        ::core::stringify!($name),
                    )
                    .into()
                })
            }
        }

        #[cfg(feature = "postgres")]
        impl $crate::private::postgres_types::ToSql for $name {
            $crate::private::postgres_types::accepts!(NUMERIC);
            $crate::private::postgres_types::to_sql_checked!();

            fn to_sql(
                &self,
                ty: &$crate::private::postgres_types::Type,
                w: &mut $crate::private::postgres_types::private::BytesMut,
            ) -> ::core::result::Result<
                $crate::private::postgres_types::IsNull,
                ::std::boxed::Box<
                    dyn ::std::error::Error
                        + ::core::marker::Sync
                        + ::core::marker::Send
                >,
            > {
                $crate::private::postgres_types::ToSql::to_sql(&self.0, ty, w)
            }
        }
    };
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::Precision;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn fits_whole_and_fractional_digits() {
        let p = Precision::new(5, 2);

        assert!(p.fits(decimal("999.99")));
        assert!(p.fits(decimal("-999.99")));
        assert!(p.fits(decimal("0")));
        assert!(p.fits(decimal("1.500")));

        assert!(!p.fits(decimal("1000")));
        assert!(!p.fits(decimal("1.005")));
    }

    #[test]
    fn applies_fixed_scale() {
        let p = Precision::new(10, 2);

        assert_eq!(p.apply(decimal("120")).unwrap().to_string(), "120.00");
        assert_eq!(p.apply(decimal("7.5")).unwrap().to_string(), "7.50");
        assert_eq!(p.apply(decimal("1.230")).unwrap().to_string(), "1.23");
        assert_eq!(p.apply(decimal("0.001")), None);
    }

    define_decimal! {
        #[doc = "Height used in tests."]
        struct Height(max_digits = 5, decimal_places = 2);
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("12.3".parse::<Height>().unwrap().to_string(), "12.30");
        assert_eq!(" 1 ".parse::<Height>().unwrap().to_string(), "1.00");

        assert!("abc".parse::<Height>().is_err());
        assert!("1000.00".parse::<Height>().is_err());
        assert!("1.234".parse::<Height>().is_err());
    }
}
