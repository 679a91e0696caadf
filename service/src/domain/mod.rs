//! Domain definitions.

pub mod driver;
pub mod order;
pub mod trailer;

pub use self::{driver::Driver, order::Order, trailer::Trailer};

/// Macro for defining a trimmed non-empty text newtype limited by the number
/// of characters.
macro_rules! define_text {
    (
        #[doc = $doc:literal]
        struct $name:ident(max_chars = $max:literal);
    ) => {
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::derive_more::Display,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
        )]
        #[cfg_attr(
            feature = "postgres",
            derive(::postgres_types::FromSql, ::postgres_types::ToSql),
            postgres(transparent),
        )]
        #[as_ref(forward)]
        #[doc = $doc]
        pub struct $name(String);

        impl $name {
            /// Maximum number of characters.
            pub const MAX_CHARS: usize = $max;

            /// Creates a new value if the given `value` is valid.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let value = value.into();
                Self::check(&value).then_some(Self(value))
            }

            /// Checks whether the given `value` is valid.
            fn check(value: impl AsRef<str>) -> bool {
                let value = value.as_ref();
                value.trim() == value
                    && !value.is_empty()
                    && value.chars().count() <= Self::MAX_CHARS
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s.trim()).ok_or(::std::concat!(
                    "invalid `",
                    ::std::stringify!($name),
                    "`: must be non-empty and at most ",
                    ::std::stringify!($max),
                    " characters long",
                ))
            }
        }
    };
}

pub(crate) use define_text;

/// Macro for defining a non-negative integer newtype stored as `INT4`.
macro_rules! define_count {
    (
        #[doc = $doc:literal]
        struct $name:ident;
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            Eq,
            Hash,
            ::derive_more::Into,
            Ord,
            PartialEq,
            PartialOrd,
        )]
        #[cfg_attr(
            feature = "postgres",
            derive(::postgres_types::FromSql, ::postgres_types::ToSql),
            postgres(transparent),
        )]
        #[doc = $doc]
        pub struct $name(i32);

        impl $name {
            /// Creates a new value if the given `value` is not negative.
            #[must_use]
            pub fn new(value: i32) -> Option<Self> {
                (value >= 0).then_some(Self(value))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().ok().and_then(Self::new).ok_or(
                    ::std::concat!(
                        "invalid `",
                        ::std::stringify!($name),
                        "`: must be a non-negative integer",
                    ),
                )
            }
        }
    };
}

pub(crate) use define_count;
