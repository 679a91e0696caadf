//! [`Driver`] definitions.

use common::define_kind;
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use super::{define_count, define_text};

/// Driver performing transportation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Driver {
    /// ID of this [`Driver`].
    pub id: Id,

    /// [`FullName`] of this [`Driver`].
    pub full_name: FullName,

    /// [`PassportNumber`] of this [`Driver`].
    pub passport_number: PassportNumber,

    /// Driving [`Experience`] of this [`Driver`].
    pub experience: Experience,

    /// [`Class`] of this [`Driver`].
    pub class: Class,

    /// ID of another [`Driver`] being a partner of this one, if any.
    ///
    /// Partnership is not required to be mutual.
    pub partner: Option<Id>,
}

/// ID of a [`Driver`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_text! {
    #[doc = "Full name of a [`Driver`]."]
    struct FullName(max_chars = 100);
}

define_text! {
    #[doc = "Passport number of a [`Driver`]."]
    struct PassportNumber(max_chars = 20);
}

define_count! {
    #[doc = "Driving experience of a [`Driver`], in years."]
    struct Experience;
}

define_kind! {
    #[doc = "Qualification class of a [`Driver`]."]
    enum Class {
        #[doc = "First class."]
        First = 1,

        #[doc = "Second class."]
        Second = 2,

        #[doc = "Third class."]
        Third = 3,
    }
}

#[cfg(test)]
mod spec {
    use super::{Class, Experience, FullName, PassportNumber};

    #[test]
    fn full_name_is_limited() {
        assert!(FullName::new("Ivan Petrov").is_some());
        assert!(FullName::new("x".repeat(100)).is_some());
        assert!(FullName::new("ж".repeat(100)).is_some());

        assert!(FullName::new("x".repeat(101)).is_none());
        assert!(FullName::new("").is_none());
        assert!(FullName::new(" Ivan").is_none());
    }

    #[test]
    fn parses_trimmed_input() {
        assert_eq!(
            " AB 123456 ".parse::<PassportNumber>().unwrap().to_string(),
            "AB 123456",
        );
        assert!("   ".parse::<PassportNumber>().is_err());
        assert!("1".repeat(21).parse::<PassportNumber>().is_err());
    }

    #[test]
    fn experience_is_not_negative() {
        assert!(Experience::new(0).is_some());
        assert!(Experience::new(25).is_some());
        assert!(Experience::new(-1).is_none());
        assert!("-3".parse::<Experience>().is_err());
        assert!("abc".parse::<Experience>().is_err());
    }

    #[test]
    fn class_from_discriminant() {
        assert_eq!(Class::try_from(1), Ok(Class::First));
        assert_eq!(Class::try_from(3), Ok(Class::Third));
        assert_eq!(Class::try_from(4), Err(4));
    }
}
