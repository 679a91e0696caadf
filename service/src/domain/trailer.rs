//! [`Trailer`] definitions.

use common::define_decimal;
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{define_text, driver};
#[cfg(doc)]
use super::Driver;

/// Trailer used for transportation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Trailer {
    /// ID of this [`Trailer`].
    pub id: Id,

    /// [`Brand`] of this [`Trailer`].
    pub brand: Brand,

    /// [`Company`] owning this [`Trailer`].
    pub company: Company,

    /// [`LicensePlate`] of this [`Trailer`].
    ///
    /// Unique among all [`Trailer`]s.
    pub license_plate: LicensePlate,

    /// [`LoadCapacity`] of this [`Trailer`].
    pub load_capacity: LoadCapacity,

    /// [`FuelConsumption`] of this [`Trailer`].
    pub fuel_consumption: FuelConsumption,

    /// [`Length`] of this [`Trailer`].
    pub length: Length,

    /// [`CostPerKm`] of transportation with this [`Trailer`].
    pub cost_per_km: CostPerKm,

    /// ID of the primary [`Driver`] of this [`Trailer`], if any.
    pub driver: Option<driver::Id>,
}

/// ID of a [`Trailer`].
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
    #[doc = "Brand of a [`Trailer`]."]
    struct Brand(max_chars = 50);
}

define_text! {
    #[doc = "Company owning a [`Trailer`]."]
    struct Company(max_chars = 50);
}

define_text! {
    #[doc = "License plate of a [`Trailer`]."]
    struct LicensePlate(max_chars = 20);
}

define_decimal! {
    #[doc = "Load capacity of a [`Trailer`], in tonnes."]
    struct LoadCapacity(max_digits = 8, decimal_places = 2);
}

define_decimal! {
    #[doc = "Fuel consumption of a [`Trailer`], in litres per 100 km."]
    struct FuelConsumption(max_digits = 5, decimal_places = 2);
}

define_decimal! {
    #[doc = "Length of a [`Trailer`], in metres."]
    struct Length(max_digits = 5, decimal_places = 2);
}

define_decimal! {
    #[doc = "Cost of transportation per kilometre with a [`Trailer`]."]
    struct CostPerKm(max_digits = 10, decimal_places = 2);
}

impl Default for CostPerKm {
    fn default() -> Self {
        Self(Decimal::from_parts(5000, 0, 0, false, 2))
    }
}

#[cfg(test)]
mod spec {
    use super::{CostPerKm, LicensePlate, Length, LoadCapacity};

    #[test]
    fn default_cost_per_km() {
        assert_eq!(CostPerKm::default().to_string(), "50.00");
        assert_eq!(CostPerKm::default(), "50".parse().unwrap());
    }

    #[test]
    fn decimals_respect_precision() {
        assert_eq!("20".parse::<LoadCapacity>().unwrap().to_string(), "20.00");
        assert!("999999.99".parse::<LoadCapacity>().is_ok());
        assert!("1000000".parse::<LoadCapacity>().is_err());

        assert!("13.6".parse::<Length>().is_ok());
        assert!("1000".parse::<Length>().is_err());
        assert!("13.666".parse::<Length>().is_err());
    }

    #[test]
    fn license_plate_is_limited() {
        assert!(LicensePlate::new("A123BC77").is_some());
        assert!(LicensePlate::new("A".repeat(21)).is_none());
    }
}
