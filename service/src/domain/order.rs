//! [`Order`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_decimal, unit, DateTimeOf, Money};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{define_count, define_text, driver, trailer, Driver, Trailer};

/// Transportation order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Order {
    /// ID of this [`Order`].
    pub id: Id,

    /// [`Name`] of this [`Order`].
    pub name: Name,

    /// [`Weight`] of the cargo.
    pub weight: Weight,

    /// Number of cargo items.
    pub items_count: ItemsCount,

    /// [`Point`] the cargo departs from.
    pub departure_point: Point,

    /// [`Point`] the cargo is delivered to.
    pub destination_point: Point,

    /// [`Distance`] between the departure and the destination.
    pub distance: Distance,

    /// ID of the [`Trailer`] assigned to this [`Order`], if any.
    pub trailer: Option<trailer::Id>,

    /// ID of the [`Driver`] assigned to this [`Order`], if any.
    pub driver: Option<driver::Id>,

    /// [`DateTime`] when this [`Order`] was created.
    pub created_at: CreationDateTime,

    /// Indicator whether this [`Order`] is completed.
    pub completed: bool,
}

impl Order {
    /// Calculates cost of this [`Order`] transported with the provided
    /// [`Trailer`].
    ///
    /// The [`Trailer`] is ignored unless it's the one assigned to this
    /// [`Order`].
    #[must_use]
    pub fn cost(&self, trailer: Option<&Trailer>) -> Money {
        let cost_per_km = trailer
            .filter(|t| self.trailer == Some(t.id))
            .map(|t| t.cost_per_km);
        calculate_cost(self.distance, cost_per_km)
    }

    /// Indicates whether this [`Order`] is performed by the provided
    /// [`Driver`] together with a partner.
    ///
    /// The [`Driver`] is ignored unless it's the one assigned to this
    /// [`Order`].
    #[must_use]
    pub fn has_partner(&self, driver: Option<&Driver>) -> bool {
        has_partner(
            self.distance,
            driver.filter(|d| self.driver == Some(d.id)),
        )
    }

    /// Indicates whether this [`Order`] is a solo one.
    #[must_use]
    pub fn is_solo(&self) -> bool {
        !self.distance.requires_partner()
    }
}

/// Calculates cost of transporting cargo over the provided [`Distance`] with
/// the provided [`trailer::CostPerKm`] rate.
///
/// Without a rate the cost is zero. The result is rounded to two fractional
/// digits with the midpoints rounded to the nearest even digit. Overflow
/// yields zero instead of an error.
#[must_use]
pub fn calculate_cost(
    distance: Distance,
    cost_per_km: Option<trailer::CostPerKm>,
) -> Money {
    let Some(cost_per_km) = cost_per_km else {
        return Money::ZERO;
    };
    if distance.decimal().is_zero() {
        return Money::ZERO;
    }

    distance
        .decimal()
        .checked_mul(cost_per_km.decimal())
        .map_or(Money::ZERO, Money::quantize)
}

/// Indicates whether cargo over the provided [`Distance`] is transported by
/// the provided [`Driver`] together with a partner.
///
/// Unassigned [`Driver`] has no partner.
#[must_use]
pub fn has_partner(distance: Distance, driver: Option<&Driver>) -> bool {
    distance.requires_partner() && driver.is_some_and(|d| d.partner.is_some())
}

/// ID of an [`Order`].
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
    #[doc = "Name of an [`Order`]."]
    struct Name(max_chars = 100);
}

define_text! {
    #[doc = "Departure or destination point of an [`Order`]."]
    struct Point(max_chars = 100);
}

define_count! {
    #[doc = "Number of cargo items in an [`Order`]."]
    struct ItemsCount;
}

define_decimal! {
    #[doc = "Weight of an [`Order`] cargo, in tonnes."]
    struct Weight(max_digits = 8, decimal_places = 2);
}

define_decimal! {
    #[doc = "Distance of an [`Order`] transportation, in kilometres."]
    struct Distance(max_digits = 10, decimal_places = 2);
}

impl Distance {
    /// [`Distance`] up to which a single driver is enough.
    pub const SOLO_LIMIT: Decimal = Decimal::from_parts(50000, 0, 0, false, 2);

    /// Indicates whether transportation over this [`Distance`] requires a
    /// partner driver.
    #[must_use]
    pub fn requires_partner(&self) -> bool {
        self.decimal() > Self::SOLO_LIMIT
    }
}

/// [`DateTime`] when an [`Order`] was created.
pub type CreationDateTime = DateTimeOf<(Order, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::{DateTime, Money};

    use crate::domain::{driver, trailer, Driver, Trailer};

    use super::{calculate_cost, has_partner, Distance, Id, Order};

    fn distance(s: &str) -> Distance {
        s.parse().unwrap()
    }

    fn cost_per_km(s: &str) -> trailer::CostPerKm {
        s.parse().unwrap()
    }

    fn driver(partner: Option<driver::Id>) -> Driver {
        Driver {
            id: driver::Id::new(),
            full_name: "Ivan Petrov".parse().unwrap(),
            passport_number: "4510 123456".parse().unwrap(),
            experience: "7".parse().unwrap(),
            class: driver::Class::First,
            partner,
        }
    }

    fn trailer(rate: &str) -> Trailer {
        Trailer {
            id: trailer::Id::new(),
            brand: "Schmitz".parse().unwrap(),
            company: "Cargo LLC".parse().unwrap(),
            license_plate: "A123BC77".parse().unwrap(),
            load_capacity: "20".parse().unwrap(),
            fuel_consumption: "32.5".parse().unwrap(),
            length: "13.6".parse().unwrap(),
            cost_per_km: cost_per_km(rate),
            driver: None,
        }
    }

    fn order(distance_km: &str) -> Order {
        Order {
            id: Id::new(),
            name: "Pipes".parse().unwrap(),
            weight: "12.5".parse().unwrap(),
            items_count: "4".parse().unwrap(),
            departure_point: "Moscow".parse().unwrap(),
            destination_point: "Kazan".parse().unwrap(),
            distance: distance(distance_km),
            trailer: None,
            driver: None,
            created_at: DateTime::now().coerce(),
            completed: false,
        }
    }

    #[test]
    fn cost_is_zero_without_rate_or_distance() {
        assert_eq!(calculate_cost(distance("120"), None), Money::ZERO);
        assert_eq!(
            calculate_cost(distance("0"), Some(cost_per_km("50"))),
            Money::ZERO,
        );
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn cost_is_distance_times_rate() {
        assert_eq!(
            calculate_cost(distance("120"), Some(cost_per_km("50")))
                .to_string(),
            "6000.00",
        );
        assert_eq!(
            calculate_cost(distance("0.25"), Some(cost_per_km("0.5")))
                .to_string(),
            "0.12",
        );
        assert_eq!(
            calculate_cost(distance("0.35"), Some(cost_per_km("0.1")))
                .to_string(),
            "0.04",
        );
    }

    #[test]
    fn cost_never_fails_on_huge_values() {
        let cost = calculate_cost(
            distance("99999999.99"),
            Some(cost_per_km("99999999.99")),
        );

        assert_eq!(cost.to_string(), "9999999998000000.00");
    }

    #[test]
    fn order_cost_uses_assigned_trailer_only() {
        let trailer = trailer("50");
        let mut order = order("120");

        assert_eq!(order.cost(Some(&trailer)), Money::ZERO);

        order.trailer = Some(trailer.id);
        assert_eq!(order.cost(Some(&trailer)).to_string(), "6000.00");
        assert_eq!(order.cost(None), Money::ZERO);
    }

    #[test]
    fn partner_required_over_long_distance() {
        let with_partner = driver(Some(driver::Id::new()));
        let without_partner = driver(None);

        assert!(has_partner(distance("600"), Some(&with_partner)));
        assert!(!has_partner(distance("600"), Some(&without_partner)));
        assert!(!has_partner(distance("400"), Some(&with_partner)));
        assert!(!has_partner(distance("500"), Some(&with_partner)));
        assert!(has_partner(distance("500.01"), Some(&with_partner)));
    }

    #[test]
    fn unassigned_driver_has_no_partner() {
        assert!(!has_partner(distance("600"), None));

        let with_partner = driver(Some(driver::Id::new()));
        let mut order = order("600");
        assert!(!order.has_partner(Some(&with_partner)));

        order.driver = Some(with_partner.id);
        assert!(order.has_partner(Some(&with_partner)));
    }

    #[test]
    fn solo_up_to_limit() {
        assert!(order("500").is_solo());
        assert!(order("12.5").is_solo());
        assert!(!order("500.01").is_solo());
    }
}
