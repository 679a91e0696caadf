//! [`Order`] read model definitions.

use common::Money;
use derive_more::{From, Into};

use crate::domain::{order, trailer};
#[cfg(doc)]
use crate::domain::{order::Distance, Order, Trailer};

/// Selector of solo [`Order`]s, newest first.
///
/// See [`Order::is_solo()`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Solo;

/// Route of an [`Order`] with the rate of its [`Trailer`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Route {
    /// [`Distance`] of the [`Order`].
    pub distance: order::Distance,

    /// [`trailer::CostPerKm`] of the [`Trailer`] assigned to the [`Order`],
    /// if any.
    pub cost_per_km: Option<trailer::CostPerKm>,
}

/// Profit of all [`Order`]s calculated as the total [`Distance`] multiplied
/// by the total rate of the assigned [`Trailer`]s.
///
/// Doesn't match the sum of [`Order`] costs. Kept to compare with the figures
/// reported before.
#[derive(Clone, Copy, Debug, Default, Eq, From, Into, PartialEq)]
pub struct LegacyProfit(Money);

pub mod list {
    //! [`Order`]s list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};
    use strum::{AsRefStr, EnumString};

    use crate::domain::Order;

    define_pagination!(Node, Sort);

    /// Node in a [`Page`].
    pub type Node = Order;

    /// Sorting of [`Order`]s in a list.
    ///
    /// Ties are broken by [`Order`] IDs.
    #[derive(
        AsRefStr, Clone, Copy, Debug, Default, EnumString, Eq, Hash, PartialEq,
    )]
    #[strum(serialize_all = "snake_case")]
    pub enum Sort {
        /// By distance, shortest first.
        Distance,

        /// By cargo weight, lightest first.
        Weight,

        /// By creation time, newest first.
        #[default]
        Newest,
    }

    impl Sort {
        /// Selects a [`Sort`] by the provided `selector`.
        ///
        /// Unknown or missing `selector` means [`Sort::Newest`].
        #[must_use]
        pub fn from_selector(selector: Option<&str>) -> Self {
            selector.and_then(|s| s.parse().ok()).unwrap_or_default()
        }
    }

    /// Total count of [`Order`]s.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i64);

    #[cfg(test)]
    mod spec {
        use super::Sort;

        #[test]
        fn selects_sort() {
            assert_eq!(Sort::from_selector(Some("distance")), Sort::Distance);
            assert_eq!(Sort::from_selector(Some("weight")), Sort::Weight);
            assert_eq!(Sort::from_selector(Some("newest")), Sort::Newest);
        }

        #[test]
        fn falls_back_to_newest() {
            assert_eq!(Sort::from_selector(None), Sort::Newest);
            assert_eq!(Sort::from_selector(Some("")), Sort::Newest);
            assert_eq!(Sort::from_selector(Some("price")), Sort::Newest);
            assert_eq!(Sort::from_selector(Some("Distance")), Sort::Newest);
        }
    }
}
