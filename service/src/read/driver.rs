//! [`Driver`] read model definitions.

use derive_more::{From, Into};

#[cfg(doc)]
use crate::domain::{Order, Trailer};
use crate::domain::Driver;

/// [`Driver`] performing the most [`Order`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Top {
    /// The top [`Driver`] itself.
    pub driver: Driver,

    /// Number of [`Order`]s assigned to the [`Driver`].
    pub orders_count: OrdersCount,
}

/// Number of [`Order`]s assigned to a [`Driver`].
#[derive(Clone, Copy, Debug, Eq, From, Hash, Into, Ord, PartialEq, PartialOrd)]
pub struct OrdersCount(i64);

/// Number of records referencing a [`Driver`].
///
/// These references are detached once the [`Driver`] is deleted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct References {
    /// Number of other [`Driver`]s having the [`Driver`] as a partner.
    pub partners: i64,

    /// Number of [`Trailer`]s having the [`Driver`] as a primary one.
    pub trailers: i64,

    /// Number of [`Order`]s assigned to the [`Driver`].
    pub orders: i64,
}

impl References {
    /// Indicates whether nothing references the [`Driver`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partners == 0 && self.trailers == 0 && self.orders == 0
    }
}
