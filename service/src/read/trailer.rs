//! [`Trailer`] read model definitions.

use derive_more::{From, Into};

#[cfg(doc)]
use crate::domain::Order;
use crate::domain::Trailer;

/// [`Trailer`] assigned to the most [`Order`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Top {
    /// The top [`Trailer`] itself.
    pub trailer: Trailer,

    /// Number of [`Order`]s assigned to the [`Trailer`].
    pub orders_count: OrdersCount,
}

/// Number of [`Order`]s assigned to a [`Trailer`].
#[derive(Clone, Copy, Debug, Eq, From, Hash, Into, Ord, PartialEq, PartialOrd)]
pub struct OrdersCount(i64);

/// Number of [`Order`]s referencing a [`Trailer`].
///
/// These references are detached once the [`Trailer`] is deleted.
#[derive(Clone, Copy, Debug, Default, Eq, From, Into, PartialEq)]
pub struct References(i64);
