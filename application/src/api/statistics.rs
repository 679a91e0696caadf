//! [`Statistics`]-related definitions.

use common::Money;
use juniper::graphql_object;
use service::{query, read};

use crate::{api, Context};

/// Aggregated statistics over all `Order`s.
#[derive(Clone, Debug)]
pub struct Statistics(query::report::statistics::Output);

impl From<query::report::statistics::Output> for Statistics {
    fn from(output: query::report::statistics::Output) -> Self {
        Self(output)
    }
}

/// Aggregated statistics over all `Order`s.
#[graphql_object(context = Context)]
impl Statistics {
    /// `Trailer` assigned to the most `Order`s, if any `Trailer` exists.
    #[must_use]
    pub fn top_trailer(&self) -> Option<TopTrailer> {
        self.0.top_trailer.clone().map(TopTrailer)
    }

    /// `Driver` assigned to the most `Order`s, if any `Driver` exists.
    #[must_use]
    pub fn top_driver(&self) -> Option<TopDriver> {
        self.0.top_driver.clone().map(TopDriver)
    }

    /// `Order`s short enough to be performed by a single `Driver`, newest
    /// first.
    #[must_use]
    pub fn solo_orders(&self) -> Vec<api::Order> {
        self.0.solo_orders.iter().cloned().map(Into::into).collect()
    }

    /// Sum of all the `Order` costs.
    #[must_use]
    pub fn total_profit(&self) -> Money {
        self.0.total_profit
    }

    /// Total distance of all `Order`s multiplied by the total rate of their
    /// `Trailer`s, as it was reported before.
    ///
    /// Doesn't match `totalProfit` in general.
    #[must_use]
    pub fn legacy_profit(&self) -> Money {
        self.0.legacy_profit.into()
    }
}

/// `Trailer` assigned to the most `Order`s.
#[derive(Clone, Debug)]
pub struct TopTrailer(read::trailer::Top);

/// `Trailer` assigned to the most `Order`s.
#[graphql_object(context = Context)]
impl TopTrailer {
    /// The `Trailer` itself.
    #[must_use]
    pub fn trailer(&self) -> api::Trailer {
        self.0.trailer.clone().into()
    }

    /// Number of `Order`s assigned to the `Trailer`.
    #[must_use]
    pub fn orders_count(&self) -> i32 {
        i32::try_from(i64::from(self.0.orders_count)).unwrap_or(i32::MAX)
    }
}

/// `Driver` assigned to the most `Order`s.
#[derive(Clone, Debug)]
pub struct TopDriver(read::driver::Top);

/// `Driver` assigned to the most `Order`s.
#[graphql_object(context = Context)]
impl TopDriver {
    /// The `Driver` itself.
    #[must_use]
    pub fn driver(&self) -> api::Driver {
        self.0.driver.clone().into()
    }

    /// Number of `Order`s assigned to the `Driver`.
    #[must_use]
    pub fn orders_count(&self) -> i32 {
        i32::try_from(i64::from(self.0.orders_count)).unwrap_or(i32::MAX)
    }
}
