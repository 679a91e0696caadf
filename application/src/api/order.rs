//! [`Order`]-related definitions.

use common::{DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLInputObject, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// An order for cargo transportation.
#[derive(Clone, Debug)]
pub struct Order {
    /// Underlying [`domain::Order`].
    order: domain::Order,

    /// [`domain::Trailer`] assigned to this [`Order`], once loaded.
    trailer: OnceCell<Option<domain::Trailer>>,

    /// [`domain::Driver`] assigned to this [`Order`], once loaded.
    driver: OnceCell<Option<domain::Driver>>,
}

impl From<domain::Order> for Order {
    fn from(order: domain::Order) -> Self {
        Self {
            order,
            trailer: OnceCell::new(),
            driver: OnceCell::new(),
        }
    }
}

impl Order {
    /// Returns the [`domain::Trailer`] assigned to this [`Order`], if any.
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Trailer`] cannot be loaded.
    async fn load_trailer(
        &self,
        ctx: &Context,
    ) -> Result<Option<&domain::Trailer>, Error> {
        let Some(id) = self.order.trailer else {
            return Ok(None);
        };
        self.trailer
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::trailer::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
            })
            .await
            .map(Option::as_ref)
    }

    /// Returns the [`domain::Driver`] assigned to this [`Order`], if any.
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Driver`] cannot be loaded.
    async fn load_driver(
        &self,
        ctx: &Context,
    ) -> Result<Option<&domain::Driver>, Error> {
        let Some(id) = self.order.driver else {
            return Ok(None);
        };
        self.driver
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::driver::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
            })
            .await
            .map(Option::as_ref)
    }
}

/// An order for cargo transportation.
#[graphql_object(context = Context)]
impl Order {
    /// Unique identifier of this `Order`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.order.id.into()
    }

    /// Name of the cargo of this `Order`.
    pub fn name(&self) -> Name {
        self.order.name.clone().into()
    }

    /// Weight of the cargo of this `Order`, in tonnes.
    pub fn weight(&self) -> Weight {
        self.order.weight.into()
    }

    /// Number of cargo items of this `Order`.
    pub fn items_count(&self) -> i32 {
        self.order.items_count.into()
    }

    /// Point where the transportation of this `Order` starts.
    pub fn departure_point(&self) -> Point {
        self.order.departure_point.clone().into()
    }

    /// Point where the transportation of this `Order` ends.
    pub fn destination_point(&self) -> Point {
        self.order.destination_point.clone().into()
    }

    /// Distance of the transportation of this `Order`, in kilometres.
    pub fn distance(&self) -> Distance {
        self.order.distance.into()
    }

    /// `Trailer` assigned to this `Order`, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.trailer",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn trailer(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Trailer>, Error> {
        Ok(self.load_trailer(ctx).await?.cloned().map(Into::into))
    }

    /// `Driver` assigned to this `Order`, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.driver",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn driver(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Driver>, Error> {
        Ok(self.load_driver(ctx).await?.cloned().map(Into::into))
    }

    /// `DateTime` when this `Order` was created.
    pub fn created_at(&self) -> DateTime {
        self.order.created_at.coerce()
    }

    /// Indicator whether this `Order` is completed.
    pub fn completed(&self) -> bool {
        self.order.completed
    }

    /// Cost of this `Order`.
    ///
    /// `0.00` if no `Trailer` is assigned.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.cost",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn cost(&self, ctx: &Context) -> Result<Money, Error> {
        Ok(self.order.cost(self.load_trailer(ctx).await?))
    }

    /// Indicator whether this `Order` route is long enough to require the
    /// assigned `Driver` to have a partner, and the partner exists.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.hasPartner",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn has_partner(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(self.order.has_partner(self.load_driver(ctx).await?))
    }
}

/// Unique identifier of an `Order`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::order::Id)]
#[into(domain::order::Id)]
#[graphql(name = "OrderId", transparent)]
pub struct Id(Uuid);

/// Name of the cargo of an `Order`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OrderName",
    with = scalar::Via::<domain::order::Name>,
)]
pub struct Name(domain::order::Name);

/// Departure or destination point of an `Order`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OrderPoint",
    with = scalar::Via::<domain::order::Point>,
)]
pub struct Point(domain::order::Point);

/// Weight of the cargo of an `Order`, in tonnes.
///
/// Decimal string with at most 6 integer and 2 fractional digits.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OrderWeight",
    with = scalar::Via::<domain::order::Weight>,
)]
pub struct Weight(domain::order::Weight);

/// Distance of an `Order` transportation, in kilometres.
///
/// Decimal string with at most 8 integer and 2 fractional digits.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OrderDistance",
    with = scalar::Via::<domain::order::Distance>,
)]
pub struct Distance(domain::order::Distance);

/// Full record of an `Order` to be stored.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "OrderInput")]
pub struct Input {
    /// Name of the cargo.
    pub name: Name,

    /// Weight of the cargo, in tonnes.
    pub weight: Weight,

    /// Number of cargo items.
    pub items_count: i32,

    /// Point where the transportation starts.
    pub departure_point: Point,

    /// Point where the transportation ends.
    pub destination_point: Point,

    /// Distance of the transportation, in kilometres.
    pub distance: Distance,

    /// ID of the `Trailer` to assign, if any.
    pub trailer: Option<api::trailer::Id>,

    /// ID of the `Driver` to assign, if any.
    pub driver: Option<api::driver::Id>,

    /// Indicator whether the `Order` is completed, `false` if omitted.
    pub completed: Option<bool>,
}

pub mod list {
    //! Definitions related to the [`Order`] list.

    use juniper::graphql_object;
    use service::read;

    use super::Order;
    use crate::Context;

    /// Page of the [`Order`] list.
    #[derive(Clone, Debug)]
    pub struct Page {
        /// Underlying [`read::order::list::Page`].
        page: read::order::list::Page,

        /// [`read::order::list::Sort`] the [`Page`] is selected with.
        sort: read::order::list::Sort,
    }

    impl Page {
        /// Creates a new [`Page`] selected with the provided
        /// [`read::order::list::Sort`].
        #[must_use]
        pub fn new(
            page: read::order::list::Page,
            sort: read::order::list::Sort,
        ) -> Self {
            Self { page, sort }
        }
    }

    /// Page of the `Order` list.
    #[graphql_object(name = "OrderListPage", context = Context)]
    impl Page {
        /// `Order`s on this page.
        #[must_use]
        pub fn orders(&self) -> Vec<Order> {
            self.page.items.iter().cloned().map(Into::into).collect()
        }

        /// Information about this page.
        #[must_use]
        pub fn page_info(&self) -> PageInfo {
            PageInfo(self.page.page_info())
        }

        /// Sort selector this page is actually selected with.
        ///
        /// Missing and unknown `sortBy` values are echoed as `newest`.
        #[must_use]
        pub fn sort_by(&self) -> &str {
            self.sort.as_ref()
        }
    }

    /// Information about a [`Page`].
    #[derive(Clone, Copy, Debug)]
    pub struct PageInfo(read::order::list::PageInfo);

    /// Information about an `OrderListPage`.
    #[graphql_object(name = "OrderListPageInfo", context = Context)]
    impl PageInfo {
        /// 1-based number of the page.
        #[must_use]
        pub fn number(&self) -> i32 {
            i32::try_from(self.0.number).unwrap_or(i32::MAX)
        }

        /// Total number of pages.
        #[must_use]
        pub fn total_pages(&self) -> i32 {
            i32::try_from(self.0.total_pages).unwrap_or(i32::MAX)
        }

        /// Total number of `Order`s.
        #[must_use]
        pub fn total_count(&self) -> i32 {
            i32::try_from(self.0.total_count).unwrap_or(i32::MAX)
        }

        /// Indicator whether there is a next page.
        #[must_use]
        pub fn has_next_page(&self) -> bool {
            self.0.has_next_page
        }

        /// Indicator whether there is a previous page.
        #[must_use]
        pub fn has_previous_page(&self) -> bool {
            self.0.has_previous_page
        }
    }

    #[cfg(test)]
    mod spec {
        use service::read::order::list;

        use super::Page;

        #[test]
        fn echoes_applied_sorting() {
            for (selector, applied) in [
                (None, "newest"),
                (Some("price"), "newest"),
                (Some("Distance"), "newest"),
                (Some("distance"), "distance"),
                (Some("weight"), "weight"),
            ] {
                let page = list::Page::new(
                    list::Arguments::new(None::<i32>, 20).unwrap(),
                    Vec::<list::Node>::new(),
                    0,
                );
                let sort = list::Sort::from_selector(selector);

                assert_eq!(Page::new(page, sort).sort_by(), applied);
            }
        }
    }
}
