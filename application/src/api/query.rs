//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Fetches the page of `Order`s.
    ///
    /// At most 20 `Order`s are returned on a single page. Unknown `sortBy`
    /// values fall back to the default sorting.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGE` - the `page` is not positive;
    /// - `PAGE_OUT_OF_RANGE` - the `page` is beyond the last one.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "orders",
            otel.name = Self::SPAN_NAME,
            page = ?page,
            sort_by = ?sort_by,
        ),
    )]
    pub async fn orders(
        #[graphql(desc = "`distance`, `weight` or `newest` (default).")]
        sort_by: Option<String>,
        page: Option<i32>,
        ctx: &Context,
    ) -> Result<api::order::list::Page, Error> {
        let sort = read::order::list::Sort::from_selector(sort_by.as_deref());
        ctx.service()
            .execute(query::orders::List { sort, page })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|p| api::order::list::Page::new(p, sort))
    }

    /// Returns the `Order` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ORDER_NOT_EXISTS` - the `Order` with the specified ID does not
    ///                        exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "order",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn order(
        id: api::order::Id,
        ctx: &Context,
    ) -> Result<api::Order, Error> {
        ctx.service()
            .execute(query::order::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| OrderError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Fetches all the `Driver`s ordered by their full names.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "drivers",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn drivers(ctx: &Context) -> Result<Vec<api::Driver>, Error> {
        ctx.service()
            .execute(query::drivers::List::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ds| ds.into_iter().map(Into::into).collect())
    }

    /// Returns the `Driver` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `DRIVER_NOT_EXISTS` - the `Driver` with the specified ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "driver",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn driver(
        id: api::driver::Id,
        ctx: &Context,
    ) -> Result<api::Driver, Error> {
        ctx.service()
            .execute(query::driver::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| DriverError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Fetches all the `Trailer`s ordered by their brands.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "trailers",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn trailers(ctx: &Context) -> Result<Vec<api::Trailer>, Error> {
        ctx.service()
            .execute(query::trailers::List::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ts| ts.into_iter().map(Into::into).collect())
    }

    /// Returns the `Trailer` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `TRAILER_NOT_EXISTS` - the `Trailer` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "trailer",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn trailer(
        id: api::trailer::Id,
        ctx: &Context,
    ) -> Result<api::Trailer, Error> {
        ctx.service()
            .execute(query::trailer::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| TrailerError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Calculates the statistics over all `Order`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "statistics",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn statistics(ctx: &Context) -> Result<api::Statistics, Error> {
        ctx.service()
            .execute(query::report::Statistics)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for query::orders::ListError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_PAGE"]
                #[status = BAD_REQUEST]
                #[message = "Page number must be positive"]
                InvalidPage,

                #[code = "PAGE_OUT_OF_RANGE"]
                #[status = NOT_FOUND]
                #[message = "Page is beyond the last one"]
                PageOutOfRange,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidPage(_) => Some(Error::InvalidPage.into()),
            Self::PageOutOfRange(_) => Some(Error::PageOutOfRange.into()),
        }
    }
}

define_error! {
    enum DriverError {
        #[code = "DRIVER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Driver` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum OrderError {
        #[code = "ORDER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Order` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum TrailerError {
        #[code = "TRAILER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Trailer` with the specified ID does not exist"]
        NotExists,
    }
}
