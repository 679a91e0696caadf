//! [`Driver`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A driver performing transportation.
#[derive(Clone, Debug)]
pub struct Driver {
    /// ID of this [`Driver`].
    pub id: Id,

    /// Underlying [`domain::Driver`].
    driver: OnceCell<domain::Driver>,
}

impl From<domain::Driver> for Driver {
    fn from(driver: domain::Driver) -> Self {
        Self {
            id: driver.id.into(),
            driver: OnceCell::new_with(Some(driver)),
        }
    }
}

impl Driver {
    /// Creates a new [`Driver`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Driver`] with the provided ID exists,
    /// otherwise accessing this [`Driver`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            driver: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Driver`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Driver`] doesn't exist.
    pub(crate) async fn driver(
        &self,
        ctx: &Context,
    ) -> Result<&domain::Driver, Error> {
        let id = self.id.into();
        self.driver
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::driver::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|d| {
                        future::ready(d.ok_or_else(|| {
                            api::query::DriverError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A driver performing transportation.
#[graphql_object(context = Context)]
impl Driver {
    /// Unique identifier of this `Driver`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Driver.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Full name of this `Driver`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Driver.fullName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn full_name(&self, ctx: &Context) -> Result<FullName, Error> {
        Ok(self.driver(ctx).await?.full_name.clone().into())
    }

    /// Passport number of this `Driver`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Driver.passportNumber",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn passport_number(
        &self,
        ctx: &Context,
    ) -> Result<PassportNumber, Error> {
        Ok(self.driver(ctx).await?.passport_number.clone().into())
    }

    /// Driving experience of this `Driver`, in years.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Driver.experience",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn experience(&self, ctx: &Context) -> Result<i32, Error> {
        Ok(self.driver(ctx).await?.experience.into())
    }

    /// Class of this `Driver`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Driver.class",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn class(&self, ctx: &Context) -> Result<Class, Error> {
        Ok(self.driver(ctx).await?.class.into())
    }

    /// Partner of this `Driver` on long routes, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Driver.partner",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn partner(&self, ctx: &Context) -> Result<Option<Self>, Error> {
        Ok(self.driver(ctx).await?.partner.map(|id| {
            #[expect(
                unsafe_code,
                reason = "foreign key guarantees `Driver` existence"
            )]
            unsafe {
                Self::new_unchecked(id)
            }
        }))
    }
}

/// Unique identifier of a `Driver`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::driver::Id)]
#[into(domain::driver::Id)]
#[graphql(name = "DriverId", transparent)]
pub struct Id(Uuid);

/// Full name of a `Driver`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "DriverFullName",
    with = scalar::Via::<domain::driver::FullName>,
)]
pub struct FullName(domain::driver::FullName);

/// Passport number of a `Driver`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "DriverPassportNumber",
    with = scalar::Via::<domain::driver::PassportNumber>,
)]
pub struct PassportNumber(domain::driver::PassportNumber);

/// Class of a `Driver`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "DriverClass")]
pub enum Class {
    /// The first class.
    First,

    /// The second class.
    Second,

    /// The third class.
    Third,
}

impl From<domain::driver::Class> for Class {
    fn from(class: domain::driver::Class) -> Self {
        use domain::driver::Class as C;
        match class {
            C::First => Self::First,
            C::Second => Self::Second,
            C::Third => Self::Third,
        }
    }
}

impl From<Class> for domain::driver::Class {
    fn from(class: Class) -> Self {
        match class {
            Class::First => Self::First,
            Class::Second => Self::Second,
            Class::Third => Self::Third,
        }
    }
}

/// Full record of a `Driver` to be stored.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "DriverInput")]
pub struct Input {
    /// Full name of the `Driver`.
    pub full_name: FullName,

    /// Passport number of the `Driver`.
    pub passport_number: PassportNumber,

    /// Driving experience of the `Driver`, in years.
    pub experience: i32,

    /// Class of the `Driver`.
    pub class: Class,

    /// ID of the partner `Driver`, if any.
    pub partner: Option<Id>,
}
