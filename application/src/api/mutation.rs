//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{command, domain, Command as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `Driver` with the provided details.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_EXPERIENCE` - the provided experience is negative;
    /// - `INVALID_PARTNER_REFERENCE` - the partner `Driver` with the
    ///                                 provided ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            full_name = %input.full_name,
            gql.name = "createDriver",
            otel.name = Self::SPAN_NAME,
            partner = ?input.partner.map(|id| id.to_string()),
        ),
    )]
    pub async fn create_driver(
        input: api::driver::Input,
        ctx: &Context,
    ) -> Result<api::Driver, Error> {
        let api::driver::Input {
            full_name,
            passport_number,
            experience,
            class,
            partner,
        } = input;
        let experience = experience_from(experience).map_err(ctx.error())?;

        ctx.service()
            .execute(command::CreateDriver {
                full_name: full_name.into(),
                passport_number: passport_number.into(),
                experience,
                class: class.into(),
                partner: partner.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Replaces the details of the `Driver` with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_EXPERIENCE` - the provided experience is negative;
    /// - `DRIVER_NOT_EXISTS` - the `Driver` with the provided ID does not
    ///                         exist;
    /// - `INVALID_PARTNER_REFERENCE` - the partner `Driver` with the
    ///                                 provided ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            full_name = %input.full_name,
            gql.name = "updateDriver",
            id = %id,
            otel.name = Self::SPAN_NAME,
            partner = ?input.partner.map(|id| id.to_string()),
        ),
    )]
    pub async fn update_driver(
        id: api::driver::Id,
        input: api::driver::Input,
        ctx: &Context,
    ) -> Result<api::Driver, Error> {
        let api::driver::Input {
            full_name,
            passport_number,
            experience,
            class,
            partner,
        } = input;
        let experience = experience_from(experience).map_err(ctx.error())?;

        ctx.service()
            .execute(command::UpdateDriver {
                id: id.into(),
                full_name: full_name.into(),
                passport_number: passport_number.into(),
                experience,
                class: class.into(),
                partner: partner.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Driver` with the provided ID.
    ///
    /// `Trailer`s, `Order`s and partners referencing the `Driver` are
    /// detached from it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `DRIVER_NOT_EXISTS` - the `Driver` with the provided ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteDriver",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_driver(
        id: api::driver::Id,
        ctx: &Context,
    ) -> Result<api::Driver, Error> {
        ctx.service()
            .execute(command::DeleteDriver { id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Trailer` with the provided details.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_DRIVER_REFERENCE` - the assigned `Driver` with the
    ///                                provided ID does not exist;
    /// - `LICENSE_PLATE_OCCUPIED` - the provided license plate is used by
    ///                              another `Trailer`.
    #[tracing::instrument(
        skip_all,
        fields(
            brand = %input.brand,
            driver = ?input.driver.map(|id| id.to_string()),
            gql.name = "createTrailer",
            license_plate = %input.license_plate,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_trailer(
        input: api::trailer::Input,
        ctx: &Context,
    ) -> Result<api::Trailer, Error> {
        let api::trailer::Input {
            brand,
            company,
            license_plate,
            load_capacity,
            fuel_consumption,
            length,
            cost_per_km,
            driver,
        } = input;

        ctx.service()
            .execute(command::CreateTrailer {
                brand: brand.into(),
                company: company.into(),
                license_plate: license_plate.into(),
                load_capacity: load_capacity.into(),
                fuel_consumption: fuel_consumption.into(),
                length: length.into(),
                cost_per_km: cost_per_km.map(Into::into),
                driver: driver.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Replaces the details of the `Trailer` with the provided ID.
    ///
    /// Omitted `costPerKm` resets the rate to the default one.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `TRAILER_NOT_EXISTS` - the `Trailer` with the provided ID does not
    ///                          exist;
    /// - `INVALID_DRIVER_REFERENCE` - the assigned `Driver` with the
    ///                                provided ID does not exist;
    /// - `LICENSE_PLATE_OCCUPIED` - the provided license plate is used by
    ///                              another `Trailer`.
    #[tracing::instrument(
        skip_all,
        fields(
            brand = %input.brand,
            driver = ?input.driver.map(|id| id.to_string()),
            gql.name = "updateTrailer",
            id = %id,
            license_plate = %input.license_plate,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_trailer(
        id: api::trailer::Id,
        input: api::trailer::Input,
        ctx: &Context,
    ) -> Result<api::Trailer, Error> {
        let api::trailer::Input {
            brand,
            company,
            license_plate,
            load_capacity,
            fuel_consumption,
            length,
            cost_per_km,
            driver,
        } = input;

        ctx.service()
            .execute(command::UpdateTrailer {
                id: id.into(),
                brand: brand.into(),
                company: company.into(),
                license_plate: license_plate.into(),
                load_capacity: load_capacity.into(),
                fuel_consumption: fuel_consumption.into(),
                length: length.into(),
                cost_per_km: cost_per_km.map(Into::into).unwrap_or_default(),
                driver: driver.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Trailer` with the provided ID.
    ///
    /// `Order`s referencing the `Trailer` are detached from it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `TRAILER_NOT_EXISTS` - the `Trailer` with the provided ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteTrailer",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_trailer(
        id: api::trailer::Id,
        ctx: &Context,
    ) -> Result<api::Trailer, Error> {
        ctx.service()
            .execute(command::DeleteTrailer { id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Order` with the provided details.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_ITEMS_COUNT` - the provided items count is negative;
    /// - `INVALID_TRAILER_REFERENCE` - the assigned `Trailer` with the
    ///                                 provided ID does not exist;
    /// - `INVALID_DRIVER_REFERENCE` - the assigned `Driver` with the
    ///                                provided ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            driver = ?input.driver.map(|id| id.to_string()),
            gql.name = "createOrder",
            name = %input.name,
            otel.name = Self::SPAN_NAME,
            trailer = ?input.trailer.map(|id| id.to_string()),
        ),
    )]
    pub async fn create_order(
        input: api::order::Input,
        ctx: &Context,
    ) -> Result<api::Order, Error> {
        let api::order::Input {
            name,
            weight,
            items_count,
            departure_point,
            destination_point,
            distance,
            trailer,
            driver,
            completed,
        } = input;
        let items_count = items_count_from(items_count).map_err(ctx.error())?;

        ctx.service()
            .execute(command::CreateOrder {
                name: name.into(),
                weight: weight.into(),
                items_count,
                departure_point: departure_point.into(),
                destination_point: destination_point.into(),
                distance: distance.into(),
                trailer: trailer.map(Into::into),
                driver: driver.map(Into::into),
                completed: completed.unwrap_or_default(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Replaces the details of the `Order` with the provided ID.
    ///
    /// The `Order` keeps its creation `DateTime`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_ITEMS_COUNT` - the provided items count is negative;
    /// - `ORDER_NOT_EXISTS` - the `Order` with the provided ID does not
    ///                        exist;
    /// - `INVALID_TRAILER_REFERENCE` - the assigned `Trailer` with the
    ///                                 provided ID does not exist;
    /// - `INVALID_DRIVER_REFERENCE` - the assigned `Driver` with the
    ///                                provided ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            driver = ?input.driver.map(|id| id.to_string()),
            gql.name = "updateOrder",
            id = %id,
            name = %input.name,
            otel.name = Self::SPAN_NAME,
            trailer = ?input.trailer.map(|id| id.to_string()),
        ),
    )]
    pub async fn update_order(
        id: api::order::Id,
        input: api::order::Input,
        ctx: &Context,
    ) -> Result<api::Order, Error> {
        let api::order::Input {
            name,
            weight,
            items_count,
            departure_point,
            destination_point,
            distance,
            trailer,
            driver,
            completed,
        } = input;
        let items_count = items_count_from(items_count).map_err(ctx.error())?;

        ctx.service()
            .execute(command::UpdateOrder {
                id: id.into(),
                name: name.into(),
                weight: weight.into(),
                items_count,
                departure_point: departure_point.into(),
                destination_point: destination_point.into(),
                distance: distance.into(),
                trailer: trailer.map(Into::into),
                driver: driver.map(Into::into),
                completed: completed.unwrap_or_default(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Order` with the provided ID.
    ///
    /// Nothing is deleted unless `confirm` is `true`, so clients are expected
    /// to review the `Order` first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `DELETION_NOT_CONFIRMED` - the `confirm` is not `true`;
    /// - `ORDER_NOT_EXISTS` - the `Order` with the provided ID does not
    ///                        exist.
    #[tracing::instrument(
        skip_all,
        fields(
            confirm = ?confirm,
            gql.name = "deleteOrder",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_order(
        id: api::order::Id,
        confirm: Option<bool>,
        ctx: &Context,
    ) -> Result<api::Order, Error> {
        if confirm != Some(true) {
            return Err(ctx.error()(MutationError::DeletionNotConfirmed.into()));
        }

        ctx.service()
            .execute(command::DeleteOrder { id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

/// Validates the provided GraphQL integer as a [`domain::driver::Experience`].
fn experience_from(value: i32) -> Result<domain::driver::Experience, Error> {
    domain::driver::Experience::new(value)
        .ok_or_else(|| MutationError::InvalidExperience.into())
}

/// Validates the provided GraphQL integer as a [`domain::order::ItemsCount`].
fn items_count_from(value: i32) -> Result<domain::order::ItemsCount, Error> {
    domain::order::ItemsCount::new(value)
        .ok_or_else(|| MutationError::InvalidItemsCount.into())
}

define_error! {
    enum MutationError {
        #[code = "INVALID_EXPERIENCE"]
        #[status = BAD_REQUEST]
        #[message = "Driving experience must not be negative"]
        InvalidExperience,

        #[code = "INVALID_ITEMS_COUNT"]
        #[status = BAD_REQUEST]
        #[message = "Items count must not be negative"]
        InvalidItemsCount,

        #[code = "DELETION_NOT_CONFIRMED"]
        #[status = BAD_REQUEST]
        #[message = "Deletion must be confirmed with `confirm: true`"]
        DeletionNotConfirmed,
    }
}

define_error! {
    enum ReferenceError {
        #[code = "INVALID_PARTNER_REFERENCE"]
        #[status = BAD_REQUEST]
        #[message = "Partner `Driver` with the specified ID does not exist"]
        InvalidPartner,

        #[code = "INVALID_DRIVER_REFERENCE"]
        #[status = BAD_REQUEST]
        #[message = "Assigned `Driver` with the specified ID does not exist"]
        InvalidDriver,

        #[code = "INVALID_TRAILER_REFERENCE"]
        #[status = BAD_REQUEST]
        #[message = "Assigned `Trailer` with the specified ID does not exist"]
        InvalidTrailer,

        #[code = "LICENSE_PLATE_OCCUPIED"]
        #[status = CONFLICT]
        #[message = "`TrailerLicensePlate` is used by another `Trailer`"]
        LicensePlateOccupied,
    }
}

impl AsError for command::create_driver::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PartnerNotExists(_) => {
                Some(ReferenceError::InvalidPartner.into())
            }
        }
    }
}

impl AsError for command::update_driver::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DriverNotExists(_) => {
                Some(api::query::DriverError::NotExists.into())
            }
            Self::PartnerNotExists(_) => {
                Some(ReferenceError::InvalidPartner.into())
            }
        }
    }
}

impl AsError for command::delete_driver::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DriverNotExists(_) => {
                Some(api::query::DriverError::NotExists.into())
            }
        }
    }
}

impl AsError for command::create_trailer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DriverNotExists(_) => {
                Some(ReferenceError::InvalidDriver.into())
            }
            Self::LicensePlateOccupied(_) => {
                Some(ReferenceError::LicensePlateOccupied.into())
            }
        }
    }
}

impl AsError for command::update_trailer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::TrailerNotExists(_) => {
                Some(api::query::TrailerError::NotExists.into())
            }
            Self::DriverNotExists(_) => {
                Some(ReferenceError::InvalidDriver.into())
            }
            Self::LicensePlateOccupied(_) => {
                Some(ReferenceError::LicensePlateOccupied.into())
            }
        }
    }
}

impl AsError for command::delete_trailer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::TrailerNotExists(_) => {
                Some(api::query::TrailerError::NotExists.into())
            }
        }
    }
}

impl AsError for command::create_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::TrailerNotExists(_) => {
                Some(ReferenceError::InvalidTrailer.into())
            }
            Self::DriverNotExists(_) => {
                Some(ReferenceError::InvalidDriver.into())
            }
        }
    }
}

impl AsError for command::update_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OrderNotExists(_) => {
                Some(api::query::OrderError::NotExists.into())
            }
            Self::TrailerNotExists(_) => {
                Some(ReferenceError::InvalidTrailer.into())
            }
            Self::DriverNotExists(_) => {
                Some(ReferenceError::InvalidDriver.into())
            }
        }
    }
}

impl AsError for command::delete_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OrderNotExists(_) => {
                Some(api::query::OrderError::NotExists.into())
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{command, domain};

    use crate::AsError as _;

    #[test]
    fn rejects_missing_references_as_bad_input() {
        let trailer = domain::trailer::Id::new();
        let driver = domain::driver::Id::new();

        for (err, code) in [
            (
                command::create_order::ExecutionError::TrailerNotExists(trailer)
                    .try_as_error(),
                "INVALID_TRAILER_REFERENCE",
            ),
            (
                command::update_order::ExecutionError::DriverNotExists(driver)
                    .try_as_error(),
                "INVALID_DRIVER_REFERENCE",
            ),
            (
                command::create_trailer::ExecutionError::DriverNotExists(driver)
                    .try_as_error(),
                "INVALID_DRIVER_REFERENCE",
            ),
            (
                command::create_driver::ExecutionError::PartnerNotExists(driver)
                    .try_as_error(),
                "INVALID_PARTNER_REFERENCE",
            ),
        ] {
            let err = err.unwrap();

            assert_eq!(err.code, code);
            assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn missing_targets_are_not_found() {
        for (err, code) in [
            (
                command::update_trailer::ExecutionError::TrailerNotExists(
                    domain::trailer::Id::new(),
                )
                .try_as_error(),
                "TRAILER_NOT_EXISTS",
            ),
            (
                command::update_order::ExecutionError::OrderNotExists(
                    domain::order::Id::new(),
                )
                .try_as_error(),
                "ORDER_NOT_EXISTS",
            ),
            (
                command::update_driver::ExecutionError::DriverNotExists(
                    domain::driver::Id::new(),
                )
                .try_as_error(),
                "DRIVER_NOT_EXISTS",
            ),
        ] {
            let err = err.unwrap();

            assert_eq!(err.code, code);
            assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
        }
    }
}
