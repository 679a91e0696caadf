//! [`Trailer`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLInputObject, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    Context,
};

/// A trailer used for transportation.
#[derive(Clone, Debug, From, Into)]
pub struct Trailer(domain::Trailer);

/// A trailer used for transportation.
#[graphql_object(context = Context)]
impl Trailer {
    /// Unique identifier of this `Trailer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Trailer.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Brand of this `Trailer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Trailer.brand",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn brand(&self) -> Brand {
        self.0.brand.clone().into()
    }

    /// Company owning this `Trailer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Trailer.company",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn company(&self) -> Company {
        self.0.company.clone().into()
    }

    /// License plate of this `Trailer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Trailer.licensePlate",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn license_plate(&self) -> LicensePlate {
        self.0.license_plate.clone().into()
    }

    /// Load capacity of this `Trailer`, in tonnes.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Trailer.loadCapacity",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn load_capacity(&self) -> LoadCapacity {
        self.0.load_capacity.into()
    }

    /// Fuel consumption of this `Trailer`, in litres per 100 km.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Trailer.fuelConsumption",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn fuel_consumption(&self) -> FuelConsumption {
        self.0.fuel_consumption.into()
    }

    /// Length of this `Trailer`, in metres.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Trailer.length",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn length(&self) -> Length {
        self.0.length.into()
    }

    /// Cost of transportation per kilometre with this `Trailer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Trailer.costPerKm",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn cost_per_km(&self) -> CostPerKm {
        self.0.cost_per_km.into()
    }

    /// Primary `Driver` of this `Trailer`, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Trailer.driver",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn driver(&self) -> Option<api::Driver> {
        self.0.driver.map(|id| {
            #[expect(
                unsafe_code,
                reason = "foreign key guarantees `Driver` existence"
            )]
            unsafe {
                api::Driver::new_unchecked(id)
            }
        })
    }
}

/// Unique identifier of a `Trailer`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::trailer::Id)]
#[into(domain::trailer::Id)]
#[graphql(name = "TrailerId", transparent)]
pub struct Id(Uuid);

/// Brand of a `Trailer`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TrailerBrand",
    with = scalar::Via::<domain::trailer::Brand>,
)]
pub struct Brand(domain::trailer::Brand);

/// Company owning a `Trailer`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TrailerCompany",
    with = scalar::Via::<domain::trailer::Company>,
)]
pub struct Company(domain::trailer::Company);

/// License plate of a `Trailer`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TrailerLicensePlate",
    with = scalar::Via::<domain::trailer::LicensePlate>,
)]
pub struct LicensePlate(domain::trailer::LicensePlate);

/// Load capacity of a `Trailer`, in tonnes.
///
/// Decimal string with at most 6 integer and 2 fractional digits.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TrailerLoadCapacity",
    with = scalar::Via::<domain::trailer::LoadCapacity>,
)]
pub struct LoadCapacity(domain::trailer::LoadCapacity);

/// Fuel consumption of a `Trailer`, in litres per 100 km.
///
/// Decimal string with at most 3 integer and 2 fractional digits.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TrailerFuelConsumption",
    with = scalar::Via::<domain::trailer::FuelConsumption>,
)]
pub struct FuelConsumption(domain::trailer::FuelConsumption);

/// Length of a `Trailer`, in metres.
///
/// Decimal string with at most 3 integer and 2 fractional digits.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TrailerLength",
    with = scalar::Via::<domain::trailer::Length>,
)]
pub struct Length(domain::trailer::Length);

/// Cost of transportation per kilometre with a `Trailer`.
///
/// Decimal string with at most 8 integer and 2 fractional digits.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TrailerCostPerKm",
    with = scalar::Via::<domain::trailer::CostPerKm>,
)]
pub struct CostPerKm(domain::trailer::CostPerKm);

/// Full record of a `Trailer` to be stored.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "TrailerInput")]
pub struct Input {
    /// Brand of the `Trailer`.
    pub brand: Brand,

    /// Company owning the `Trailer`.
    pub company: Company,

    /// License plate of the `Trailer`, unique among all `Trailer`s.
    pub license_plate: LicensePlate,

    /// Load capacity of the `Trailer`, in tonnes.
    pub load_capacity: LoadCapacity,

    /// Fuel consumption of the `Trailer`, in litres per 100 km.
    pub fuel_consumption: FuelConsumption,

    /// Length of the `Trailer`, in metres.
    pub length: Length,

    /// Cost of transportation per kilometre, `50.00` if omitted.
    pub cost_per_km: Option<CostPerKm>,

    /// ID of the primary `Driver`, if any.
    pub driver: Option<api::driver::Id>,
}
