//! [`Command`] for creating a new [`Trailer`].

use common::operations::{By, Commit, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{driver, trailer, Driver, Trailer},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Trailer`].
#[derive(Clone, Debug)]
pub struct CreateTrailer {
    /// [`trailer::Brand`] of a new [`Trailer`].
    pub brand: trailer::Brand,

    /// [`trailer::Company`] of a new [`Trailer`].
    pub company: trailer::Company,

    /// [`trailer::LicensePlate`] of a new [`Trailer`].
    pub license_plate: trailer::LicensePlate,

    /// [`trailer::LoadCapacity`] of a new [`Trailer`].
    pub load_capacity: trailer::LoadCapacity,

    /// [`trailer::FuelConsumption`] of a new [`Trailer`].
    pub fuel_consumption: trailer::FuelConsumption,

    /// [`trailer::Length`] of a new [`Trailer`].
    pub length: trailer::Length,

    /// [`trailer::CostPerKm`] of a new [`Trailer`].
    ///
    /// [`trailer::CostPerKm::default()`] is used if [`None`].
    pub cost_per_km: Option<trailer::CostPerKm>,

    /// ID of the primary [`Driver`] of a new [`Trailer`], if any.
    pub driver: Option<driver::Id>,
}

impl<Db> Command<CreateTrailer> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Driver>, driver::Id>>,
            Ok = Option<Driver>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Trailer>, trailer::LicensePlate>>,
            Ok = Option<Trailer>,
            Err = Traced<database::Error>,
        > + Database<Insert<Trailer>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Trailer;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateTrailer) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateTrailer {
            brand,
            company,
            license_plate,
            load_capacity,
            fuel_consumption,
            length,
            cost_per_km,
            driver,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if let Some(driver_id) = driver {
            _ = tx
                .execute(Select(By::<Option<Driver>, _>::new(driver_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::DriverNotExists(driver_id))
                .map_err(tracerr::wrap!())?;
        }

        let occupied = tx
            .execute(Select(By::<Option<Trailer>, _>::new(
                license_plate.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .is_some();
        if occupied {
            return Err(tracerr::new!(E::LicensePlateOccupied(license_plate)));
        }

        let trailer = Trailer {
            id: trailer::Id::new(),
            brand,
            company,
            license_plate,
            load_capacity,
            fuel_consumption,
            length,
            cost_per_km: cost_per_km.unwrap_or_default(),
            driver,
        };
        match tx.execute(Insert(trailer.clone())).await {
            Ok(()) => {}
            Err(e)
                if e.as_ref().is_unique_violation(Some(
                    database::LICENSE_PLATE_CONSTRAINT,
                )) =>
            {
                return Err(tracerr::new!(E::LicensePlateOccupied(
                    trailer.license_plate
                )));
            }
            Err(e) => {
                return Err(e).map_err(tracerr::map_from_and_wrap!(=> E));
            }
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(trailer)
    }
}

/// Error of [`CreateTrailer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Primary [`Driver`] doesn't exist.
    #[display("`Driver(id: {_0})` does not exist")]
    #[from(ignore)]
    DriverNotExists(#[error(not(source))] driver::Id),

    /// [`trailer::LicensePlate`] is used by another [`Trailer`] already.
    #[display("`LicensePlate({_0})` is occupied")]
    #[from(ignore)]
    LicensePlateOccupied(#[error(not(source))] trailer::LicensePlate),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};

    use crate::{
        command::CreateTrailer,
        domain::{driver, Trailer},
        fixture,
        infra::Database,
    };

    use super::ExecutionError;

    #[tokio::test]
    async fn uses_default_rate() {
        let svc = fixture::service();

        let trailer = svc
            .execute(fixture::trailer("Krone", "AA0001AA"))
            .await
            .unwrap();
        assert_eq!(trailer.cost_per_km.to_string(), "50.00");

        let trailer = svc
            .execute(CreateTrailer {
                cost_per_km: Some("12.5".parse().unwrap()),
                ..fixture::trailer("Krone", "AA0002AA")
            })
            .await
            .unwrap();
        assert_eq!(trailer.cost_per_km.to_string(), "12.50");
    }

    #[tokio::test]
    async fn rejects_occupied_license_plate() {
        let svc = fixture::service();
        _ = svc
            .execute(fixture::trailer("Krone", "AA0001AA"))
            .await
            .unwrap();

        let err = svc
            .execute(fixture::trailer("Schmitz", "AA0001AA"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.into_inner(),
            ExecutionError::LicensePlateOccupied(_),
        ));

        let trailers = svc
            .database()
            .execute(Select(By::<Vec<Trailer>, _>::new(())))
            .await
            .unwrap();
        assert_eq!(trailers.len(), 1);
    }

    #[tokio::test]
    async fn rejects_missing_driver() {
        let svc = fixture::service();

        let err = svc
            .execute(CreateTrailer {
                driver: Some(driver::Id::new()),
                ..fixture::trailer("Krone", "AA0001AA")
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.into_inner(),
            ExecutionError::DriverNotExists(_),
        ));
    }
}
