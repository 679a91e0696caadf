//! [`Command`] for updating an existing [`Trailer`].

use common::operations::{By, Commit, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{driver, trailer, Driver, Trailer},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Trailer`].
///
/// Replaces the whole record.
#[derive(Clone, Debug)]
pub struct UpdateTrailer {
    /// ID of the [`Trailer`] to update.
    pub id: trailer::Id,

    /// New [`trailer::Brand`] of the [`Trailer`].
    pub brand: trailer::Brand,

    /// New [`trailer::Company`] of the [`Trailer`].
    pub company: trailer::Company,

    /// New [`trailer::LicensePlate`] of the [`Trailer`].
    pub license_plate: trailer::LicensePlate,

    /// New [`trailer::LoadCapacity`] of the [`Trailer`].
    pub load_capacity: trailer::LoadCapacity,

    /// New [`trailer::FuelConsumption`] of the [`Trailer`].
    pub fuel_consumption: trailer::FuelConsumption,

    /// New [`trailer::Length`] of the [`Trailer`].
    pub length: trailer::Length,

    /// New [`trailer::CostPerKm`] of the [`Trailer`].
    pub cost_per_km: trailer::CostPerKm,

    /// ID of the new primary [`Driver`] of the [`Trailer`], if any.
    pub driver: Option<driver::Id>,
}

impl<Db> Command<UpdateTrailer> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Trailer>, trailer::Id>>,
            Ok = Option<Trailer>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Trailer>, trailer::LicensePlate>>,
            Ok = Option<Trailer>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Driver>, driver::Id>>,
            Ok = Option<Driver>,
            Err = Traced<database::Error>,
        > + Database<Update<Trailer>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Trailer;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateTrailer) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateTrailer {
            id,
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

        let existing = tx
            .execute(Select(By::<Option<Trailer>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TrailerNotExists(id))
            .map_err(tracerr::wrap!())?;

        if let Some(driver_id) = driver {
            _ = tx
                .execute(Select(By::<Option<Driver>, _>::new(driver_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::DriverNotExists(driver_id))
                .map_err(tracerr::wrap!())?;
        }

        if license_plate != existing.license_plate {
            let occupied = tx
                .execute(Select(By::<Option<Trailer>, _>::new(
                    license_plate.clone(),
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .is_some_and(|t| t.id != id);
            if occupied {
                return Err(tracerr::new!(E::LicensePlateOccupied(
                    license_plate
                )));
            }
        }

        let trailer = Trailer {
            id,
            brand,
            company,
            license_plate,
            load_capacity,
            fuel_consumption,
            length,
            cost_per_km,
            driver,
        };
        if trailer == existing {
            return Ok(trailer);
        }

        match tx.execute(Update(trailer.clone())).await {
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

/// Error of [`UpdateTrailer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Trailer`] doesn't exist.
    #[display("`Trailer(id: {_0})` does not exist")]
    #[from(ignore)]
    TrailerNotExists(#[error(not(source))] trailer::Id),

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
    use crate::{command::UpdateTrailer, domain::Trailer, fixture, Command};

    use super::ExecutionError;

    fn update(trailer: &Trailer) -> UpdateTrailer {
        UpdateTrailer {
            id: trailer.id,
            brand: trailer.brand.clone(),
            company: trailer.company.clone(),
            license_plate: trailer.license_plate.clone(),
            load_capacity: trailer.load_capacity,
            fuel_consumption: trailer.fuel_consumption,
            length: trailer.length,
            cost_per_km: trailer.cost_per_km,
            driver: trailer.driver,
        }
    }

    #[tokio::test]
    async fn keeps_own_license_plate() {
        let svc = fixture::service();
        let trailer = svc
            .execute(fixture::trailer("Krone", "AA0001AA"))
            .await
            .unwrap();

        let updated = svc
            .execute(UpdateTrailer {
                cost_per_km: "70".parse().unwrap(),
                ..update(&trailer)
            })
            .await
            .unwrap();

        assert_eq!(updated.license_plate, trailer.license_plate);
        assert_eq!(updated.cost_per_km.to_string(), "70.00");
    }

    #[tokio::test]
    async fn rejects_occupied_license_plate() {
        let svc = fixture::service();
        let first = svc
            .execute(fixture::trailer("Krone", "AA0001AA"))
            .await
            .unwrap();
        let second = svc
            .execute(fixture::trailer("Schmitz", "AA0002AA"))
            .await
            .unwrap();

        let err = svc
            .execute(UpdateTrailer {
                license_plate: first.license_plate.clone(),
                ..update(&second)
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.into_inner(),
            ExecutionError::LicensePlateOccupied(_),
        ));
    }
}
