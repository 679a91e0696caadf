//! [`Command`] for updating an existing [`Driver`].

use common::operations::{By, Commit, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{driver, Driver},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Driver`].
///
/// Replaces the whole record.
#[derive(Clone, Debug)]
pub struct UpdateDriver {
    /// ID of the [`Driver`] to update.
    pub id: driver::Id,

    /// New [`driver::FullName`] of the [`Driver`].
    pub full_name: driver::FullName,

    /// New [`driver::PassportNumber`] of the [`Driver`].
    pub passport_number: driver::PassportNumber,

    /// New [`driver::Experience`] of the [`Driver`].
    pub experience: driver::Experience,

    /// New [`driver::Class`] of the [`Driver`].
    pub class: driver::Class,

    /// ID of the new partner [`Driver`], if any.
    pub partner: Option<driver::Id>,
}

impl<Db> Command<UpdateDriver> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Driver>, driver::Id>>,
            Ok = Option<Driver>,
            Err = Traced<database::Error>,
        > + Database<Update<Driver>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Driver;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateDriver) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateDriver {
            id,
            full_name,
            passport_number,
            experience,
            class,
            partner,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let existing = tx
            .execute(Select(By::<Option<Driver>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::DriverNotExists(id))
            .map_err(tracerr::wrap!())?;

        if let Some(partner_id) = partner {
            _ = tx
                .execute(Select(By::<Option<Driver>, _>::new(partner_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::PartnerNotExists(partner_id))
                .map_err(tracerr::wrap!())?;
        }

        let driver = Driver {
            id: existing.id,
            full_name,
            passport_number,
            experience,
            class,
            partner,
        };
        if driver == existing {
            return Ok(driver);
        }

        tx.execute(Update(driver.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(driver)
    }
}

/// Error of [`UpdateDriver`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Driver`] doesn't exist.
    #[display("`Driver(id: {_0})` does not exist")]
    #[from(ignore)]
    DriverNotExists(#[error(not(source))] driver::Id),

    /// Partner [`Driver`] doesn't exist.
    #[display("Partner `Driver(id: {_0})` does not exist")]
    #[from(ignore)]
    PartnerNotExists(#[error(not(source))] driver::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::UpdateDriver,
        domain::{driver, Driver},
        fixture, Command,
    };

    use super::ExecutionError;

    fn update(driver: &Driver) -> UpdateDriver {
        UpdateDriver {
            id: driver.id,
            full_name: driver.full_name.clone(),
            passport_number: driver.passport_number.clone(),
            experience: driver.experience,
            class: driver.class,
            partner: driver.partner,
        }
    }

    #[tokio::test]
    async fn assigns_partner() {
        let svc = fixture::service();
        let driver = svc.execute(fixture::driver("Ivan Petrov")).await.unwrap();
        let partner =
            svc.execute(fixture::driver("Petro Ivanov")).await.unwrap();

        let updated = svc
            .execute(UpdateDriver {
                partner: Some(partner.id),
                class: driver::Class::First,
                ..update(&driver)
            })
            .await
            .unwrap();

        assert_eq!(updated.partner, Some(partner.id));
        assert_eq!(updated.class, driver::Class::First);
    }

    #[tokio::test]
    async fn rejects_missing_partner() {
        let svc = fixture::service();
        let driver = svc.execute(fixture::driver("Ivan Petrov")).await.unwrap();

        let err = svc
            .execute(UpdateDriver {
                partner: Some(driver::Id::new()),
                ..update(&driver)
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.into_inner(),
            ExecutionError::PartnerNotExists(_),
        ));
    }
}
