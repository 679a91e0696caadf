//! [`Command`] for deleting a [`Driver`].

use common::operations::{
    By, Commit, Delete, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::{Order, Trailer};
use crate::{
    domain::{driver, Driver},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for deleting a [`Driver`].
///
/// Other [`Driver`]s, [`Trailer`]s and [`Order`]s referencing the deleted
/// [`Driver`] are kept, with the reference being detached.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteDriver {
    /// ID of the [`Driver`] to delete.
    pub id: driver::Id,
}

impl<Db> Command<DeleteDriver> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Driver>, driver::Id>>,
            Ok = Option<Driver>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::driver::References, driver::Id>>,
            Ok = read::driver::References,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Driver, driver::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Driver;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteDriver) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteDriver { id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let driver = tx
            .execute(Select(By::<Option<Driver>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::DriverNotExists(id))
            .map_err(tracerr::wrap!())?;

        let refs = tx
            .execute(Select(By::<read::driver::References, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Delete(By::<Driver, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if !refs.is_empty() {
            log::info!(
                "`Driver(id: {id})` deleted, detached from {} partner(s), \
                 {} trailer(s) and {} order(s)",
                refs.partners,
                refs.trailers,
                refs.orders,
            );
        }

        Ok(driver)
    }
}

/// Error of [`DeleteDriver`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Driver`] doesn't exist.
    #[display("`Driver(id: {_0})` does not exist")]
    #[from(ignore)]
    DriverNotExists(#[error(not(source))] driver::Id),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};

    use crate::{
        command::{CreateDriver, CreateOrder, CreateTrailer, DeleteDriver},
        domain::{Driver, Order, Trailer},
        fixture,
        infra::Database,
    };

    use super::ExecutionError;

    #[tokio::test]
    async fn detaches_references() {
        let svc = fixture::service();
        let driver = svc.execute(fixture::driver("Ivan Petrov")).await.unwrap();
        let partner = svc
            .execute(CreateDriver {
                partner: Some(driver.id),
                ..fixture::driver("Petro Ivanov")
            })
            .await
            .unwrap();
        let trailer = svc
            .execute(CreateTrailer {
                driver: Some(driver.id),
                ..fixture::trailer("Krone", "AA0001AA")
            })
            .await
            .unwrap();
        let order = svc
            .execute(CreateOrder {
                driver: Some(driver.id),
                ..fixture::order("Bricks", "700")
            })
            .await
            .unwrap();

        _ = svc.execute(DeleteDriver { id: driver.id }).await.unwrap();

        let db = svc.database();
        let deleted = db
            .execute(Select(By::<Option<Driver>, _>::new(driver.id)))
            .await
            .unwrap();
        assert_eq!(deleted, None);

        let partner = db
            .execute(Select(By::<Option<Driver>, _>::new(partner.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(partner.partner, None);

        let trailer = db
            .execute(Select(By::<Option<Trailer>, _>::new(trailer.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(trailer.driver, None);

        let order = db
            .execute(Select(By::<Option<Order>, _>::new(order.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.driver, None);
        assert!(!order.has_partner(None));
    }

    #[tokio::test]
    async fn fails_on_missing_driver() {
        let svc = fixture::service();
        let driver = svc.execute(fixture::driver("Ivan Petrov")).await.unwrap();
        _ = svc.execute(DeleteDriver { id: driver.id }).await.unwrap();

        let err = svc.execute(DeleteDriver { id: driver.id }).await.unwrap_err();

        assert!(matches!(
            err.into_inner(),
            ExecutionError::DriverNotExists(_),
        ));
    }
}
