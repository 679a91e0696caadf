//! [`Command`] for deleting a [`Trailer`].

use common::operations::{
    By, Commit, Delete, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Order;
use crate::{
    domain::{trailer, Trailer},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for deleting a [`Trailer`].
///
/// [`Order`]s referencing the deleted [`Trailer`] are kept unassigned.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteTrailer {
    /// ID of the [`Trailer`] to delete.
    pub id: trailer::Id,
}

impl<Db> Command<DeleteTrailer> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Trailer>, trailer::Id>>,
            Ok = Option<Trailer>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::trailer::References, trailer::Id>>,
            Ok = read::trailer::References,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Trailer, trailer::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Trailer;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteTrailer) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteTrailer { id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let trailer = tx
            .execute(Select(By::<Option<Trailer>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TrailerNotExists(id))
            .map_err(tracerr::wrap!())?;

        let orders = i64::from(
            tx.execute(Select(By::<read::trailer::References, _>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?,
        );

        tx.execute(Delete(By::<Trailer, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if orders > 0 {
            log::info!(
                "`Trailer(id: {id})` deleted, detached from {orders} order(s)",
            );
        }

        Ok(trailer)
    }
}

/// Error of [`DeleteTrailer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Trailer`] doesn't exist.
    #[display("`Trailer(id: {_0})` does not exist")]
    #[from(ignore)]
    TrailerNotExists(#[error(not(source))] trailer::Id),
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Select},
        Money,
    };

    use crate::{
        command::{CreateOrder, DeleteTrailer},
        domain::{Order, Trailer},
        fixture,
        infra::Database,
    };

    #[tokio::test]
    async fn detaches_orders() {
        let svc = fixture::service();
        let trailer = svc
            .execute(fixture::trailer("Krone", "AA0001AA"))
            .await
            .unwrap();
        let order = svc
            .execute(CreateOrder {
                trailer: Some(trailer.id),
                ..fixture::order("Bricks", "120")
            })
            .await
            .unwrap();

        let deleted =
            svc.execute(DeleteTrailer { id: trailer.id }).await.unwrap();
        assert_eq!(deleted, trailer);

        let db = svc.database();
        let trailer = db
            .execute(Select(By::<Option<Trailer>, _>::new(trailer.id)))
            .await
            .unwrap();
        assert_eq!(trailer, None);

        let order = db
            .execute(Select(By::<Option<Order>, _>::new(order.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.trailer, None);
        assert_eq!(order.cost(None), Money::ZERO);
    }
}
