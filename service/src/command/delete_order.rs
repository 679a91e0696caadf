//! [`Command`] for deleting an [`Order`].

use common::operations::{
    By, Commit, Delete, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{order, Order},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an [`Order`].
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteOrder {
    /// ID of the [`Order`] to delete.
    pub id: order::Id,
}

impl<Db> Command<DeleteOrder> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Order>, order::Id>>,
            Ok = Option<Order>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Order, order::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteOrder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteOrder { id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let order = tx
            .execute(Select(By::<Option<Order>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OrderNotExists(id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::<Order, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::debug!("`Order(id: {id})` deleted");

        Ok(order)
    }
}

/// Error of [`DeleteOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Order`] doesn't exist.
    #[display("`Order(id: {_0})` does not exist")]
    #[from(ignore)]
    OrderNotExists(#[error(not(source))] order::Id),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};

    use crate::{command::DeleteOrder, domain::Order, fixture, infra::Database};

    use super::ExecutionError;

    #[tokio::test]
    async fn deletes_order() {
        let svc = fixture::service();
        let order = svc.execute(fixture::order("Bricks", "120")).await.unwrap();

        let deleted = svc.execute(DeleteOrder { id: order.id }).await.unwrap();
        assert_eq!(deleted, order);

        let stored = svc
            .database()
            .execute(Select(By::<Option<Order>, _>::new(order.id)))
            .await
            .unwrap();
        assert_eq!(stored, None);

        let err = svc.execute(DeleteOrder { id: order.id }).await.unwrap_err();
        assert!(matches!(err.into_inner(), ExecutionError::OrderNotExists(_)));
    }
}
