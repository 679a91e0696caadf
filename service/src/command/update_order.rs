//! [`Command`] for updating an existing [`Order`].

use common::operations::{By, Commit, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{driver, order, trailer, Driver, Order, Trailer},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Order`].
///
/// Replaces the whole record, except its [`order::CreationDateTime`], which
/// is kept as it is.
#[derive(Clone, Debug)]
pub struct UpdateOrder {
    /// ID of the [`Order`] to update.
    pub id: order::Id,

    /// New [`order::Name`] of the [`Order`].
    pub name: order::Name,

    /// New [`order::Weight`] of the [`Order`].
    pub weight: order::Weight,

    /// New [`order::ItemsCount`] of the [`Order`].
    pub items_count: order::ItemsCount,

    /// New departure [`order::Point`] of the [`Order`].
    pub departure_point: order::Point,

    /// New destination [`order::Point`] of the [`Order`].
    pub destination_point: order::Point,

    /// New [`order::Distance`] of the [`Order`].
    pub distance: order::Distance,

    /// ID of the [`Trailer`] to assign, if any.
    pub trailer: Option<trailer::Id>,

    /// ID of the [`Driver`] to assign, if any.
    pub driver: Option<driver::Id>,

    /// Indicator whether the [`Order`] is completed.
    pub completed: bool,
}

impl<Db> Command<UpdateOrder> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Order>, order::Id>>,
            Ok = Option<Order>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Trailer>, trailer::Id>>,
            Ok = Option<Trailer>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Driver>, driver::Id>>,
            Ok = Option<Driver>,
            Err = Traced<database::Error>,
        > + Database<Update<Order>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateOrder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateOrder {
            id,
            name,
            weight,
            items_count,
            departure_point,
            destination_point,
            distance,
            trailer,
            driver,
            completed,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let existing = tx
            .execute(Select(By::<Option<Order>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OrderNotExists(id))
            .map_err(tracerr::wrap!())?;

        if let Some(trailer_id) = trailer {
            _ = tx
                .execute(Select(By::<Option<Trailer>, _>::new(trailer_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::TrailerNotExists(trailer_id))
                .map_err(tracerr::wrap!())?;
        }
        if let Some(driver_id) = driver {
            _ = tx
                .execute(Select(By::<Option<Driver>, _>::new(driver_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::DriverNotExists(driver_id))
                .map_err(tracerr::wrap!())?;
        }

        let order = Order {
            id,
            name,
            weight,
            items_count,
            departure_point,
            destination_point,
            distance,
            trailer,
            driver,
            created_at: existing.created_at,
            completed,
        };
        if order == existing {
            return Ok(order);
        }

        tx.execute(Update(order.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(order)
    }
}

/// Error of [`UpdateOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Order`] doesn't exist.
    #[display("`Order(id: {_0})` does not exist")]
    #[from(ignore)]
    OrderNotExists(#[error(not(source))] order::Id),

    /// Assigned [`Trailer`] doesn't exist.
    #[display("`Trailer(id: {_0})` does not exist")]
    #[from(ignore)]
    TrailerNotExists(#[error(not(source))] trailer::Id),

    /// Assigned [`Driver`] doesn't exist.
    #[display("`Driver(id: {_0})` does not exist")]
    #[from(ignore)]
    DriverNotExists(#[error(not(source))] driver::Id),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};

    use crate::{
        command::UpdateOrder,
        domain::{order, Order},
        fixture,
        infra::Database,
    };

    use super::ExecutionError;

    fn update(order: &Order) -> UpdateOrder {
        UpdateOrder {
            id: order.id,
            name: "Sand".parse().unwrap(),
            weight: "7.25".parse().unwrap(),
            items_count: "1".parse().unwrap(),
            departure_point: order.destination_point.clone(),
            destination_point: order.departure_point.clone(),
            distance: "700".parse().unwrap(),
            trailer: None,
            driver: None,
            completed: true,
        }
    }

    #[tokio::test]
    async fn keeps_creation_datetime() {
        let svc = fixture::service();
        let created =
            svc.execute(fixture::order("Bricks", "120")).await.unwrap();

        let updated = svc.execute(update(&created)).await.unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name.to_string(), "Sand");
        assert_eq!(updated.distance.to_string(), "700.00");
        assert!(updated.completed);

        let stored = svc
            .database()
            .execute(Select(By::<Option<Order>, _>::new(created.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn fails_on_missing_order() {
        let svc = fixture::service();
        let created =
            svc.execute(fixture::order("Bricks", "120")).await.unwrap();

        let err = svc
            .execute(UpdateOrder {
                id: order::Id::new(),
                ..update(&created)
            })
            .await
            .unwrap_err();

        assert!(matches!(err.into_inner(), ExecutionError::OrderNotExists(_)));
    }
}
