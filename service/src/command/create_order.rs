//! [`Command`] for creating a new [`Order`].

use common::operations::{By, Commit, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{driver, order, trailer, Driver, Order, Trailer},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Order`].
#[derive(Clone, Debug)]
pub struct CreateOrder {
    /// [`order::Name`] of a new [`Order`].
    pub name: order::Name,

    /// [`order::Weight`] of a new [`Order`].
    pub weight: order::Weight,

    /// [`order::ItemsCount`] of a new [`Order`].
    pub items_count: order::ItemsCount,

    /// Departure [`order::Point`] of a new [`Order`].
    pub departure_point: order::Point,

    /// Destination [`order::Point`] of a new [`Order`].
    pub destination_point: order::Point,

    /// [`order::Distance`] of a new [`Order`].
    pub distance: order::Distance,

    /// ID of the [`Trailer`] assigned to a new [`Order`], if any.
    pub trailer: Option<trailer::Id>,

    /// ID of the [`Driver`] assigned to a new [`Order`], if any.
    pub driver: Option<driver::Id>,

    /// Indicator whether a new [`Order`] is completed already.
    pub completed: bool,
}

impl<Db> Command<CreateOrder> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Trailer>, trailer::Id>>,
            Ok = Option<Trailer>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Driver>, driver::Id>>,
            Ok = Option<Driver>,
            Err = Traced<database::Error>,
        > + Database<Insert<Order>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateOrder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateOrder {
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
            id: order::Id::new(),
            name,
            weight,
            items_count,
            departure_point,
            destination_point,
            distance,
            trailer,
            driver,
            created_at: order::CreationDateTime::now(),
            completed,
        };
        tx.execute(Insert(order.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(order)
    }
}

/// Error of [`CreateOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

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
        command::CreateOrder,
        domain::{driver, trailer, Order},
        fixture,
        infra::Database,
        read::order::list::TotalCount,
    };

    use super::ExecutionError;

    #[tokio::test]
    async fn creates_order() {
        let svc = fixture::service();
        let trailer = svc
            .execute(fixture::trailer("Schmitz", "AA1234BB"))
            .await
            .unwrap();

        let order = svc
            .execute(CreateOrder {
                trailer: Some(trailer.id),
                ..fixture::order("Bricks", "120")
            })
            .await
            .unwrap();

        let stored = svc
            .database()
            .execute(Select(By::<Option<Order>, _>::new(order.id)))
            .await
            .unwrap();
        assert_eq!(stored.as_ref(), Some(&order));
        assert!(!order.completed);
        assert_eq!(order.cost(Some(&trailer)).to_string(), "6000.00");
    }

    #[tokio::test]
    async fn writes_nothing_on_missing_references() {
        let svc = fixture::service();

        let err = svc
            .execute(CreateOrder {
                trailer: Some(trailer::Id::new()),
                ..fixture::order("Bricks", "120")
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.into_inner(),
            ExecutionError::TrailerNotExists(_),
        ));

        let err = svc
            .execute(CreateOrder {
                driver: Some(driver::Id::new()),
                ..fixture::order("Bricks", "120")
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.into_inner(),
            ExecutionError::DriverNotExists(_),
        ));

        let count = svc
            .database()
            .execute(Select(By::<TotalCount, _>::new(())))
            .await
            .unwrap();
        assert_eq!(i64::from(count), 0);
    }
}
