//! [`Statistics`] definition.

use common::{
    operations::{By, Select},
    Money,
};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Driver, Trailer};
use crate::{
    domain::{order, Order},
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] to calculate aggregated statistics over all [`Order`]s.
///
/// Everything is calculated fresh on each execution.
#[derive(Clone, Copy, Debug, Default)]
pub struct Statistics;

/// Output of the [`Statistics`] [`Query`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Output {
    /// [`Trailer`] assigned to the most [`Order`]s, if any [`Trailer`]
    /// exists.
    pub top_trailer: Option<read::trailer::Top>,

    /// [`Driver`] assigned to the most [`Order`]s, if any [`Driver`] exists.
    pub top_driver: Option<read::driver::Top>,

    /// [`Order`]s not requiring a partner [`Driver`], newest first.
    pub solo_orders: Vec<Order>,

    /// Sum of all the [`Order`] costs.
    pub total_profit: Money,

    /// Profit as it was reported before.
    pub legacy_profit: read::order::LegacyProfit,
}

impl<Db> Query<Statistics> for Service<Db>
where
    Db: Database<
            Select<By<Option<read::trailer::Top>, ()>>,
            Ok = Option<read::trailer::Top>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<read::driver::Top>, ()>>,
            Ok = Option<read::driver::Top>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Order>, read::order::Solo>>,
            Ok = Vec<Order>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<read::order::Route>, ()>>,
            Ok = Vec<read::order::Route>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::order::LegacyProfit, ()>>,
            Ok = read::order::LegacyProfit,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Statistics) -> Result<Self::Ok, Self::Err> {
        let db = self.database();

        let (top_trailer, top_driver, solo_orders, routes, legacy_profit) =
            futures::try_join!(
                db.execute(Select(
                    By::<Option<read::trailer::Top>, _>::new(())
                )),
                db.execute(Select(By::<Option<read::driver::Top>, _>::new(()))),
                db.execute(Select(By::<Vec<Order>, _>::new(
                    read::order::Solo
                ))),
                db.execute(Select(By::<Vec<read::order::Route>, _>::new(()))),
                db.execute(Select(By::<read::order::LegacyProfit, _>::new(()))),
            )
            .map_err(tracerr::wrap!())?;

        let total_profit = routes
            .into_iter()
            .map(|r| order::calculate_cost(r.distance, r.cost_per_km))
            .fold(Money::ZERO, |total, cost| {
                total.checked_add(cost).unwrap_or(total)
            });

        Ok(Output {
            top_trailer,
            top_driver,
            solo_orders,
            total_profit,
            legacy_profit,
        })
    }
}

#[cfg(test)]
mod spec {
    use common::{operations::Insert, DateTime, Money};

    use crate::{
        command::{CreateOrder, CreateTrailer},
        domain::{order, Order},
        fixture,
        infra::Memory,
        Query, Service,
    };

    use super::Statistics;

    #[tokio::test]
    async fn empty_statistics() {
        let svc = fixture::service();

        let stats = svc.execute(Statistics).await.unwrap();

        assert_eq!(stats.top_trailer, None);
        assert_eq!(stats.top_driver, None);
        assert!(stats.solo_orders.is_empty());
        assert_eq!(stats.total_profit, Money::ZERO);
        assert_eq!(Money::from(stats.legacy_profit), Money::ZERO);
    }

    #[tokio::test]
    async fn aggregates_orders() {
        let svc = fixture::service();
        let krone = svc
            .execute(fixture::trailer("Krone", "AA0001AA"))
            .await
            .unwrap();
        let schmitz = svc
            .execute(CreateTrailer {
                cost_per_km: Some("10".parse().unwrap()),
                ..fixture::trailer("Schmitz", "AA0002AA")
            })
            .await
            .unwrap();
        let ivan = svc.execute(fixture::driver("Ivan Petrov")).await.unwrap();
        let petro = svc.execute(fixture::driver("Petro Ivanov")).await.unwrap();

        let short = svc
            .execute(CreateOrder {
                trailer: Some(krone.id),
                driver: Some(ivan.id),
                ..fixture::order("Bricks", "120")
            })
            .await
            .unwrap();
        let long = svc
            .execute(CreateOrder {
                trailer: Some(schmitz.id),
                driver: Some(ivan.id),
                ..fixture::order("Sand", "600")
            })
            .await
            .unwrap();
        let unassigned = svc
            .execute(CreateOrder {
                driver: Some(petro.id),
                ..fixture::order("Wood", "500")
            })
            .await
            .unwrap();

        let stats = svc.execute(Statistics).await.unwrap();

        let top_trailer = stats.top_trailer.unwrap();
        assert_eq!(top_trailer.trailer.id, krone.id);
        assert_eq!(i64::from(top_trailer.orders_count), 1);

        let top_driver = stats.top_driver.unwrap();
        assert_eq!(top_driver.driver.id, ivan.id);
        assert_eq!(i64::from(top_driver.orders_count), 2);

        let mut solo =
            stats.solo_orders.iter().map(|o| o.id).collect::<Vec<_>>();
        solo.sort();
        let mut expected = vec![short.id, unassigned.id];
        expected.sort();
        assert_eq!(solo, expected);
        assert!(!stats.solo_orders.iter().any(|o| o.id == long.id));

        assert_eq!(stats.total_profit.to_string(), "12000.00");
        assert_eq!(Money::from(stats.legacy_profit).to_string(), "73200.00");
    }

    #[tokio::test]
    async fn tops_include_entities_without_orders() {
        let svc = fixture::service();
        let krone = svc
            .execute(fixture::trailer("Krone", "AA0001AA"))
            .await
            .unwrap();
        let ivan = svc.execute(fixture::driver("Ivan Petrov")).await.unwrap();
        _ = svc.execute(fixture::order("Bricks", "120")).await.unwrap();

        let stats = svc.execute(Statistics).await.unwrap();

        let top_trailer = stats.top_trailer.unwrap();
        assert_eq!(top_trailer.trailer.id, krone.id);
        assert_eq!(i64::from(top_trailer.orders_count), 0);

        let top_driver = stats.top_driver.unwrap();
        assert_eq!(top_driver.driver.id, ivan.id);
        assert_eq!(i64::from(top_driver.orders_count), 0);
    }

    #[tokio::test]
    async fn solo_orders_are_newest_first() {
        let db = Memory::new();
        let svc = Service::new(db.clone());

        let placed = |name: &str, at: &str| {
            let o = fixture::order(name, "120");
            Order {
                id: order::Id::new(),
                name: o.name,
                weight: o.weight,
                items_count: o.items_count,
                departure_point: o.departure_point,
                destination_point: o.destination_point,
                distance: o.distance,
                trailer: None,
                driver: None,
                created_at: DateTime::from_rfc3339(at).unwrap().coerce(),
                completed: false,
            }
        };
        for o in [
            placed("March", "2024-03-01T00:00:00Z"),
            placed("June", "2024-06-01T00:00:00Z"),
            placed("January", "2024-01-01T00:00:00Z"),
        ] {
            db.execute(Insert(o)).await.unwrap();
        }

        let stats = svc.execute(Statistics).await.unwrap();

        let names = stats
            .solo_orders
            .iter()
            .map(|o| o.name.to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, ["June", "March", "January"]);
    }

    #[tokio::test]
    async fn top_driver_ties_break_by_name_then_id() {
        let svc = fixture::service();
        let zoran = svc.execute(fixture::driver("Zoran Kovac")).await.unwrap();
        let anna = svc.execute(fixture::driver("Anna Shevchenko")).await.unwrap();
        for (driver, name) in [(zoran.id, "Bricks"), (anna.id, "Sand")] {
            _ = svc
                .execute(CreateOrder {
                    driver: Some(driver),
                    ..fixture::order(name, "120")
                })
                .await
                .unwrap();
        }

        let stats = svc.execute(Statistics).await.unwrap();

        assert_eq!(stats.top_driver.unwrap().driver.id, anna.id);

        let twin = svc.execute(fixture::driver("Anna Shevchenko")).await.unwrap();
        _ = svc
            .execute(CreateOrder {
                driver: Some(twin.id),
                ..fixture::order("Wood", "120")
            })
            .await
            .unwrap();

        let stats = svc.execute(Statistics).await.unwrap();

        assert_eq!(
            stats.top_driver.unwrap().driver.id,
            anna.id.min(twin.id),
        );
    }
}
