//! [`Order`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Money,
};
use rust_decimal::Decimal;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{order, Order},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::{self, order::list::Sort},
};

/// Builds an [`Order`] from the provided [`Row`].
fn from_row(row: &Row) -> Order {
    Order {
        id: row.get("id"),
        name: row.get("name"),
        weight: row.get("weight"),
        items_count: row.get("items_count"),
        departure_point: row.get("departure_point"),
        destination_point: row.get("destination_point"),
        distance: row.get("distance"),
        trailer: row.get("trailer_id"),
        driver: row.get("driver_id"),
        created_at: row.get("created_at"),
        completed: row.get("completed"),
    }
}

impl<C> Database<Select<By<Option<Order>, order::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Order>, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: order::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, weight, items_count, \
                   departure_point, destination_point, distance, \
                   trailer_id, driver_id, created_at, completed \
            FROM orders \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Order>, read::order::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Order>, read::order::list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::order::list::Selector { arguments, order } = by.into_inner();

        let limit = i64::try_from(arguments.limit()).unwrap_or(i64::MAX);
        let offset = i64::try_from(arguments.offset()).unwrap_or(i64::MAX);

        let sql = format!(
            "SELECT id, name, weight, items_count, \
                    departure_point, destination_point, distance, \
                    trailer_id, driver_id, created_at, completed \
             FROM orders \
             ORDER BY {ordering}, id \
             LIMIT $1::INT8 \
             OFFSET $2::INT8",
            ordering = match order {
                Sort::Distance => "distance ASC",
                Sort::Weight => "weight ASC",
                Sort::Newest => "created_at DESC",
            },
        );
        Ok(self
            .query(&sql, &[&limit, &offset])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<read::order::list::TotalCount, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::order::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::order::list::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*) \
            FROM orders";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i64>(0).into())
    }
}

impl<C> Database<Insert<Order>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Order>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(order): Insert<Order>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(order)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Order>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(order): Update<Order>,
    ) -> Result<Self::Ok, Self::Err> {
        let Order {
            id,
            name,
            weight,
            items_count,
            departure_point,
            destination_point,
            distance,
            trailer,
            driver,
            created_at,
            completed,
        } = order;

        // `created_at` is never overwritten once set.
        const SQL: &str = "\
            INSERT INTO orders (\
                id, name, weight, items_count, \
                departure_point, destination_point, distance, \
                trailer_id, driver_id, created_at, completed \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::NUMERIC, $4::INT4, \
                $5::VARCHAR, $6::VARCHAR, $7::NUMERIC, \
                $8::UUID, $9::UUID, $10::TIMESTAMPTZ, $11::BOOLEAN \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                weight = EXCLUDED.weight, \
                items_count = EXCLUDED.items_count, \
                departure_point = EXCLUDED.departure_point, \
                destination_point = EXCLUDED.destination_point, \
                distance = EXCLUDED.distance, \
                trailer_id = EXCLUDED.trailer_id, \
                driver_id = EXCLUDED.driver_id, \
                completed = EXCLUDED.completed";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &weight,
                &items_count,
                &departure_point,
                &destination_point,
                &distance,
                &trailer,
                &driver,
                &created_at,
                &completed,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Order, order::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Order, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: order::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM orders \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Vec<Order>, read::order::Solo>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Order>, read::order::Solo>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, weight, items_count, \
                   departure_point, destination_point, distance, \
                   trailer_id, driver_id, created_at, completed \
            FROM orders \
            WHERE distance <= $1::NUMERIC \
            ORDER BY created_at DESC, id";
        Ok(self
            .query(SQL, &[&order::Distance::SOLO_LIMIT])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<read::order::Route>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::order::Route>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<read::order::Route>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT o.distance, t.cost_per_km \
            FROM orders AS o \
            LEFT JOIN trailers AS t ON t.id = o.trailer_id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::order::Route {
                distance: row.get("distance"),
                cost_per_km: row.get("cost_per_km"),
            })
            .collect())
    }
}

impl<C> Database<Select<By<read::order::LegacyProfit, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::order::LegacyProfit;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<read::order::LegacyProfit, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT SUM(o.distance) * SUM(t.cost_per_km) AS profit \
            FROM orders AS o \
            LEFT JOIN trailers AS t ON t.id = o.trailer_id";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.expect("always exists")
                    .get::<_, Option<Decimal>>("profit")
                    .map_or(Money::ZERO, Money::quantize)
                    .into()
            })
    }
}
