//! [`Trailer`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{trailer, Trailer},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Builds a [`Trailer`] from the provided [`Row`].
fn from_row(row: &Row) -> Trailer {
    Trailer {
        id: row.get("id"),
        brand: row.get("brand"),
        company: row.get("company"),
        license_plate: row.get("license_plate"),
        load_capacity: row.get("load_capacity"),
        fuel_consumption: row.get("fuel_consumption"),
        length: row.get("length"),
        cost_per_km: row.get("cost_per_km"),
        driver: row.get("driver_id"),
    }
}

impl<C> Database<Select<By<Option<Trailer>, trailer::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Trailer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Trailer>, trailer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: trailer::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, brand, company, license_plate, \
                   load_capacity, fuel_consumption, length, cost_per_km, \
                   driver_id \
            FROM trailers \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Option<Trailer>, trailer::LicensePlate>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Trailer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Trailer>, trailer::LicensePlate>>,
    ) -> Result<Self::Ok, Self::Err> {
        let plate = by.into_inner();

        const SQL: &str = "\
            SELECT id, brand, company, license_plate, \
                   load_capacity, fuel_consumption, length, cost_per_km, \
                   driver_id \
            FROM trailers \
            WHERE license_plate = $1::VARCHAR";
        Ok(self
            .query_opt(SQL, &[&plate])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Trailer>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Trailer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Trailer>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, brand, company, license_plate, \
                   load_capacity, fuel_consumption, length, cost_per_km, \
                   driver_id \
            FROM trailers \
            ORDER BY brand, id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Trailer>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Trailer>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(trailer): Insert<Trailer>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(trailer)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Trailer>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(trailer): Update<Trailer>,
    ) -> Result<Self::Ok, Self::Err> {
        let Trailer {
            id,
            brand,
            company,
            license_plate,
            load_capacity,
            fuel_consumption,
            length,
            cost_per_km,
            driver,
        } = trailer;

        const SQL: &str = "\
            INSERT INTO trailers (\
                id, brand, company, license_plate, \
                load_capacity, fuel_consumption, length, cost_per_km, \
                driver_id \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::NUMERIC, $6::NUMERIC, $7::NUMERIC, $8::NUMERIC, \
                $9::UUID \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET brand = EXCLUDED.brand, \
                company = EXCLUDED.company, \
                license_plate = EXCLUDED.license_plate, \
                load_capacity = EXCLUDED.load_capacity, \
                fuel_consumption = EXCLUDED.fuel_consumption, \
                length = EXCLUDED.length, \
                cost_per_km = EXCLUDED.cost_per_km, \
                driver_id = EXCLUDED.driver_id";
        self.exec(
            SQL,
            &[
                &id,
                &brand,
                &company,
                &license_plate,
                &load_capacity,
                &fuel_consumption,
                &length,
                &cost_per_km,
                &driver,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Trailer, trailer::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Trailer, trailer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: trailer::Id = by.into_inner();

        // `orders.trailer_id` is detached by `ON DELETE SET NULL`.
        const SQL: &str = "\
            DELETE FROM trailers \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<read::trailer::References, trailer::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::trailer::References;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::trailer::References, trailer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: trailer::Id = by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*) \
            FROM orders \
            WHERE trailer_id = $1::UUID";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i64>(0).into())
    }
}

impl<C> Database<Select<By<Option<read::trailer::Top>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<read::trailer::Top>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Option<read::trailer::Top>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT t.id, t.brand, t.company, t.license_plate, \
                   t.load_capacity, t.fuel_consumption, t.length, \
                   t.cost_per_km, t.driver_id, \
                   COUNT(o.id) AS orders_count \
            FROM trailers AS t \
            LEFT JOIN orders AS o ON o.trailer_id = t.id \
            GROUP BY t.id \
            ORDER BY orders_count DESC, t.brand, t.id \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| read::trailer::Top {
                trailer: from_row(&row),
                orders_count: row.get::<_, i64>("orders_count").into(),
            }))
    }
}
