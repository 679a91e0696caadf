//! [`Driver`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{driver, Driver},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Builds a [`Driver`] from the provided [`Row`].
fn from_row(row: &Row) -> Driver {
    Driver {
        id: row.get("id"),
        full_name: row.get("full_name"),
        passport_number: row.get("passport_number"),
        experience: row.get("experience"),
        class: row.get("class"),
        partner: row.get("partner_id"),
    }
}

impl<C> Database<Select<By<Option<Driver>, driver::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Driver>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Driver>, driver::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: driver::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, full_name, passport_number, experience, class, \
                   partner_id \
            FROM drivers \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Driver>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Driver>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Driver>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, full_name, passport_number, experience, class, \
                   partner_id \
            FROM drivers \
            ORDER BY full_name, id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Driver>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Driver>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(driver): Insert<Driver>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(driver)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Driver>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(driver): Update<Driver>,
    ) -> Result<Self::Ok, Self::Err> {
        let Driver {
            id,
            full_name,
            passport_number,
            experience,
            class,
            partner,
        } = driver;

        const SQL: &str = "\
            INSERT INTO drivers (\
                id, full_name, passport_number, experience, class, \
                partner_id \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::INT4, $5::INT2, \
                $6::UUID \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET full_name = EXCLUDED.full_name, \
                passport_number = EXCLUDED.passport_number, \
                experience = EXCLUDED.experience, \
                class = EXCLUDED.class, \
                partner_id = EXCLUDED.partner_id";
        self.exec(
            SQL,
            &[
                &id,
                &full_name,
                &passport_number,
                &experience,
                &class,
                &partner,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Driver, driver::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Driver, driver::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: driver::Id = by.into_inner();

        // References are detached by `ON DELETE SET NULL` foreign keys.
        const SQL: &str = "\
            DELETE FROM drivers \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<read::driver::References, driver::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::driver::References;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::driver::References, driver::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: driver::Id = by.into_inner();

        const SQL: &str = "\
            SELECT (SELECT COUNT(*) \
                    FROM drivers \
                    WHERE partner_id = $1::UUID) AS partners, \
                   (SELECT COUNT(*) \
                    FROM trailers \
                    WHERE driver_id = $1::UUID) AS trailers, \
                   (SELECT COUNT(*) \
                    FROM orders \
                    WHERE driver_id = $1::UUID) AS orders";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                let row = row.expect("always exists");
                read::driver::References {
                    partners: row.get("partners"),
                    trailers: row.get("trailers"),
                    orders: row.get("orders"),
                }
            })
    }
}

impl<C> Database<Select<By<Option<read::driver::Top>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<read::driver::Top>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Option<read::driver::Top>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT d.id, d.full_name, d.passport_number, d.experience, \
                   d.class, d.partner_id, \
                   COUNT(o.id) AS orders_count \
            FROM drivers AS d \
            LEFT JOIN orders AS o ON o.driver_id = d.id \
            GROUP BY d.id \
            ORDER BY orders_count DESC, d.full_name, d.id \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| read::driver::Top {
                driver: from_row(&row),
                orders_count: row.get::<_, i64>("orders_count").into(),
            }))
    }
}
