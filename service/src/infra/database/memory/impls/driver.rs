//! [`Driver`]-related [`Database`] implementations.

use std::cmp::Reverse;

use common::operations::{By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{driver, Driver},
    infra::{database, database::memory::Change, Database, Memory},
    read,
};

impl Database<Select<By<Option<Driver>, driver::Id>>> for Memory {
    type Ok = Option<Driver>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Driver>, driver::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.read().await.drivers.get(by.inner()).cloned())
    }
}

impl Database<Select<By<Vec<Driver>, ()>>> for Memory {
    type Ok = Vec<Driver>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Driver>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut drivers =
            self.read().await.drivers.values().cloned().collect::<Vec<_>>();
        drivers.sort_by(|a, b| {
            (&a.full_name, a.id).cmp(&(&b.full_name, b.id))
        });
        Ok(drivers)
    }
}

impl Database<Insert<Driver>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(driver): Insert<Driver>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(driver)).await.map_err(tracerr::wrap!())
    }
}

impl Database<Update<Driver>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(driver): Update<Driver>,
    ) -> Result<Self::Ok, Self::Err> {
        self.apply(Change::PutDriver(driver))
            .await
            .map_err(|e| tracerr::new!(database::Error::from(e)))
    }
}

impl Database<Delete<By<Driver, driver::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Driver, driver::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.apply(Change::RemoveDriver(by.into_inner()))
            .await
            .map_err(|e| tracerr::new!(database::Error::from(e)))
    }
}

impl Database<Select<By<read::driver::References, driver::Id>>> for Memory {
    type Ok = read::driver::References;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::driver::References, driver::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = Some(by.into_inner());
        let tables = self.read().await;

        let count = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
        Ok(read::driver::References {
            partners: count(
                tables.drivers.values().filter(|d| d.partner == id).count(),
            ),
            trailers: count(
                tables.trailers.values().filter(|t| t.driver == id).count(),
            ),
            orders: count(
                tables.orders.values().filter(|o| o.driver == id).count(),
            ),
        })
    }
}

impl Database<Select<By<Option<read::driver::Top>, ()>>> for Memory {
    type Ok = Option<read::driver::Top>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Option<read::driver::Top>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let tables = self.read().await;
        Ok(tables
            .drivers
            .values()
            .map(|d| {
                let count = tables
                    .orders
                    .values()
                    .filter(|o| o.driver == Some(d.id))
                    .count();
                (i64::try_from(count).unwrap_or(i64::MAX), d)
            })
            .min_by(|(a_count, a), (b_count, b)| {
                (Reverse(a_count), &a.full_name, a.id).cmp(&(
                    Reverse(b_count),
                    &b.full_name,
                    b.id,
                ))
            })
            .map(|(count, d)| read::driver::Top {
                driver: d.clone(),
                orders_count: count.into(),
            }))
    }
}
