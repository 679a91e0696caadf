//! [`Trailer`]-related [`Database`] implementations.

use std::cmp::Reverse;

use common::operations::{By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{trailer, Trailer},
    infra::{database, database::memory::Change, Database, Memory},
    read,
};

impl Database<Select<By<Option<Trailer>, trailer::Id>>> for Memory {
    type Ok = Option<Trailer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Trailer>, trailer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.read().await.trailers.get(by.inner()).cloned())
    }
}

impl Database<Select<By<Option<Trailer>, trailer::LicensePlate>>> for Memory {
    type Ok = Option<Trailer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Trailer>, trailer::LicensePlate>>,
    ) -> Result<Self::Ok, Self::Err> {
        let plate = by.into_inner();
        Ok(self
            .read()
            .await
            .trailers
            .values()
            .find(|t| t.license_plate == plate)
            .cloned())
    }
}

impl Database<Select<By<Vec<Trailer>, ()>>> for Memory {
    type Ok = Vec<Trailer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Trailer>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut trailers =
            self.read().await.trailers.values().cloned().collect::<Vec<_>>();
        trailers.sort_by(|a, b| (&a.brand, a.id).cmp(&(&b.brand, b.id)));
        Ok(trailers)
    }
}

impl Database<Insert<Trailer>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(trailer): Insert<Trailer>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(trailer)).await.map_err(tracerr::wrap!())
    }
}

impl Database<Update<Trailer>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(trailer): Update<Trailer>,
    ) -> Result<Self::Ok, Self::Err> {
        self.apply(Change::PutTrailer(trailer))
            .await
            .map_err(|e| tracerr::new!(database::Error::from(e)))
    }
}

impl Database<Delete<By<Trailer, trailer::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Trailer, trailer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.apply(Change::RemoveTrailer(by.into_inner()))
            .await
            .map_err(|e| tracerr::new!(database::Error::from(e)))
    }
}

impl Database<Select<By<read::trailer::References, trailer::Id>>> for Memory {
    type Ok = read::trailer::References;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::trailer::References, trailer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = Some(by.into_inner());
        let count = self
            .read()
            .await
            .orders
            .values()
            .filter(|o| o.trailer == id)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX).into())
    }
}

impl Database<Select<By<Option<read::trailer::Top>, ()>>> for Memory {
    type Ok = Option<read::trailer::Top>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Option<read::trailer::Top>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let tables = self.read().await;
        Ok(tables
            .trailers
            .values()
            .map(|t| {
                let count = tables
                    .orders
                    .values()
                    .filter(|o| o.trailer == Some(t.id))
                    .count();
                (i64::try_from(count).unwrap_or(i64::MAX), t)
            })
            .min_by(|(a_count, a), (b_count, b)| {
                (Reverse(a_count), &a.brand, a.id).cmp(&(
                    Reverse(b_count),
                    &b.brand,
                    b.id,
                ))
            })
            .map(|(count, t)| read::trailer::Top {
                trailer: t.clone(),
                orders_count: count.into(),
            }))
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Commit, Delete, Insert, Select, Transact};

    use crate::{
        domain::{trailer, Trailer},
        infra::{database::LICENSE_PLATE_CONSTRAINT, Database, Memory},
    };

    fn trailer(license_plate: &str) -> Trailer {
        Trailer {
            id: trailer::Id::new(),
            brand: "Krone".parse().unwrap(),
            company: "Cargo Lines".parse().unwrap(),
            license_plate: license_plate.parse().unwrap(),
            load_capacity: "20".parse().unwrap(),
            fuel_consumption: "32.5".parse().unwrap(),
            length: "13.6".parse().unwrap(),
            cost_per_km: trailer::CostPerKm::default(),
            driver: None,
        }
    }

    #[tokio::test]
    async fn license_plate_is_unique() {
        let db = Memory::new();
        db.execute(Insert(trailer("AA0001AA"))).await.unwrap();

        let err = db.execute(Insert(trailer("AA0001AA"))).await.unwrap_err();

        assert!(err
            .into_inner()
            .is_unique_violation(Some(LICENSE_PLATE_CONSTRAINT)));
    }

    #[tokio::test]
    async fn isolates_uncommitted_changes() {
        let db = Memory::new();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Insert(trailer("AA0001AA"))).await.unwrap();
        assert!(db
            .execute(Insert(trailer("AA0001AA")))
            .await
            .is_ok());

        let tx = db.execute(Transact).await.unwrap();
        let err = tx.execute(Insert(trailer("AA0001AA"))).await.unwrap_err();
        assert!(err.into_inner().is_unique_violation(None));
        tx.execute(Commit).await.unwrap();
    }

    #[tokio::test]
    async fn commit_preserves_outside_writes() {
        let db = Memory::new();
        let removed = trailer("AA0001AA");
        let concurrent = trailer("BB0002BB");
        let staged = trailer("CC0003CC");
        db.execute(Insert(removed.clone())).await.unwrap();

        let tx = db.execute(Transact).await.unwrap();
        db.execute(Delete(By::<Trailer, _>::new(removed.id)))
            .await
            .unwrap();
        db.execute(Insert(concurrent.clone())).await.unwrap();
        tx.execute(Insert(staged.clone())).await.unwrap();
        tx.execute(Commit).await.unwrap();

        for (id, exists) in
            [(removed.id, false), (concurrent.id, true), (staged.id, true)]
        {
            let found = db
                .execute(Select(By::<Option<Trailer>, _>::new(id)))
                .await
                .unwrap();
            assert_eq!(found.is_some(), exists, "trailer {id}");
        }
    }

    #[tokio::test]
    async fn commit_rechecks_license_plates() {
        let db = Memory::new();
        let staged = trailer("AA0001AA");

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Insert(staged.clone())).await.unwrap();
        db.execute(Insert(trailer("AA0001AA"))).await.unwrap();

        let err = tx.execute(Commit).await.unwrap_err();
        assert!(err
            .into_inner()
            .is_unique_violation(Some(LICENSE_PLATE_CONSTRAINT)));
        assert!(db
            .execute(Select(By::<Option<Trailer>, _>::new(staged.id)))
            .await
            .unwrap()
            .is_none());
    }
}
