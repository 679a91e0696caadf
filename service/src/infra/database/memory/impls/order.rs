//! [`Order`]-related [`Database`] implementations.

use std::cmp::Ordering;

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Money,
};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{order, Order},
    infra::{database, database::memory::Change, Database, Memory},
    read::{self, order::list::Sort},
};

impl Database<Select<By<Option<Order>, order::Id>>> for Memory {
    type Ok = Option<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Order>, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.read().await.orders.get(by.inner()).cloned())
    }
}

impl Database<Select<By<Vec<Order>, read::order::list::Selector>>> for Memory {
    type Ok = Vec<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Order>, read::order::list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::order::list::Selector { arguments, order } = by.into_inner();

        let mut orders =
            self.read().await.orders.values().cloned().collect::<Vec<_>>();
        orders.sort_by(|a, b| compare(order, a, b));

        Ok(orders
            .into_iter()
            .skip(arguments.offset())
            .take(arguments.limit())
            .collect())
    }
}

/// Compares the provided [`Order`]s according to the provided [`Sort`].
fn compare(sort: Sort, a: &Order, b: &Order) -> Ordering {
    match sort {
        Sort::Distance => a.distance.cmp(&b.distance),
        Sort::Weight => a.weight.cmp(&b.weight),
        Sort::Newest => b.created_at.cmp(&a.created_at),
    }
    .then_with(|| a.id.cmp(&b.id))
}

impl Database<Select<By<read::order::list::TotalCount, ()>>> for Memory {
    type Ok = read::order::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<read::order::list::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let count = self.read().await.orders.len();
        Ok(i64::try_from(count).unwrap_or(i64::MAX).into())
    }
}

impl Database<Insert<Order>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(order): Insert<Order>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(order)).await.map_err(tracerr::wrap!())
    }
}

impl Database<Update<Order>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(order): Update<Order>,
    ) -> Result<Self::Ok, Self::Err> {
        self.apply(Change::PutOrder(order))
            .await
            .map_err(|e| tracerr::new!(database::Error::from(e)))
    }
}

impl Database<Delete<By<Order, order::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Order, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.apply(Change::RemoveOrder(by.into_inner()))
            .await
            .map_err(|e| tracerr::new!(database::Error::from(e)))
    }
}

impl Database<Select<By<Vec<Order>, read::order::Solo>>> for Memory {
    type Ok = Vec<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Order>, read::order::Solo>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut orders = self
            .read()
            .await
            .orders
            .values()
            .filter(|o| o.is_solo())
            .cloned()
            .collect::<Vec<_>>();
        orders.sort_by(|a, b| compare(Sort::Newest, a, b));
        Ok(orders)
    }
}

impl Database<Select<By<Vec<read::order::Route>, ()>>> for Memory {
    type Ok = Vec<read::order::Route>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<read::order::Route>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let tables = self.read().await;
        Ok(tables
            .orders
            .values()
            .map(|o| read::order::Route {
                distance: o.distance,
                cost_per_km: o
                    .trailer
                    .and_then(|id| tables.trailers.get(&id))
                    .map(|t| t.cost_per_km),
            })
            .collect())
    }
}

impl Database<Select<By<read::order::LegacyProfit, ()>>> for Memory {
    type Ok = read::order::LegacyProfit;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<read::order::LegacyProfit, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let tables = self.read().await;

        let rates = tables
            .orders
            .values()
            .filter_map(|o| tables.trailers.get(&o.trailer?))
            .map(|t| t.cost_per_km.decimal())
            .collect::<Vec<_>>();
        if rates.is_empty() {
            return Ok(Money::ZERO.into());
        }

        let distances = tables
            .orders
            .values()
            .map(|o| o.distance.decimal())
            .try_fold(Decimal::ZERO, Decimal::checked_add);
        let profit = rates
            .into_iter()
            .try_fold(Decimal::ZERO, Decimal::checked_add)
            .zip(distances)
            .and_then(|(rates, distances)| distances.checked_mul(rates))
            .map_or(Money::ZERO, Money::quantize);
        Ok(profit.into())
    }
}
