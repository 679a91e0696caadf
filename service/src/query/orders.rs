//! [`Query`] collection related to the multiple [`Order`]s.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::Order,
    infra::{database, Database},
    read::order::list,
    Query, Service,
};

/// Queries a [`list::Page`] of [`Order`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct List {
    /// [`list::Sort`] of the [`Order`]s.
    pub sort: list::Sort,

    /// 1-based number of the requested [`list::Page`].
    ///
    /// The first [`list::Page`] if [`None`].
    pub page: Option<i32>,
}

impl List {
    /// Maximum number of [`Order`]s on a single [`list::Page`].
    pub const PER_PAGE: usize = 20;
}

impl<Db> Query<List> for Service<Db>
where
    Db: Database<
            Select<By<list::TotalCount, ()>>,
            Ok = list::TotalCount,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Order>, list::Selector>>,
            Ok = Vec<Order>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = list::Page;
    type Err = Traced<ListError>;

    async fn execute(&self, query: List) -> Result<Self::Ok, Self::Err> {
        use ListError as E;

        let List { sort, page } = query;

        let arguments = list::Arguments::new(page, List::PER_PAGE)
            .ok_or_else(|| E::InvalidPage(page.unwrap_or_default()))
            .map_err(tracerr::wrap!())?;

        let total_count = self
            .database()
            .execute(Select(By::<list::TotalCount, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let total_count =
            usize::try_from(i64::from(total_count)).unwrap_or_default();

        if !arguments.is_within(total_count) {
            return Err(tracerr::new!(E::PageOutOfRange(arguments.number())));
        }

        let orders = self
            .database()
            .execute(Select(By::<Vec<Order>, _>::new(list::Selector {
                arguments,
                order: sort,
            })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(list::Page::new(arguments, orders, total_count))
    }
}

/// Error of [`List`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ListError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Requested page number is not positive.
    #[display("Page number `{_0}` is invalid")]
    #[from(ignore)]
    InvalidPage(#[error(not(source))] i32),

    /// Requested page is beyond the last one.
    #[display("Page `{_0}` is out of range")]
    #[from(ignore)]
    PageOutOfRange(#[error(not(source))] usize),
}

#[cfg(test)]
mod spec {
    use crate::{fixture, read::order::list::Sort, Query};

    use super::{List, ListError};

    #[tokio::test]
    async fn paginates_by_twenty() {
        let svc = fixture::service();
        for i in 1..=45 {
            _ = svc
                .execute(fixture::order(&format!("Order {i}"), &i.to_string()))
                .await
                .unwrap();
        }

        let first = svc.execute(List::default()).await.unwrap();
        assert_eq!(first.items.len(), 20);
        let info = first.page_info();
        assert_eq!(info.number, 1);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.total_count, 45);
        assert!(info.has_next_page);
        assert!(!info.has_previous_page);

        let last = svc
            .execute(List {
                sort: Sort::Distance,
                page: Some(3),
            })
            .await
            .unwrap();
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.items[0].distance.to_string(), "41.00");
        assert!(!last.page_info().has_next_page);
    }

    #[tokio::test]
    async fn sorts_orders() {
        let svc = fixture::service();
        for (name, distance, weight) in
            [("A", "700", "3"), ("B", "120", "9.5"), ("C", "300", "0.5")]
        {
            _ = svc
                .execute(crate::command::CreateOrder {
                    weight: weight.parse().unwrap(),
                    ..fixture::order(name, distance)
                })
                .await
                .unwrap();
        }

        let names = |page: crate::read::order::list::Page| {
            page.items
                .into_iter()
                .map(|o| o.name.to_string())
                .collect::<Vec<_>>()
        };

        let by_distance = svc
            .execute(List {
                sort: Sort::Distance,
                page: None,
            })
            .await
            .unwrap();
        assert_eq!(names(by_distance), ["B", "C", "A"]);

        let by_weight = svc
            .execute(List {
                sort: Sort::Weight,
                page: None,
            })
            .await
            .unwrap();
        assert_eq!(names(by_weight), ["C", "A", "B"]);

        let newest = svc.execute(List::default()).await.unwrap();
        assert!(newest
            .items
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn first_page_always_exists() {
        let svc = fixture::service();

        let page = svc.execute(List::default()).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.page_info().total_pages, 1);
    }

    #[tokio::test]
    async fn rejects_pages_out_of_range() {
        let svc = fixture::service();
        _ = svc.execute(fixture::order("A", "120")).await.unwrap();

        let err = svc
            .execute(List {
                page: Some(2),
                ..List::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err.into_inner(), ListError::PageOutOfRange(2)));

        for page in [0, -1] {
            let err = svc
                .execute(List {
                    page: Some(page),
                    ..List::default()
                })
                .await
                .unwrap_err();
            assert!(matches!(
                err.into_inner(),
                ListError::InvalidPage(p) if p == page,
            ));
        }
    }
}
