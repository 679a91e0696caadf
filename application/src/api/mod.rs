//! GraphQL API definitions.

pub mod driver;
mod mutation;
pub mod order;
mod query;
pub mod scalar;
pub mod statistics;
pub mod trailer;

use juniper::EmptySubscription;

use crate::Context;

pub use self::{
    driver::Driver, mutation::Mutation, order::Order, query::Query,
    statistics::Statistics, trailer::Trailer,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

#[cfg(test)]
mod spec {
    use juniper::{EmptySubscription, Variables};
    use service::infra::Postgres;

    use super::{Mutation, Query, Schema};
    use crate::{config, Context, Service};

    /// Executes the provided GraphQL `document`, returning the error codes
    /// and the status code of the response.
    ///
    /// Pool connections are lazy, so documents failing before any database
    /// access don't need a running Postgres.
    async fn execute(document: &str) -> (Vec<String>, http::StatusCode) {
        let schema = Schema::new(Query, Mutation, EmptySubscription::new());
        let db = Postgres::new(&config::Postgres::default().into()).unwrap();
        let ctx = Context::new(Service::new(db));

        let (_, errors) =
            juniper::execute(document, None, &schema, &Variables::new(), &ctx)
                .await
                .unwrap();
        let codes = errors
            .iter()
            .filter_map(|e| {
                e.error()
                    .extensions()
                    .as_object_value()?
                    .get_field_value("code")?
                    .as_scalar_value::<String>()
                    .cloned()
            })
            .collect();
        (codes, ctx.error_status_code())
    }

    #[tokio::test]
    async fn requires_deletion_confirmation() {
        for document in [
            r#"mutation {
                deleteOrder(id: "9b2f1c9e-5d1a-4f5e-8f0e-2a1d4c3b2a10") { id }
            }"#,
            r#"mutation {
                deleteOrder(
                    id: "9b2f1c9e-5d1a-4f5e-8f0e-2a1d4c3b2a10",
                    confirm: false,
                ) { id }
            }"#,
        ] {
            let (codes, status) = execute(document).await;

            assert_eq!(codes, ["DELETION_NOT_CONFIRMED"]);
            assert_eq!(status, http::StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn rejects_negative_experience() {
        let (codes, status) = execute(
            r#"mutation {
                createDriver(input: {
                    fullName: "Ivan Petrov",
                    passportNumber: "AB 123456",
                    experience: -1,
                    class: FIRST,
                }) { id }
            }"#,
        )
        .await;

        assert_eq!(codes, ["INVALID_EXPERIENCE"]);
        assert_eq!(status, http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_negative_items_count() {
        let (codes, status) = execute(
            r#"mutation {
                createOrder(input: {
                    name: "Bricks",
                    weight: "12.5",
                    itemsCount: -3,
                    departurePoint: "Kyiv",
                    destinationPoint: "Lviv",
                    distance: 540,
                }) { id }
            }"#,
        )
        .await;

        assert_eq!(codes, ["INVALID_ITEMS_COUNT"]);
        assert_eq!(status, http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_non_positive_pages() {
        let (codes, status) =
            execute("{ orders(page: 0) { pageInfo { number } } }").await;

        assert_eq!(codes, ["INVALID_PAGE"]);
        assert_eq!(status, http::StatusCode::BAD_REQUEST);
    }
}
