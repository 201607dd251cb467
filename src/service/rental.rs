//! Rental transaction processor.
//!
//! Each call owns its own pooled connection and transaction; the transaction
//! rolls back on drop, so every early return leaves no partial state. There is
//! no in-process locking: correctness under concurrent requests for the same
//! inventory copy rests on READ COMMITTED isolation plus the partial unique
//! index on open rentals. The loser of a race sees `Conflict`; callers decide
//! whether to retry, the service never does.

use crate::error::AppError;
use crate::model::{Rental, RentalRequest};
use sqlx::PgPool;

pub struct RentalService;

#[derive(sqlx::FromRow)]
struct AvailabilityRow {
    in_catalog: bool,
    rented: bool,
}

impl RentalService {
    /// Create a rental for `request.inventory_id`, failing with `Conflict` if the
    /// copy already has an open rental and `Validation` if any identifier does
    /// not reference an existing record. Returns the created row.
    pub async fn create_rental(
        pool: &PgPool,
        request: &RentalRequest,
    ) -> Result<Rental, AppError> {
        if request.customer_id <= 0 || request.inventory_id <= 0 || request.staff_id <= 0 {
            return Err(AppError::Validation(
                "customer_id, inventory_id and staff_id must be positive integers".into(),
            ));
        }

        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL READ COMMITTED")
            .execute(&mut *tx)
            .await?;

        let availability: AvailabilityRow = sqlx::query_as(
            r#"
            SELECT
                EXISTS(SELECT 1 FROM inventory WHERE inventory_id = $1) AS in_catalog,
                EXISTS(
                    SELECT 1 FROM rental
                    WHERE inventory_id = $1 AND return_date IS NULL
                ) AS rented
            "#,
        )
        .bind(request.inventory_id)
        .fetch_one(&mut *tx)
        .await?;

        if !availability.in_catalog {
            return Err(AppError::Validation(format!(
                "inventory {} does not exist",
                request.inventory_id
            )));
        }
        if availability.rented {
            return Err(AppError::Conflict(format!(
                "inventory {} is already rented",
                request.inventory_id
            )));
        }

        tracing::debug!(
            inventory_id = request.inventory_id,
            customer_id = request.customer_id,
            "inserting rental"
        );
        let rental: Rental = sqlx::query_as(
            r#"
            INSERT INTO rental (inventory_id, customer_id, staff_id)
            VALUES ($1, $2, $3)
            RETURNING rental_id, rental_date, inventory_id, customer_id, staff_id, return_date
            "#,
        )
        .bind(request.inventory_id)
        .bind(request.customer_id)
        .bind(request.staff_id)
        .fetch_one(&mut *tx)
        .await?;

        // A concurrent rental that committed after our availability check
        // surfaces here as a unique violation, classified as Conflict.
        tx.commit().await?;
        Ok(rental)
    }

    /// Fetch one rental by id.
    pub async fn find_rental(pool: &PgPool, rental_id: i32) -> Result<Option<Rental>, AppError> {
        let rental = sqlx::query_as::<_, Rental>(
            r#"
            SELECT rental_id, rental_date, inventory_id, customer_id, staff_id, return_date
            FROM rental
            WHERE rental_id = $1
            "#,
        )
        .bind(rental_id)
        .fetch_optional(pool)
        .await?;
        Ok(rental)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lazy_pool() -> PgPool {
        // Never connected; the validation path must reject before touching it.
        PgPool::connect_lazy("postgres://localhost/unused").unwrap()
    }

    #[tokio::test]
    async fn non_positive_ids_are_rejected_before_any_query() {
        let pool = lazy_pool();
        for request in [
            RentalRequest { customer_id: 0, inventory_id: 42, staff_id: 2 },
            RentalRequest { customer_id: 1, inventory_id: -1, staff_id: 2 },
            RentalRequest { customer_id: 1, inventory_id: 42, staff_id: 0 },
        ] {
            let err = RentalService::create_rental(&pool, &request).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "got {:?}", err);
        }
    }

    mod postgres {
        use super::*;
        use crate::store::ensure_rental_schema;

        async fn test_pool() -> PgPool {
            let url = std::env::var("POSTGRES_TEST").expect("POSTGRES_TEST url");
            let pool = PgPool::connect(&url).await.expect("connect test database");
            ensure_rental_schema(&pool).await.expect("schema");
            pool
        }

        async fn seed(pool: &PgPool) -> (i32, i32, i32) {
            let (customer_id,): (i32,) = sqlx::query_as(
                "INSERT INTO customer (first_name, last_name) VALUES ('Ada', 'Lovelace') RETURNING customer_id",
            )
            .fetch_one(pool)
            .await
            .unwrap();
            let (staff_id,): (i32,) = sqlx::query_as(
                "INSERT INTO staff (first_name, last_name) VALUES ('Mike', 'Hillyer') RETURNING staff_id",
            )
            .fetch_one(pool)
            .await
            .unwrap();
            let (inventory_id,): (i32,) =
                sqlx::query_as("INSERT INTO inventory (film_id) VALUES (1) RETURNING inventory_id")
                    .fetch_one(pool)
                    .await
                    .unwrap();
            (customer_id, inventory_id, staff_id)
        }

        #[test_with::env(POSTGRES_TEST)]
        #[tokio::test]
        async fn create_returns_open_rental_and_marks_item_unavailable() {
            let pool = test_pool().await;
            let (customer_id, inventory_id, staff_id) = seed(&pool).await;
            let request = RentalRequest { customer_id, inventory_id, staff_id };

            let rental = RentalService::create_rental(&pool, &request).await.unwrap();
            assert_eq!(rental.inventory_id, inventory_id);
            assert_eq!(rental.customer_id, customer_id);
            assert!(rental.is_open());

            let err = RentalService::create_rental(&pool, &request).await.unwrap_err();
            assert!(matches!(err, AppError::Conflict(_)), "got {:?}", err);
        }

        #[test_with::env(POSTGRES_TEST)]
        #[tokio::test]
        async fn concurrent_creates_for_same_item_yield_one_winner() {
            let pool = test_pool().await;
            let (customer_id, inventory_id, staff_id) = seed(&pool).await;
            let request = RentalRequest { customer_id, inventory_id, staff_id };

            let (a, b) = tokio::join!(
                RentalService::create_rental(&pool, &request),
                RentalService::create_rental(&pool, &request),
            );
            let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
            assert_eq!(successes, 1, "exactly one rental must win: {:?} / {:?}", a, b);
            for result in [a, b] {
                if let Err(err) = result {
                    assert!(matches!(err, AppError::Conflict(_)), "got {:?}", err);
                }
            }

            let (open,): (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM rental WHERE inventory_id = $1 AND return_date IS NULL",
            )
            .bind(inventory_id)
            .fetch_one(&pool)
            .await
            .unwrap();
            assert_eq!(open, 1);
        }

        #[test_with::env(POSTGRES_TEST)]
        #[tokio::test]
        async fn unknown_customer_fails_validation_and_inserts_nothing() {
            let pool = test_pool().await;
            let (_, inventory_id, staff_id) = seed(&pool).await;
            let request = RentalRequest { customer_id: i32::MAX, inventory_id, staff_id };

            let err = RentalService::create_rental(&pool, &request).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "got {:?}", err);

            let (count,): (i64,) =
                sqlx::query_as("SELECT COUNT(*) FROM rental WHERE inventory_id = $1")
                    .bind(inventory_id)
                    .fetch_one(&pool)
                    .await
                    .unwrap();
            assert_eq!(count, 0);
        }

        #[test_with::env(POSTGRES_TEST)]
        #[tokio::test]
        async fn closing_a_rental_frees_the_item() {
            let pool = test_pool().await;
            let (customer_id, inventory_id, staff_id) = seed(&pool).await;
            let request = RentalRequest { customer_id, inventory_id, staff_id };

            let first = RentalService::create_rental(&pool, &request).await.unwrap();
            // Stand-in for the future return processor.
            sqlx::query("UPDATE rental SET return_date = NOW() WHERE rental_id = $1")
                .bind(first.rental_id)
                .execute(&pool)
                .await
                .unwrap();

            let closed = RentalService::find_rental(&pool, first.rental_id)
                .await
                .unwrap()
                .unwrap();
            assert!(!closed.is_open());

            let second = RentalService::create_rental(&pool, &request).await.unwrap();
            assert_ne!(second.rental_id, first.rental_id);
            assert!(second.is_open());
        }

        #[test_with::env(POSTGRES_TEST)]
        #[tokio::test]
        async fn find_rental_returns_none_for_unknown_id() {
            let pool = test_pool().await;
            let found = RentalService::find_rental(&pool, i32::MAX).await.unwrap();
            assert!(found.is_none());
        }
    }
}
