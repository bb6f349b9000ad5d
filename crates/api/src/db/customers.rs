//! Database operations for customers.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crm_core::{CustomerId, Email, PhoneNumber};

use super::ordering::{OrderByError, SortKey, order_by_clause, parse_order_by};
use super::{RepositoryError, contains_pattern, prefix_pattern};
use crate::models::{Customer, CustomerFilter, NewCustomer};

/// Sortable customer fields and the SQL expressions they resolve to.
const SORT_FIELDS: &[(&'static str, &'static str)] = &[
    ("id", "id"),
    ("name", "name"),
    ("email", "email"),
    ("created_at", "created_at"),
];

/// Resolve a customer sort spec against the customer whitelist.
///
/// # Errors
///
/// Returns [`OrderByError`] for unknown field names.
pub fn sort_keys(spec: &str) -> Result<Vec<SortKey>, OrderByError> {
    parse_order_by(spec, SORT_FIELDS)
}

/// Internal row type for customer queries.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    email: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl CustomerRow {
    fn into_customer(self) -> Result<Customer, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Customer {
            id: CustomerId::new(self.id),
            name: self.name,
            email,
            phone: self.phone,
            created_at: self.created_at,
        })
    }
}

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new customer in its own transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists
    /// (case-insensitively). Returns `RepositoryError::Database` for other
    /// database errors.
    pub async fn create(&self, input: &NewCustomer) -> Result<Customer, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row: CustomerRow = sqlx::query_as(
            r"
            INSERT INTO customers (name, email, phone, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, email, phone, created_at
            ",
        )
        .bind(&input.name)
        .bind(input.email.as_str())
        .bind(input.phone.as_ref().map(PhoneNumber::as_str))
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("Email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        tx.commit().await?;

        row.into_customer()
    }

    /// Get a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            "SELECT id, name, email, phone, created_at FROM customers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(CustomerRow::into_customer).transpose()
    }

    /// Find a customer by email, matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, RepositoryError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            "SELECT id, name, email, phone, created_at FROM customers WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        row.map(CustomerRow::into_customer).transpose()
    }

    /// Whether a customer with this email exists, matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE email = ?1)")
                .bind(email)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// List customers with filtering and ordering.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: &CustomerFilter,
        order: &[SortKey],
    ) -> Result<Vec<Customer>, RepositoryError> {
        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT id, name, email, phone, created_at FROM customers WHERE 1=1");

        if let Some(name) = &filter.name_contains {
            qb.push(" AND name LIKE ")
                .push_bind(contains_pattern(name))
                .push(r" ESCAPE '\'");
        }
        if let Some(email) = &filter.email_contains {
            qb.push(" AND email LIKE ")
                .push_bind(contains_pattern(email))
                .push(r" ESCAPE '\'");
        }
        if let Some(gte) = filter.created_at_gte {
            qb.push(" AND datetime(created_at) >= datetime(")
                .push_bind(gte)
                .push(")");
        }
        if let Some(lte) = filter.created_at_lte {
            qb.push(" AND datetime(created_at) <= datetime(")
                .push_bind(lte)
                .push(")");
        }
        if let Some(prefix) = &filter.phone_prefix {
            qb.push(" AND phone LIKE ")
                .push_bind(prefix_pattern(prefix))
                .push(r" ESCAPE '\'");
        }

        qb.push(order_by_clause(order));

        let rows: Vec<CustomerRow> = qb.build_query_as().fetch_all(self.pool).await?;

        rows.into_iter().map(CustomerRow::into_customer).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db;

    async fn test_pool() -> SqlitePool {
        let pool = db::create_memory_pool().await.unwrap();
        db::run_migrations(&pool).await.unwrap();
        pool
    }

    fn new_customer(name: &str, email: &str, phone: Option<&str>) -> NewCustomer {
        NewCustomer {
            name: name.to_owned(),
            email: Email::parse(email).unwrap(),
            phone: phone.map(|p| PhoneNumber::parse(p).unwrap()),
        }
    }

    #[tokio::test]
    async fn create_and_get_roundtrip() {
        let pool = test_pool().await;
        let repo = CustomerRepository::new(&pool);

        let created = repo
            .create(&new_customer("Alice", "alice@example.com", Some("+1234567890")))
            .await
            .unwrap();

        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Alice");
        assert_eq!(fetched.email.as_str(), "alice@example.com");
        assert_eq!(fetched.phone.as_deref(), Some("+1234567890"));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email_case_insensitively() {
        let pool = test_pool().await;
        let repo = CustomerRepository::new(&pool);

        repo.create(&new_customer("Alice", "alice@example.com", None))
            .await
            .unwrap();

        let err = repo
            .create(&new_customer("Other", "ALICE@EXAMPLE.COM", None))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn exists_by_email_is_case_insensitive() {
        let pool = test_pool().await;
        let repo = CustomerRepository::new(&pool);

        repo.create(&new_customer("Alice", "alice@example.com", None))
            .await
            .unwrap();

        assert!(repo.exists_by_email("Alice@Example.Com").await.unwrap());
        assert!(!repo.exists_by_email("bob@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn list_filters_by_name_and_phone_prefix() {
        let pool = test_pool().await;
        let repo = CustomerRepository::new(&pool);

        repo.create(&new_customer("Alice", "alice@example.com", Some("+1234567890")))
            .await
            .unwrap();
        repo.create(&new_customer("Bob", "bob@example.com", Some("123-456-7890")))
            .await
            .unwrap();

        let filter = CustomerFilter {
            name_contains: Some("ali".to_owned()),
            ..CustomerFilter::default()
        };
        let found = repo.list(&filter, &[]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Alice");

        let filter = CustomerFilter {
            phone_prefix: Some("+1".to_owned()),
            ..CustomerFilter::default()
        };
        let found = repo.list(&filter, &[]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Alice");
    }

    #[tokio::test]
    async fn list_orders_by_spec() {
        let pool = test_pool().await;
        let repo = CustomerRepository::new(&pool);

        repo.create(&new_customer("Bob", "bob@example.com", None))
            .await
            .unwrap();
        repo.create(&new_customer("Alice", "alice@example.com", None))
            .await
            .unwrap();

        let order = sort_keys("-name").unwrap();
        let listed = repo.list(&CustomerFilter::default(), &order).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice"]);
    }
}
