//! Customer mutation workflows.

use sqlx::SqlitePool;

use crate::db::CustomerRepository;
use crate::error::MutationError;
use crate::models::{Customer, NewCustomer};
use crate::validation::{validate_email, validate_phone};

/// Raw customer input as received from the client, pre-validation.
#[derive(Debug, Clone)]
pub struct CustomerDraft {
    /// Display name.
    pub name: String,
    /// Email address, unvalidated.
    pub email: String,
    /// Phone number, unvalidated.
    pub phone: Option<String>,
}

/// Outcome of a bulk customer creation: the created customers plus the
/// per-row error strings. Partial failure is the normal case, not an error.
#[derive(Debug, Default)]
pub struct BulkCreateOutcome {
    /// Customers created, in input order.
    pub customers: Vec<Customer>,
    /// One entry per failed row, tagged with its 1-based position.
    pub errors: Vec<String>,
}

/// Create a single customer.
///
/// Validation order: email format, phone format, email uniqueness
/// (case-insensitive, against the store). A unique-constraint race at
/// insert time surfaces as the same `DuplicateKey` outcome as the
/// pre-check.
///
/// # Errors
///
/// `InvalidFormat` for a malformed email or phone, `DuplicateKey` when the
/// email is already taken, `TransactionFailure` for storage errors.
pub async fn create_customer(
    pool: &SqlitePool,
    draft: CustomerDraft,
) -> Result<Customer, MutationError> {
    let email = validate_email(&draft.email)?;
    let phone = validate_phone(draft.phone.as_deref())?;

    let repo = CustomerRepository::new(pool);
    if repo.exists_by_email(&draft.email).await? {
        return Err(MutationError::DuplicateKey("Email already exists".to_owned()));
    }

    let customer = repo
        .create(&NewCustomer {
            name: draft.name,
            email,
            phone,
        })
        .await?;

    tracing::info!(customer_id = %customer.id, "customer created");

    Ok(customer)
}

/// Create a batch of customers, each row independent.
///
/// Rows are processed in order. Every validation failure for a row is
/// collected (tagged "Row {i}: ...") and the row is skipped; a valid row is
/// inserted in its own transaction, so a storage failure on one row never
/// rolls back earlier successes. Each row is validated against the store
/// snapshot at its own validation time, which includes rows committed
/// earlier in the same batch; the unique index remains the backstop for
/// concurrent writers and surfaces as a row failure.
pub async fn bulk_create_customers(
    pool: &SqlitePool,
    drafts: Vec<CustomerDraft>,
) -> BulkCreateOutcome {
    let repo = CustomerRepository::new(pool);
    let mut outcome = BulkCreateOutcome::default();

    for (idx, draft) in drafts.into_iter().enumerate() {
        let row = idx + 1;
        let mut row_errors = Vec::new();

        let email = match validate_email(&draft.email) {
            Ok(email) => Some(email),
            Err(_) => {
                row_errors.push(format!("Row {row}: Invalid email '{}'", draft.email));
                None
            }
        };

        let phone = match validate_phone(draft.phone.as_deref()) {
            Ok(phone) => Some(phone),
            Err(err) => {
                row_errors.push(format!("Row {row}: {err}"));
                None
            }
        };

        match repo.exists_by_email(&draft.email).await {
            Ok(true) => {
                row_errors.push(format!("Row {row}: Email '{}' already exists", draft.email));
            }
            Ok(false) => {}
            Err(err) => {
                row_errors.push(format!("Row {row}: {err}"));
            }
        }

        if !row_errors.is_empty() {
            outcome.errors.extend(row_errors);
            continue;
        }

        // Both validated above when row_errors stayed empty.
        let (Some(email), Some(phone)) = (email, phone) else {
            continue;
        };

        match repo
            .create(&NewCustomer {
                name: draft.name,
                email,
                phone,
            })
            .await
        {
            Ok(customer) => outcome.customers.push(customer),
            Err(err) => outcome.errors.push(format!(
                "Row {row}: Failed to create customer '{}': {err}",
                draft.email
            )),
        }
    }

    tracing::info!(
        created = outcome.customers.len(),
        failed = outcome.errors.len(),
        "bulk customer creation finished"
    );

    outcome
}
