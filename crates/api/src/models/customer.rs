//! Customer domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crm_core::{CustomerId, Email, PhoneNumber};

/// A customer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Email address; unique across customers, case-insensitively.
    pub email: Email,
    /// Optional phone number (stored as entered).
    pub phone: Option<String>,
    /// When the customer was created; set once at insert.
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    /// Display name.
    pub name: String,
    /// Validated email address.
    pub email: Email,
    /// Validated phone number, if provided.
    pub phone: Option<PhoneNumber>,
}

/// Filter criteria for listing customers.
#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    /// Case-insensitive substring match on the name.
    pub name_contains: Option<String>,
    /// Case-insensitive substring match on the email.
    pub email_contains: Option<String>,
    /// Created at or after this instant.
    pub created_at_gte: Option<DateTime<Utc>>,
    /// Created at or before this instant.
    pub created_at_lte: Option<DateTime<Utc>>,
    /// Phone number starts with this prefix (e.g. "+1").
    pub phone_prefix: Option<String>,
}
