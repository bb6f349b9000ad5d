//! Pure input validation for the mutation workflows.
//!
//! Each function maps a raw input to either a typed value or a
//! [`MutationError`] carrying the user-facing message. No I/O: referential
//! checks (email uniqueness, id resolution) live in the services.

use std::str::FromStr;

use rust_decimal::Decimal;

use crm_core::{Email, PhoneNumber};

use crate::error::MutationError;

/// Validate an email address.
///
/// # Errors
///
/// Returns `MutationError::InvalidFormat` when the value is not a
/// syntactically valid email address.
pub fn validate_email(value: &str) -> Result<Email, MutationError> {
    Email::parse(value)
        .map_err(|_| MutationError::InvalidFormat("Invalid email format".to_owned()))
}

/// Validate an optional phone number.
///
/// An absent or empty value is valid (phone is optional).
///
/// # Errors
///
/// Returns `MutationError::InvalidFormat` with the accepted-shape message
/// when a non-empty value does not look like a phone number.
pub fn validate_phone(value: Option<&str>) -> Result<Option<PhoneNumber>, MutationError> {
    match value {
        None | Some("") => Ok(None),
        Some(raw) => PhoneNumber::parse(raw)
            .map(Some)
            .map_err(|e| MutationError::InvalidFormat(e.to_string())),
    }
}

/// Validate a raw price string.
///
/// # Errors
///
/// Returns `MutationError::InvalidFormat` when the value does not parse as
/// a decimal, and `MutationError::OutOfRange` when it is not positive.
pub fn validate_price(value: &str) -> Result<Decimal, MutationError> {
    let price = Decimal::from_str(value.trim())
        .map_err(|_| MutationError::InvalidFormat("Price must be a valid decimal".to_owned()))?;

    if price <= Decimal::ZERO {
        return Err(MutationError::OutOfRange("Price must be positive".to_owned()));
    }

    Ok(price)
}

/// Validate an optional stock count, defaulting to zero when absent.
///
/// # Errors
///
/// Returns `MutationError::OutOfRange` when the value is negative.
pub fn validate_stock(value: Option<i64>) -> Result<i64, MutationError> {
    let stock = value.unwrap_or(0);
    if stock < 0 {
        return Err(MutationError::OutOfRange("Stock cannot be negative".to_owned()));
    }
    Ok(stock)
}
