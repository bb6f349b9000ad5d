//! CRM Core - Shared types library.
//!
//! This crate provides common types used across all CRM backend components:
//! - `api` - GraphQL service over customers, products, and orders
//! - `jobs` - Scheduled maintenance jobs talking to the GraphQL endpoint
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and phone numbers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
