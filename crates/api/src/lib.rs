//! CRM API - GraphQL service over customers, products, and orders.
//!
//! # Architecture
//!
//! - [`config`] - Environment-driven configuration
//! - [`db`] - SQLite repositories (sqlx) and the migration runner
//! - [`models`] - Domain models, write inputs, and filter options
//! - [`validation`] - Pure input validation for the mutation workflows
//! - [`services`] - Mutation workflows (validation, transactions, totals)
//! - [`graphql`] - async-graphql schema: queries, mutations, payload types
//!
//! The binary in `main.rs` mounts the schema on axum at `/graphql` (POST for
//! operations, GET for the GraphiQL IDE).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod models;
pub mod services;
pub mod validation;

pub use error::MutationError;
