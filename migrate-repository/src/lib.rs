//! # Migrate Repository
//! This crate provides the connectors used by the site migration: a read side
//! over the embedded SQLite store and a write side over the managed PostgreSQL
//! service. It includes definitions for errors, interfaces, schema discovery,
//! the concrete SQLite and PostgreSQL implementations, and in-memory mocks.
pub mod discovery;
pub mod errors;
pub mod interfaces;
pub mod mock;
pub mod postgres;
pub mod sqlite;
mod utils;

pub use discovery::discover_tables;
pub use errors::{DestinationError, SourceError};
pub use interfaces::{DestinationWriter, RowOutcome, SourceReader};
pub use mock::{MockDestination, MockSource};
pub use postgres::{PostgresDestination, PostgresSession};
pub use sqlite::SqliteSource;
