//! PostgreSQL destination connector.
mod destination;
mod statement;

pub use destination::{connect_options, PostgresDestination, PostgresSession};
pub use statement::{encode_param, insert_statement};
