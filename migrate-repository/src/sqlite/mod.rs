//! SQLite source connector.
mod source;

pub use source::SqliteSource;
