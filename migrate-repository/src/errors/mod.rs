//! Error types for the migration connectors.
//! Consolidates and re-exports the source and destination error types.
mod destination;
mod source;

pub use destination::DestinationError;
pub use source::SourceError;
