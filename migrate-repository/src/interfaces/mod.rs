//! This module defines and re-exports the connector interfaces.
//! The table migrator only talks to these traits, so it can run against the
//! real stores or against the in-memory mocks.
mod destination;
mod source;

pub use destination::{DestinationWriter, RowOutcome};
pub use source::SourceReader;
