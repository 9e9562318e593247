//! # Migrate Shared
//! This crate defines the data structures shared by the site migration crates.
//! It includes the schema-agnostic row model read from the source store, the
//! media asset descriptor, and the per-table / per-directory run reports.
pub mod types;
