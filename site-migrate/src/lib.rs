pub mod config;
pub mod logging;
pub mod migration;
pub mod runner;
pub mod transform;

pub use migration::{MediaMigrator, MigrationExecutor, MigrationMode, TableMigrator};
pub use runner::run;
pub use transform::{media_key, transform_row, RowTransformer};
