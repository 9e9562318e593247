// Migration module - table migration, media migration, and run orchestration
pub mod executor;
pub mod media;
pub mod table;

pub use executor::{MigrationExecutor, MigrationMode};
pub use media::MediaMigrator;
pub use table::TableMigrator;
