use anyhow::Result;
use site_migrate::{logging, run, MigrationMode};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    // Load environment variables
    dotenv::dotenv().ok();

    info!("Starting SQLite to PostgreSQL data migration");

    if let Err(e) = run(MigrationMode::DataOnly).await {
        error!("Migration aborted: {:#}", e);
        return Err(e);
    }

    Ok(())
}
