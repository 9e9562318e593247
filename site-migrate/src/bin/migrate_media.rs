use anyhow::Result;
use site_migrate::{logging, run, MigrationMode};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    // Load environment variables
    dotenv::dotenv().ok();

    info!("Starting media migration to object storage");

    if let Err(e) = run(MigrationMode::MediaOnly).await {
        error!("Migration aborted: {:#}", e);
        return Err(e);
    }

    Ok(())
}
