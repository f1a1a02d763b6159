use mealbox::server::{config::Config, error::Error, scheduler::Scheduler, startup};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Error> {
    let db = startup::connect_to_database(&config).await?;
    let mut scheduler = Scheduler::new(db).await?.start(&config).await?;

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::InternalError(format!("Failed to listen for ctrl-c: {}", e)))?;

    tracing::info!("Shutting down scheduler");
    scheduler.shutdown().await?;

    Ok(())
}
