use sieraad_server::{Config, Server, ServerState};
use sieraad_server::utils::logger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, logging)
    dotenv::dotenv().ok();
    logger::init_logger();

    tracing::info!("Sieraad server starting...");

    // 2. Load configuration
    let config = Config::from_env()?;

    // 3. Initialize server state (database, migrations, admin account)
    let state = ServerState::initialize(&config).await?;

    // 4. Run the HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
