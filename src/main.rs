//! Menuboard backend server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use menuboard::config::Config;
use menuboard::db::{self, Repository};
use menuboard::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting menuboard backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Payment API: {}", config.payment_api_base);
    tracing::info!("Bind address: {}", config.bind_addr);

    let missing = config.missing_checkout_settings();
    if !missing.is_empty() {
        tracing::warn!(
            "Checkout is not fully configured (missing {}). Checkout requests will fail.",
            missing.join(", ")
        );
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Repository::new(pool);

    let bind_addr = config.bind_addr;
    let app = create_router(AppState::new(repo, config));

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
