//! Tag Keeper - A state-managed HTTP server running a game of tag
//!
//! This is the main entry point for the tag-keeper application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use tag_keeper::{
    api::create_router,
    config::Config,
    services::{JsonFileStore, MemberDirectory, Roster},
    state::{AppState, TAGBACK_COOLDOWN},
    tasks::notification_log_task,
    utils::{init_tracing, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    init_tracing(config.log_level(), config.log_file.as_deref())?;

    info!("Starting tag-keeper server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, data={}, cooldown={}s",
          config.host, config.port, config.data.display(), TAGBACK_COOLDOWN.as_secs());

    let directory: Arc<dyn MemberDirectory> = match &config.members {
        Some(path) => match Roster::load(path) {
            Ok(roster) => Arc::new(roster),
            Err(e) => {
                warn!("Failed to load roster, names will show as ids: {:#}", e);
                Arc::new(Roster::empty())
            }
        },
        None => {
            info!("No roster configured, any member id can be tagged");
            Arc::new(Roster::empty())
        }
    };

    // Create application state and restore the saved game
    let store = Arc::new(JsonFileStore::new(config.data.clone()));
    let state = Arc::new(AppState::new(config.port, config.host.clone(), store, directory));
    state.load_persisted();

    // Start the notification background task
    let notification_state = Arc::clone(&state);
    tokio::spawn(async move {
        notification_log_task(notification_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /tag         - Tag a member");
    info!("  GET  /tag/options - Members that can be tagged");
    info!("  GET  /timetagged  - How long the current holder has been it");
    info!("  GET  /cooldown    - Time left on the tagback cooldown");
    info!("  GET  /status      - Current game status");
    info!("  GET  /health      - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
