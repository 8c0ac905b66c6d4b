//! Todo Server binary.

use std::net::SocketAddr;

use todo_server::{config::Config, create_app, create_state, init_tracing};
use todo_store::PgTodoStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    tracing::info!(database = %config.pg_db, "Starting Todo Server");

    // Connect to PostgreSQL and bootstrap the schema
    let store = PgTodoStore::connect(config.pg_connect_options()).await?;

    // Create application state
    let state = create_state(config.clone(), store);

    // Create application router
    let app = create_app(state);

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(addr = %addr, "Server listening");

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
