use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };
use uams::{ Config, Result };

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber
        ::registry()
        .with(
            tracing_subscriber::EnvFilter
                ::try_from_default_env()
                .unwrap_or_else(|_| "uams=debug,tower_http=debug".into())
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| uams::AppError::Config(e.to_string()))?;

    // Initialize database connection
    let db = sea_orm::Database
        ::connect(&config.database_url).await
        .map_err(uams::AppError::Database)?;

    tracing::info!("Database connected successfully");

    // Synchronize the schema; serving must not start against an
    // unsynchronized database, so any failure here aborts startup.
    migration::Migrator::up(&db, None).await.map_err(uams::AppError::Database)?;

    tracing::info!("Schema synchronized successfully");

    // Build application router
    let app = uams::app(db)?
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = config.bind_addr();
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener
        ::bind(&addr).await
        .map_err(|e| uams::AppError::Internal(e.to_string()))?;

    axum::serve(listener, app).await.map_err(|e| uams::AppError::Internal(e.to_string()))?;

    Ok(())
}
