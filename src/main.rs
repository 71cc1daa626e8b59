use carcrate::config::Config;
use carcrate::migration::Migrator;
use carcrate::routes;
use clap::Parser;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tower_http::trace::TraceLayer;

fn init_logging(filter: &str) {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .compact()
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = Config::parse();
    init_logging(&config.log_filter());

    tracing::debug!(database_url = %config.database_url, "Connecting to database");
    let db = Database::connect(&config.database_url).await?;
    Migrator::up(&db, None).await?;

    let app = routes::router(db).layer(TraceLayer::new_for_http());

    let addr = config.bind_address()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");
    tracing::info!("OpenAPI document at http://{addr}/api-docs/openapi.json");

    axum::serve(listener, app).await?;
    Ok(())
}
