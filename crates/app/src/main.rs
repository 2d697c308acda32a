use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "trakli={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let server = settings.server;
    let db = parse_database(&server.database).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|err| {
        tracing::error!("failed to bind server listener on {addr}: {err}");
        err
    })?;

    server::run_with_listener(engine, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => {
            tracing::warn!("using an in-memory database, data is lost on exit");
            String::from("sqlite::memory:")
        }
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
