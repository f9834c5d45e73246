use crate::common::state::AppState;
use crate::settings::AppSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

pub fn initialize_logging(settings: &AppSettings) {
    tracing_subscriber::fmt()
        .with_max_level(settings.level)
        // .json()
        .with_timer(tracing_subscriber::fmt::time())
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Builds the one pool the process shares. Every request context clones this
/// handle; nothing else opens connections.
pub async fn initialize_state(settings: &AppSettings) -> anyhow::Result<AppState> {
    let db = initialize_db(settings).await?;
    run_migrations(&db).await?;
    Ok(AppState::new(db))
}

pub async fn initialize_db(settings: &AppSettings) -> sqlx::Result<Pool<Sqlite>> {
    let connect_options =
        SqliteConnectOptions::from_str(&settings.database_url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .acquire_timeout(settings.db_wait_timeout)
        .max_connections(settings.db_max_connections)
        .connect_with(connect_options)
        .await
}

pub async fn run_migrations(db: &Pool<Sqlite>) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(db).await
}
