use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use migration::MigratorTrait;



/// Fresh in-memory SQLite database with the catalog schema applied.
///
/// A single pooled connection keeps every query on the same in-memory file.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
