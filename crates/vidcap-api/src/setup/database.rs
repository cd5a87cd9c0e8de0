//! Database initialization

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vidcap_core::Config;
use vidcap_db::{connect, run_migrations, Database, PgDatabase};

/// Connect, apply migrations, and wrap the pool as the metadata recorder.
pub async fn setup_database(config: &Config) -> Result<Arc<dyn Database>> {
    let pool = connect(
        config.database_url(),
        config.db_max_connections(),
        config.db_timeout_seconds(),
    )
    .await?;

    // Workspace migrations/ from crate root unless MIGRATIONS_DIR points elsewhere
    let migrations_dir = std::env::var("MIGRATIONS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations"));
    run_migrations(&pool, &migrations_dir).await?;

    Ok(Arc::new(PgDatabase::new(pool)))
}
