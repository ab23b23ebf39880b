//! Test utilities for the database crate.

use super::Database;
use bridge_indexer_migration::{Migrator, MigratorTrait};

/// Instantiates a new in-memory database and runs the migrations to set up
/// the schema.
pub async fn setup_test_db() -> Database {
    let db = Database::new("sqlite::memory:").await.unwrap();
    Migrator::up(db.inner(), None).await.unwrap();
    db
}
