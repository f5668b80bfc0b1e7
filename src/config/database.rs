//! Database configuration module for `CompanyBuddy`.
//!
//! The access-flag cache lives in a small `SQLite` database accessed through `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust structs.

use crate::entities::AccessFlag;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::info;

/// Default database location when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/company_buddy.sqlite?mode=rwc";

/// Gets the database URL from the environment or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Connects to the database at [`get_database_url`] and makes sure its tables exist.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    ensure_sqlite_dir(&database_url)?;
    info!("Connecting to database at {database_url}");
    let db = Database::connect(&database_url).await?;
    create_tables(&db).await?;
    Ok(db)
}

/// Creates the parent directory of a file-backed `SQLite` URL.
///
/// `SQLite` creates the database file on demand but not the directories above it.
fn ensure_sqlite_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let file = rest.split('?').next().unwrap_or_default();
    if let Some(parent) = Path::new(file)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Creates all tables that do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut access_flag_table = schema.create_table_from_entity(AccessFlag);
    access_flag_table.if_not_exists();
    db.execute(builder.build(&access_flag_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::AccessFlagModel;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let flags: Vec<AccessFlagModel> = AccessFlag::find().limit(1).all(&db).await?;
        assert!(flags.is_empty());
        Ok(())
    }

    #[test]
    fn test_ensure_sqlite_dir_ignores_memory_urls() -> Result<()> {
        ensure_sqlite_dir("sqlite::memory:")?;
        ensure_sqlite_dir("postgres://localhost/db")?;
        Ok(())
    }

    #[test]
    fn test_ensure_sqlite_dir_creates_parent() -> Result<()> {
        let dir = std::env::temp_dir().join(format!("company_buddy_test_{}", std::process::id()));
        let url = format!("sqlite://{}/nested/flags.sqlite?mode=rwc", dir.display());

        ensure_sqlite_dir(&url)?;

        assert!(dir.join("nested").is_dir());
        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
