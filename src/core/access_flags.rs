//! Access-flag store - SeaORM operations on the `access_flags` table.
//!
//! The gate only needs lookup and grant (through [`AccessStore`]); listing and
//! removal back the admin `/access` commands.

use crate::{
    core::access::AccessStore,
    entities::{AccessFlag, access_flag},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::OnConflict};

/// Fetches the stored flag for a user, if any.
pub async fn get_access_flag(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Option<access_flag::Model>> {
    AccessFlag::find_by_id(user_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Inserts or overwrites the flag for a user. Concurrent writers: last write wins.
pub async fn upsert_access_flag(
    db: &DatabaseConnection,
    user_id: &str,
    has_access: bool,
) -> Result<()> {
    let flag = access_flag::ActiveModel {
        user_id: Set(user_id.to_string()),
        has_access: Set(has_access),
        updated_at: Set(chrono::Utc::now()),
    };

    AccessFlag::insert(flag)
        .on_conflict(
            OnConflict::column(access_flag::Column::UserId)
                .update_columns([
                    access_flag::Column::HasAccess,
                    access_flag::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}

/// Removes a user's flag. Returns `true` if a row was deleted.
pub async fn delete_access_flag(db: &DatabaseConnection, user_id: &str) -> Result<bool> {
    let result = AccessFlag::delete_by_id(user_id.to_string())
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Lists every stored flag, most recently written first.
pub async fn list_access_flags(db: &DatabaseConnection) -> Result<Vec<access_flag::Model>> {
    AccessFlag::find()
        .order_by_desc(access_flag::Column::UpdatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

impl AccessStore for DatabaseConnection {
    async fn lookup(&self, user_id: &str) -> Result<Option<bool>> {
        Ok(get_access_flag(self, user_id)
            .await?
            .map(|flag| flag.has_access))
    }

    async fn grant(&self, user_id: &str) -> Result<()> {
        upsert_access_flag(self, user_id, true).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_upsert_then_get() -> Result<()> {
        let db = setup_test_db().await?;

        upsert_access_flag(&db, "1001", true).await?;

        let flag = get_access_flag(&db, "1001").await?.unwrap();
        assert_eq!(flag.user_id, "1001");
        assert!(flag.has_access);
        assert!(get_access_flag(&db, "2002").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_overwrites_existing_flag() -> Result<()> {
        let db = setup_test_db().await?;

        upsert_access_flag(&db, "1001", true).await?;
        upsert_access_flag(&db, "1001", false).await?;

        let flags = list_access_flags(&db).await?;
        assert_eq!(flags.len(), 1);
        assert!(!flags[0].has_access);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_access_flag() -> Result<()> {
        let db = setup_test_db().await?;
        upsert_access_flag(&db, "1001", true).await?;

        assert!(delete_access_flag(&db, "1001").await?);
        assert!(!delete_access_flag(&db, "1001").await?);
        assert!(list_access_flags(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_store_trait_lookup_and_grant() -> Result<()> {
        let db = setup_test_db().await?;

        assert_eq!(db.lookup("1001").await?, None);
        db.grant("1001").await?;
        assert_eq!(db.lookup("1001").await?, Some(true));
        Ok(())
    }
}
