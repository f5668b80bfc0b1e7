//! Access flag entity - Caches which users have been verified as buyers.
//!
//! A row is written the first time the purchase-history probe confirms a user's
//! purchase, so later checks can skip the remote call. Rows are only ever removed
//! by an admin through `/access remove`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Access flag database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "access_flags")]
pub struct Model {
    /// Discord user ID this flag belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Whether the user may run gated commands
    pub has_access: bool,
    /// When the flag was last written
    pub updated_at: DateTimeUtc,
}

/// `AccessFlag` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
