//! Share entity.
//!
//! Shares have no toggle state: every share inserts a fresh immutable row,
//! so a user can share the same target any number of times.

use super::target_type::TargetType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "share")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The entity being shared
    pub target_id: String,

    /// Namespace tag for `target_id`
    pub target_type: TargetType,

    /// The acting user
    pub user_id: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
