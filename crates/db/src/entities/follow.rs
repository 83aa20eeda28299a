//! Follow entity (one toggleable record per user/target pair).

use super::target_type::TargetType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "follow")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The entity being followed
    pub target_id: String,

    /// Namespace tag for `target_id`
    pub target_type: TargetType,

    /// The acting user
    pub user_id: String,

    /// Toggle state: false = active, true = cancelled
    pub is_cancel: bool,

    pub created_at: DateTimeWithTimeZone,

    /// Bumped on every toggle transition
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
