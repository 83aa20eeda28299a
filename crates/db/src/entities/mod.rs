//! Database entities.

pub mod follow;
pub mod like;
pub mod share;
pub mod target_type;

pub use follow::Entity as Follow;
pub use like::Entity as Like;
pub use share::Entity as Share;
pub use target_type::TargetType;
