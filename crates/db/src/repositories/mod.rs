//! Action record repositories.

mod follow;
mod like;
mod share;

pub use follow::FollowRepository;
pub use like::LikeRepository;
pub use share::ShareRepository;

use serde::Serialize;

/// Tri-state of a toggleable action record.
///
/// A record that was created and later cancelled is not the same thing as a
/// record that never existed; collapsing the two into one boolean loses the
/// distinction the cancellation rules depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleState {
    /// No record exists for the key triple.
    Absent,
    /// A record exists and the action is in effect.
    Active,
    /// A record exists but the action was cancelled.
    Cancelled,
}

impl ToggleState {
    /// Whether the action is currently in effect.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Stable lowercase name, as exposed in API responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }
}
