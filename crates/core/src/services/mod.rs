//! Business logic services.
//!
//! One service per action kind. The services are the error-kind authority:
//! they enforce the toggle-transition rules and downgrade write-path storage
//! failures to a generic retryable error, while read-path errors pass
//! through untouched.

mod follow;
mod like;
mod share;

pub use follow::{FollowItem, FollowService};
pub use like::{LikeItem, LikeService};
pub use share::{ShareItem, ShareService};
