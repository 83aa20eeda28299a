//! Application state.

use action_core::{FollowService, LikeService, ShareService};

/// Application state: a plain aggregate of the three action services.
///
/// The services share no state with each other; the router dispatches to
/// the right one by path.
#[derive(Clone)]
pub struct AppState {
    /// Follow pipeline.
    pub follow_service: FollowService,
    /// Like pipeline.
    pub like_service: LikeService,
    /// Share pipeline.
    pub share_service: ShareService,
}
