use shared::models::PublicUser;
use yewdux::Store;

/// Shared session context: who is logged in, if anyone.
#[derive(Default, Clone, PartialEq, Store)]
pub struct AppState {
    /// `None` until the mount-time session check resolves.
    pub checked: bool,
    pub user: Option<PublicUser>,
}
