//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use leafbound_core::{UserId, Username};

/// Session-stored user identity.
///
/// Exactly the data needed to identify the logged-in account: the
/// account ID gating cart operations and the display name for the nav.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Account's database ID.
    pub id: UserId,
    /// Account's login name.
    pub username: Username,
}

/// Session keys for data stored per visitor.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the one-shot flash notice.
    pub const FLASH: &str = "flash";
}
