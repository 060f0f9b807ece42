//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Friendship rejection reasons (logged, never returned to callers)
// =============================================================================

pub const REJECT_USER_MISSING: &str = "user not found";
pub const REJECT_FRIEND_MISSING: &str = "no user with that invite id";
pub const REJECT_DELETED: &str = "user or friend is deleted";
pub const REJECT_SELF: &str = "cannot befriend yourself";
pub const REJECT_ALREADY_FRIENDS: &str = "already friends";
