//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainResult;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// Public code other users type in to send a friend request
    pub invite_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new, active user
    pub fn new(id: Uuid, email: String, name: String, invite_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            name,
            invite_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Check if user is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if user is active (not deleted)
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// User display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    /// Unique invite code for friend requests
    #[validate(range(min = 1, message = "Invite id must be positive"))]
    pub invite_id: i32,
}

impl NewUser {
    pub fn new(email: impl Into<String>, name: impl Into<String>, invite_id: i32) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            invite_id,
        }
    }

    /// Run field validation, returning a domain error on failure
    pub fn validated(self) -> DomainResult<Self> {
        self.validate()?;
        Ok(self)
    }
}

/// A user together with the size of their friend list
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub friend_count: u64,
}
