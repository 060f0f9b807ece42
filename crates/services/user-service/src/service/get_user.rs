//! Get user use case.

use std::sync::Arc;

use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::UserProfile;

use crate::repository::UserRepository;

/// Resolves an active user together with their friend count.
pub struct GetUser {
    repo: Arc<dyn UserRepository>,
}

impl GetUser {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Soft-deleted users are reported as `NotFound`.
    pub async fn execute(&self, id: Uuid) -> AppResult<UserProfile> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .filter(|u| u.is_active())
            .ok_or_not_found()?;

        let friend_count = self.repo.count_friends(&user).await?;

        Ok(UserProfile { user, friend_count })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    use common::AppError;
    use domain::User;

    use super::*;
    use crate::repository::MockUserRepository;

    fn create_test_user(id: Uuid) -> User {
        User::new(id, "test@example.com".to_string(), "Test User".to_string(), 1001)
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(user_id))
            .returning(|id| Ok(Some(create_test_user(id))));
        repo.expect_count_friends()
            .withf(move |u: &User| u.id == user_id)
            .returning(|_| Ok(3));

        let get_user = GetUser::new(Arc::new(repo));
        let profile = assert_ok!(get_user.execute(user_id).await);

        assert_eq!(profile.user.id, user_id);
        assert_eq!(profile.friend_count, 3);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_count_friends().never();

        let get_user = GetUser::new(Arc::new(repo));
        let err = assert_err!(get_user.execute(Uuid::new_v4()).await);

        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_get_user_hides_soft_deleted() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|id| {
            let mut user = create_test_user(id);
            user.deleted_at = Some(Utc::now());
            Ok(Some(user))
        });
        repo.expect_count_friends().never();

        let get_user = GetUser::new(Arc::new(repo));
        let err = assert_err!(get_user.execute(Uuid::new_v4()).await);

        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_get_user_propagates_store_errors() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Err(AppError::internal("connection reset")));

        let get_user = GetUser::new(Arc::new(repo));
        let err = assert_err!(get_user.execute(Uuid::new_v4()).await);

        assert_eq!(err.code(), "INTERNAL_ERROR");
    }
}
