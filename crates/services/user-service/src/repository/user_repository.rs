//! User repository implementation with soft delete and friendships.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::entities::friendship::{self, Entity as FriendshipEntity};
use super::entities::user::{self, ActiveModel, Entity as UserEntity, FriendsLink};
use common::{AppError, AppResult, OptionExt};
use domain::{
    NewUser, User, REJECT_ALREADY_FRIENDS, REJECT_DELETED, REJECT_FRIEND_MISSING, REJECT_SELF,
    REJECT_USER_MISSING,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups return soft-deleted users too; check [`User::is_deleted`] where
/// that matters.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, input: NewUser) -> AppResult<User>;

    /// List every user, soft-deleted included, oldest first
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by invite code
    async fn find_by_invite_id(&self, invite_id: i32) -> AppResult<Option<User>>;

    /// Soft delete user by ID (sets deleted_at timestamp)
    async fn delete_by_id(&self, id: Uuid) -> AppResult<()>;

    /// Clear the deleted_at timestamp
    async fn restore_by_id(&self, id: Uuid) -> AppResult<()>;

    /// Permanently delete user and their friendship edges
    async fn purge_by_id(&self, id: Uuid) -> AppResult<()>;

    /// Count all users, soft-deleted included
    async fn user_count(&self) -> AppResult<u64>;

    /// List the friends of a user. Fails with `NotFound` for an unknown id.
    async fn list_user_friends(&self, user_id: Uuid) -> AppResult<Vec<User>>;

    /// Befriend the user owning `friend_invite_id`.
    ///
    /// Returns `false` when either side is missing or deleted, when both are
    /// the same user, or when they are already friends.
    async fn add_friend(&self, user_id: Uuid, friend_invite_id: i32) -> AppResult<bool>;

    /// Count the friends of an already resolved user
    async fn count_friends(&self, user: &User) -> AppResult<u64>;
}

/// Outcome of the checks inside [`UserStore::befriend`]
enum FriendRequest {
    Accepted,
    Rejected(&'static str),
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: Uuid) -> AppResult<user::Model> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()
    }

    /// Check-then-insert for both edge directions. Must run inside a transaction.
    async fn befriend(
        txn: &DatabaseTransaction,
        user_id: Uuid,
        friend_invite_id: i32,
    ) -> AppResult<FriendRequest> {
        let Some(user) = UserEntity::find_by_id(user_id).one(txn).await? else {
            return Ok(FriendRequest::Rejected(REJECT_USER_MISSING));
        };
        let Some(friend) = UserEntity::find()
            .filter(user::Column::InviteId.eq(friend_invite_id))
            .one(txn)
            .await?
        else {
            return Ok(FriendRequest::Rejected(REJECT_FRIEND_MISSING));
        };

        if user.id == friend.id {
            return Ok(FriendRequest::Rejected(REJECT_SELF));
        }
        if user.deleted_at.is_some() || friend.deleted_at.is_some() {
            return Ok(FriendRequest::Rejected(REJECT_DELETED));
        }

        let existing = FriendshipEntity::find_by_id((user.id, friend.id))
            .one(txn)
            .await?;
        if existing.is_some() {
            return Ok(FriendRequest::Rejected(REJECT_ALREADY_FRIENDS));
        }

        let now = Utc::now();
        let edges = [(user.id, friend.id), (friend.id, user.id)].map(|(from, to)| {
            friendship::ActiveModel {
                user_id: Set(from),
                friend_id: Set(to),
                created_at: Set(now),
            }
        });

        FriendshipEntity::insert_many(edges)
            .exec_without_returning(txn)
            .await?;

        Ok(FriendRequest::Accepted)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, input: NewUser) -> AppResult<User> {
        let input = input.validated()?;
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email),
            name: Set(input.name),
            invite_id: Set(input.invite_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = active_model.insert(&self.db).await?;
        tracing::info!(user_id = %model.id, "User created");
        Ok(User::from(model))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::InviteId)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;

        Ok(result.map(User::from))
    }

    async fn find_by_invite_id(&self, invite_id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::InviteId.eq(invite_id))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        let user = self.find_model(id).await?;

        // Keep the original timestamp on repeated deletes
        if user.deleted_at.is_some() {
            return Ok(());
        }

        let mut active: ActiveModel = user.into();
        let now = Utc::now();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);

        active.update(&self.db).await?;
        tracing::info!(user_id = %id, "User soft deleted");
        Ok(())
    }

    async fn restore_by_id(&self, id: Uuid) -> AppResult<()> {
        let user = self.find_model(id).await?;

        if user.deleted_at.is_none() {
            return Ok(());
        }

        let mut active: ActiveModel = user.into();
        active.deleted_at = Set(None);
        active.updated_at = Set(Utc::now());

        active.update(&self.db).await?;
        tracing::info!(user_id = %id, "User restored");
        Ok(())
    }

    async fn purge_by_id(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        tracing::info!(user_id = %id, "User purged");
        Ok(())
    }

    async fn user_count(&self) -> AppResult<u64> {
        Ok(UserEntity::find().count(&self.db).await?)
    }

    async fn list_user_friends(&self, user_id: Uuid) -> AppResult<Vec<User>> {
        let user = self.find_model(user_id).await?;

        let friends = user
            .find_linked(FriendsLink)
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(friends.into_iter().map(User::from).collect())
    }

    async fn add_friend(&self, user_id: Uuid, friend_invite_id: i32) -> AppResult<bool> {
        let txn = self.db.begin().await?;

        match Self::befriend(&txn, user_id, friend_invite_id).await {
            Ok(FriendRequest::Accepted) => {
                txn.commit().await?;
                tracing::info!(user_id = %user_id, friend_invite_id, "Friendship created");
                Ok(true)
            }
            Ok(FriendRequest::Rejected(reason)) => {
                txn.rollback().await?;
                tracing::debug!(user_id = %user_id, friend_invite_id, reason, "Friend request rejected");
                Ok(false)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }

                // Another caller inserted the same edge between our check and our write
                if e.is_unique_violation() {
                    tracing::debug!(
                        user_id = %user_id,
                        friend_invite_id,
                        reason = REJECT_ALREADY_FRIENDS,
                        "Friend request rejected"
                    );
                    return Ok(false);
                }
                Err(e)
            }
        }
    }

    async fn count_friends(&self, user: &User) -> AppResult<u64> {
        let count = FriendshipEntity::find()
            .filter(friendship::Column::UserId.eq(user.id))
            .count(&self.db)
            .await?;

        Ok(count)
    }
}
