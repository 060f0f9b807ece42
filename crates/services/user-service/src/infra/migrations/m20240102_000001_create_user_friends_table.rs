//! Migration: directed friendship edges between users.
//!
//! The composite primary key makes a second insert of the same edge fail,
//! which the repository reads as "already friends".

use sea_orm_migration::prelude::*;

use super::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserFriends::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserFriends::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserFriends::FriendId).uuid().not_null())
                    .col(
                        ColumnDef::new(UserFriends::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserFriends::UserId)
                            .col(UserFriends::FriendId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_friends_user_id")
                            .from(UserFriends::Table, UserFriends::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_friends_friend_id")
                            .from(UserFriends::Table, UserFriends::FriendId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Reverse lookups (who has this user as a friend)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_friends_friend_id")
                    .table(UserFriends::Table)
                    .col(UserFriends::FriendId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserFriends::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserFriends {
    Table,
    UserId,
    FriendId,
    CreatedAt,
}
