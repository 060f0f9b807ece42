//! Composition root for use cases.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::GetUser;
use crate::repository::UserStore;

/// Wire a fresh [`UserStore`] over `db` into a [`GetUser`] use case.
pub fn make_get_user(db: DatabaseConnection) -> GetUser {
    GetUser::new(Arc::new(UserStore::new(db)))
}
