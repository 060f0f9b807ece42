//! Use cases built on top of the user repository.

mod factories;
mod get_user;

pub use factories::make_get_user;
pub use get_user::GetUser;
