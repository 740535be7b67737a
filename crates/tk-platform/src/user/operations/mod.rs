//! User use cases

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub use create::{CreateUser, CreateUserInput};
pub use delete::{DeleteUser, DeleteUserInput};
pub use get::{GetUser, GetUserInput};
pub use list::{ListUsers, ListUsersInput};
pub use update::{UpdateUser, UpdateUserInput};
