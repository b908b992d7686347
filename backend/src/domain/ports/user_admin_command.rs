//! Driving port for administrative user operations.

use async_trait::async_trait;

use crate::domain::{Actor, Error, Role, User, UserId, Username};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAdminCommand: Send + Sync {
    /// Change the stored base role of `user_id`. Admin only.
    async fn assign_role(&self, actor: &Actor, user_id: &UserId, role: Role)
    -> Result<User, Error>;

    /// Ensure an administrator named `username` exists.
    ///
    /// Idempotent: an existing user with that name is promoted to admin if
    /// needed and returned.
    async fn seed_admin(&self, username: Username) -> Result<User, Error>;
}
