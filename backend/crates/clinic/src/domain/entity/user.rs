//! User Entity
//!
//! A staff login account. Created at registration, never updated; there is
//! no profile beyond the credential and the role.

use kernel::id::UserId;

use crate::domain::value_object::{
    credential::StoredPassword, role::Role, username::Username,
};

/// User entity, as loaded from the `users` table
#[derive(Debug, Clone)]
pub struct User {
    /// Store-generated identifier
    pub id: UserId,
    /// Unique login name
    pub username: Username,
    /// Salted Argon2id hash; plaintext never reaches this type
    pub password: StoredPassword,
    /// Staff role
    pub role: Role,
}

/// A user about to be registered (no id until the store assigns one)
///
/// When `role` is [`Role::Doctor`], persisting this also creates the linked
/// doctor row — see [`crate::domain::repository::UserRepository::create`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password: StoredPassword,
    pub role: Role,
}

impl NewUser {
    pub fn new(username: Username, password: StoredPassword, role: Role) -> Self {
        Self {
            username,
            password,
            role,
        }
    }
}
