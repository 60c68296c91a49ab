//! Authenticate Use Case
//!
//! Verifies a login attempt and yields a [`Session`] on success.

use std::sync::Arc;

use crate::application::config::ClinicConfig;
use crate::domain::repository::UserRepository;
use crate::domain::session::Session;
use crate::domain::value_object::{credential::RawPassword, username::Username};
use crate::error::ClinicResult;

/// Authenticate input
pub struct AuthenticateInput {
    pub username: String,
    pub password: String,
}

/// Authenticate use case
pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    users: Arc<U>,
    config: Arc<ClinicConfig>,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(users: Arc<U>, config: Arc<ClinicConfig>) -> Self {
        Self { users, config }
    }

    /// Check the credentials
    ///
    /// Returns `Ok(None)` for an unknown username or a wrong password — an
    /// expected outcome, not a failure. Only store trouble is an `Err`.
    pub async fn execute(&self, input: AuthenticateInput) -> ClinicResult<Option<Session>> {
        // A blank username cannot match any account
        let Ok(username) = Username::new(&input.username) else {
            return Ok(None);
        };

        let Some(user) = self.users.find_by_username(&username).await? else {
            tracing::warn!(username = %username, "Login attempt for unknown username");
            return Ok(None);
        };

        let raw = RawPassword::new(input.password);
        if !user.password.verify(&raw, self.config.pepper()) {
            tracing::warn!(username = %username, "Login attempt with wrong password");
            return Ok(None);
        }

        tracing::info!(
            user_id = %user.id,
            username = %username,
            role = %user.role,
            "User signed in"
        );

        Ok(Some(Session::new(user.id, user.role)))
    }
}
