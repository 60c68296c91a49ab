//! Register Use Case
//!
//! Creates a new staff account.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::ClinicConfig;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    credential::{RawPassword, StoredPassword},
    role::Role,
    username::Username,
};
use crate::error::{ClinicError, ClinicResult};

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    users: Arc<U>,
    config: Arc<ClinicConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(users: Arc<U>, config: Arc<ClinicConfig>) -> Self {
        Self { users, config }
    }

    /// Register a new account
    ///
    /// A blank username fails with a Validation-kinded error; a taken
    /// username with Conflict. For the doctor role the repository also
    /// creates the linked doctor row, atomically with the user row.
    pub async fn execute(&self, input: RegisterInput) -> ClinicResult<UserId> {
        let username = Username::new(&input.username).map_err(|_| ClinicError::EmptyUsername)?;

        let raw = RawPassword::new(input.password);
        let password = StoredPassword::from_raw(&raw, self.config.pepper())?;

        let user = NewUser::new(username, password, input.role);
        let user_id = self.users.create(&user).await?;

        tracing::info!(
            user_id = %user_id,
            username = %user.username,
            role = %user.role,
            "User registered"
        );

        Ok(user_id)
    }
}
