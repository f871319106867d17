use tracing::instrument;

use crate::error::UserResult;
use crate::models::{AccessToken, LoginResponse, TokenClaims, UserResponse};
use crate::password::{DUMMY_HASH, PasswordHasher};
use crate::repository::UserRepository;
use crate::service::UsersService;
use crate::token::TokenSigner;

/// Credential checks and token issuance
pub struct AuthService<R, H, S> {
    users: UsersService<R, H>,
    signer: S,
}

impl<R, H, S> AuthService<R, H, S>
where
    R: UserRepository,
    H: PasswordHasher,
    S: TokenSigner,
{
    pub fn new(users: UsersService<R, H>, signer: S) -> Self {
        Self { users, signer }
    }

    pub fn users(&self) -> &UsersService<R, H> {
        &self.users
    }

    /// The user without its password when the credentials match.
    ///
    /// Unknown usernames and wrong passwords both give `None`, and both
    /// pay for one password comparison.
    #[instrument(skip(self, password))]
    pub async fn validate_user(
        &self,
        username: &str,
        password: &str,
    ) -> UserResult<Option<UserResponse>> {
        let Some(user) = self.users.find_by_username(username).await? else {
            self.users.hasher().compare(password, DUMMY_HASH).await;
            return Ok(None);
        };

        if !self.users.hasher().compare(password, &user.password).await {
            return Ok(None);
        }

        Ok(Some(user.into()))
    }

    /// Issue an access token for an already validated user.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub fn login(&self, user: &UserResponse) -> UserResult<LoginResponse> {
        let access_token = self.signer.sign(&TokenClaims { id: user.id })?;

        tracing::info!("Issued access token");
        Ok(LoginResponse {
            data: AccessToken { access_token },
        })
    }
}
