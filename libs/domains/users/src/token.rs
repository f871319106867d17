use axum_helpers::JwtAuth;

use crate::error::{UserError, UserResult};
use crate::models::TokenClaims;

/// Token issuance collaborator
#[cfg_attr(test, mockall::automock)]
pub trait TokenSigner: Send + Sync {
    fn sign(&self, claims: &TokenClaims) -> UserResult<String>;
}

impl TokenSigner for JwtAuth {
    fn sign(&self, claims: &TokenClaims) -> UserResult<String> {
        self.encode(claims)
            .map_err(|e| UserError::Token(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_helpers::JwtConfig;
    use uuid::Uuid;

    #[test]
    fn test_signed_token_carries_user_id() {
        let auth = JwtAuth::new(&JwtConfig::new("a-very-long-secret-for-testing-only!!"));
        let claims = TokenClaims { id: Uuid::now_v7() };

        let token = auth.sign(&claims).unwrap();
        let decoded: TokenClaims = auth.decode(&token).unwrap();

        assert_eq!(decoded, claims);
    }
}
