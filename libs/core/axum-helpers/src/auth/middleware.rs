use super::jwt::JwtAuth;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Bearer-token authentication middleware.
///
/// Verifies the token and inserts the decoded claims `C` into the request
/// extensions, where handlers read them with `Extension<C>`.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::{JwtAuth, jwt_auth_middleware};
///
/// let protected = Router::new()
///     .route("/profile", get(profile))
///     .layer(axum::middleware::from_fn_with_state(
///         auth.clone(),
///         jwt_auth_middleware::<TokenClaims>,
///     ));
/// ```
pub async fn jwt_auth_middleware<C>(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response>
where
    C: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let Some(token) = extract_bearer_token(&headers) else {
        tracing::debug!("No bearer token in Authorization header");
        return Err(AppError::Unauthorized("No token provided".to_string()).into_response());
    };

    let claims = auth.decode::<C>(token).map_err(|e| {
        tracing::debug!("JWT verification failed: {}", e);
        AppError::Unauthorized("Invalid token".to_string()).into_response()
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
