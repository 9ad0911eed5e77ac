use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use dinho_shared::Error;

use super::jwt::validate_token;
use crate::{error::ApiError, routes::AppState};

/// Require `Authorization: Bearer <jwt>` and insert [`super::AuthUser`]
/// into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    let Some(token) = token else {
        tracing::warn!("missing bearer token");
        return ApiError(Error::Unauthorized).into_response();
    };

    match validate_token(token, &state.config.jwt.secret) {
        Ok(user) => {
            tracing::debug!(subject = %user.subject, "request authenticated");
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(e) => {
            tracing::warn!(error = %e, "invalid bearer token");
            ApiError(Error::Unauthorized).into_response()
        }
    }
}
