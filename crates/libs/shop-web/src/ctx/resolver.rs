//! Context resolver for extracting caller identity from HTTP requests.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use shop_auth::{AUTH_HEADER, CONNECTION_TOKEN_TYPE, jwt::TokenCodec};

use crate::ctx::Ctx;
use crate::prelude::*;

/// Extracts the token from an `Authorization` header value.
///
/// The value must be exactly `Bearer <token>` split by one space. Any other
/// shape yields the empty string, which never verifies.
pub fn bearer_token(header: &str) -> &str {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(CONNECTION_TOKEN_TYPE), Some(token), None) => token,
        _ => "",
    }
}

/// Middleware for resolving request context from the bearer token.
///
/// Verifies the token once and stores `Result<Ctx, shop_auth::error::Error>`
/// in the request extensions. It never rejects on its own; gated routes
/// do that in [`crate::mw_auth::mw_require_role`].
///
/// # Examples
///
/// ```rust
/// use axum::Router;
/// use chrono::TimeDelta;
/// use shop_auth::{config::AuthConfig, jwt::TokenCodec};
/// use shop_web::ctx::resolver::mw_ctx_resolver;
///
/// let codec = TokenCodec::new(&AuthConfig::new("secret", TimeDelta::hours(1)));
/// let app: Router<()> = Router::new()
///     .layer(axum::middleware::from_fn_with_state(codec, mw_ctx_resolver));
/// ```
pub async fn mw_ctx_resolver(
    State(codec): State<TokenCodec>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let header = req
        .headers()
        .get(AUTH_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    let ctx = codec.verify(bearer_token(header)).map(Ctx::from);

    req.extensions_mut().insert(ctx);
    next.run(req).await
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<core::result::Result<Ctx, shop_auth::error::Error>>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}
