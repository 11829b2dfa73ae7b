//! Role gate middleware for protecting routes.
//!
//! One middleware, parameterised by a [`RoleRequirement`]:
//!
//! 1. no valid token in the request context: `401 Authentication required`
//! 2. valid token whose role the requirement does not allow: `401` with the
//!    requirement's denial message
//! 3. otherwise the request is forwarded
//!
//! Rejected requests never reach the handler.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shop_auth::role::RoleRequirement;
use tracing::debug;

use super::ctx::Ctx;
use crate::prelude::*;

/// Middleware that requires an authenticated caller whose role satisfies `requirement`.
///
/// # Examples
///
/// ```rust
/// use axum::{Router, routing::get};
/// use shop_auth::role::RoleRequirement;
/// use shop_web::mw_auth::mw_require_role;
///
/// let app: Router<()> = Router::new()
///     .route("/admin", get(admin_handler))
///     .route_layer(axum::middleware::from_fn_with_state(
///         RoleRequirement::ADMIN,
///         mw_require_role,
///     ));
///
/// async fn admin_handler() -> &'static str {
///     "This requires the admin role"
/// }
/// ```
pub async fn mw_require_role(
    State(requirement): State<RoleRequirement>,
    ctx: Result<Ctx>,
    req: Request,
    next: Next,
) -> Result<Response> {
    let ctx = ctx?;
    if !requirement.allows(&ctx.role) {
        debug!(
            "Account {} with role '{}' denied by {:?}",
            ctx.user_id, ctx.role, requirement
        );
        return Err(Error::Forbidden(requirement.denial_message()));
    }
    Ok(next.run(req).await)
}

/// Builds the role gate layer for a [`RoleRequirement`].
///
/// # Examples
///
/// ```rust
/// use axum::{Router, routing::get};
/// use shop_auth::role::RoleRequirement;
/// use shop_web::require_role;
///
/// let app: Router<()> = Router::new()
///     .route("/profile", get(profile_handler))
///     .route_layer(require_role!(RoleRequirement::CUSTOMER));
///
/// async fn profile_handler() -> &'static str {
///     "Customers and admins"
/// }
/// ```
#[macro_export]
macro_rules! require_role {
    ($requirement:expr) => {{
        use $crate::mw_auth::mw_require_role;
        axum::middleware::from_fn_with_state($requirement, mw_require_role)
    }};
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
    };
    use chrono::{TimeDelta, Utc};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use shop_auth::{config::AuthConfig, jwt::TokenCodec, role::Role};
    use tower::ServiceExt;

    use super::*;
    use crate::ctx::resolver::mw_ctx_resolver;

    const SECRET: &str = "gate-test-secret";

    fn codec() -> TokenCodec {
        TokenCodec::new(&AuthConfig::new(SECRET, TimeDelta::hours(1)))
    }

    /// Router with one gated route that counts how often its handler runs.
    fn gated_app(requirement: RoleRequirement, hits: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/gated",
                get(move |ctx: Ctx| {
                    let hits = hits.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        format!("{}:{}", ctx.user_id, ctx.role)
                    }
                }),
            )
            .route_layer(require_role!(requirement))
            .layer(middleware::from_fn_with_state(codec(), mw_ctx_resolver))
    }

    async fn call(app: Router, authorization: Option<String>) -> (StatusCode, String) {
        let mut request = Request::builder().uri("/gated");
        if let Some(value) = authorization {
            request = request.header("Authorization", value);
        }
        let response = app
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn error_message(body: &str) -> String {
        let value: Value = serde_json::from_str(body).unwrap();
        value["error"].as_str().unwrap().to_string()
    }

    fn bearer(token: &str) -> Option<String> {
        Some(format!("Bearer {token}"))
    }

    #[tokio::test]
    async fn admin_gate_forwards_admin_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let token = codec().issue(21, Role::Admin).unwrap();

        let (status, body) =
            call(gated_app(RoleRequirement::ADMIN, hits.clone()), bearer(&token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "21:admin");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn admin_gate_rejects_customer_token_without_running_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let token = codec().issue(22, Role::User).unwrap();

        let (status, body) =
            call(gated_app(RoleRequirement::ADMIN, hits.clone()), bearer(&token)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            error_message(&body),
            "Only Administrator is allowed to perform this action"
        );
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn customer_gate_accepts_user_and_admin() {
        for role in [Role::User, Role::Admin] {
            let hits = Arc::new(AtomicUsize::new(0));
            let token = codec().issue(7, role).unwrap();

            let (status, body) =
                call(gated_app(RoleRequirement::CUSTOMER, hits.clone()), bearer(&token)).await;

            assert_eq!(status, StatusCode::OK, "{role}");
            assert_eq!(body, format!("7:{role}"));
            assert_eq!(hits.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn customer_gate_rejects_unknown_role() {
        #[derive(serde::Serialize)]
        struct ForeignClaims {
            id: i64,
            role: &'static str,
            iat: i64,
            exp: i64,
        }
        let now = Utc::now().timestamp();
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &ForeignClaims {
                id: 3,
                role: "guest",
                iat: now,
                exp: now + 600,
            },
            &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        let hits = Arc::new(AtomicUsize::new(0));

        let (status, body) =
            call(gated_app(RoleRequirement::CUSTOMER, hits.clone()), bearer(&token)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            error_message(&body),
            "Only registered Customers are allowed to perform this action"
        );
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_malformed_and_invalid_tokens_require_authentication() {
        let valid = codec().issue(5, Role::Admin).unwrap();
        let foreign = TokenCodec::new(&AuthConfig::new("other-key", TimeDelta::hours(1)))
            .issue(5, Role::Admin)
            .unwrap();
        let expired = codec()
            .issue_at(5, Role::Admin, Utc::now() - TimeDelta::hours(2))
            .unwrap();

        let headers = [
            None,
            Some(valid.clone()),
            Some(format!("Token {valid}")),
            Some(format!("Bearer  {valid}")),
            bearer("not-a-jwt"),
            bearer(&foreign),
            bearer(&expired),
        ];

        for requirement in [RoleRequirement::ADMIN, RoleRequirement::CUSTOMER] {
            for header in headers.iter().cloned() {
                let hits = Arc::new(AtomicUsize::new(0));
                let (status, body) =
                    call(gated_app(requirement, hits.clone()), header.clone()).await;

                assert_eq!(status, StatusCode::UNAUTHORIZED, "{header:?}");
                assert_eq!(error_message(&body), "Authentication required");
                assert_eq!(hits.load(Ordering::SeqCst), 0);
            }
        }
    }
}
