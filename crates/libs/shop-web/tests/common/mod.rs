use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    middleware,
    routing,
};
use chrono::TimeDelta;
use http_body_util::BodyExt;
use serde_json::Value;
use shop_auth::{config::AuthConfig, jwt::TokenCodec, role::RoleRequirement};
use shop_models::user::memory::MemoryAccountStore;
use shop_web::{ctx::Ctx, ctx::resolver::mw_ctx_resolver, require_role, state::ApiState};
use tower::ServiceExt;

pub const SECRET: &str = "integration-secret";

pub struct TestContext {
    pub state: ApiState,
    pub store: Arc<MemoryAccountStore>,
}

impl TestContext {
    pub fn new(ttl: TimeDelta) -> Self {
        let store = Arc::new(MemoryAccountStore::new());
        let codec = TokenCodec::new(&AuthConfig::new(SECRET, ttl));
        Self {
            state: ApiState::new(store.clone(), codec),
            store,
        }
    }

    /// One admin route and one customer route answering with the caller id.
    pub fn router(&self) -> Router {
        let whoami = |ctx: Ctx| async move { ctx.user_id.to_string() };
        let admin = Router::new()
            .route("/admin", routing::get(whoami))
            .route_layer(require_role!(RoleRequirement::ADMIN));
        let customer = Router::new()
            .route("/customer", routing::get(whoami))
            .route_layer(require_role!(RoleRequirement::CUSTOMER));

        Router::new()
            .merge(admin)
            .merge(customer)
            .layer(middleware::from_fn_with_state(
                self.state.codec.clone(),
                mw_ctx_resolver,
            ))
    }
}

pub async fn get(app: Router, uri: &str, token: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub fn error_of(body: &str) -> String {
    let value: Value = serde_json::from_str(body).unwrap();
    value["error"].as_str().unwrap_or_default().to_string()
}
