use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    middleware,
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};
use shop_auth::{auth_body::AuthBody, role::RoleRequirement};
use shop_web::{
    ctx::{Ctx, resolver::mw_ctx_resolver},
    error::Error as WebError,
    prelude::Result as WebResult,
    require_role,
    state::ApiState,
    user::{
        LoginRequest, PasswordChange, ProfileUpdate, RegisterRequest, UserView, change_password,
        delete_user, edit_profile, fetch_user, is_public, list_users, login_user, parse_user_id,
        promote_to_admin, register_user,
    },
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::info;

const INVALID_JSON: &str = "invalid json body";

/// Builds the application router.
///
/// Every route passes through the context resolver; customer and admin
/// groups are gated by [`RoleRequirement`].
pub fn router(state: ApiState) -> Router {
    let customer_routes = Router::new()
        .route("/api/GetProfile", get(get_profile))
        .route("/api/EditProfile", put(put_profile).patch(patch_profile))
        .route("/api/ChangePassword", put(put_password))
        .route_layer(require_role!(RoleRequirement::CUSTOMER));

    let admin_routes = Router::new()
        .route("/api/admin/GetUsers", get(get_users))
        .route("/api/admin/GetUser/{user_id}", get(get_user))
        .route("/api/admin/DeleteUser/{user_id}", delete(remove_user))
        .route("/api/admin/EditRole/{user_id}", put(edit_role))
        .route_layer(require_role!(RoleRequirement::ADMIN));

    let public_routes = Router::new()
        .route("/Register", post(register))
        .route("/Login", post(login));

    Router::new()
        .merge(public_routes)
        .merge(customer_routes)
        .merge(admin_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(
            state.codec.clone(),
            mw_ctx_resolver,
        ))
        .with_state(state)
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> WebResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|_| WebError::bad_request(INVALID_JSON))
}

async fn register(
    State(state): State<ApiState>,
    headers: HeaderMap,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> WebResult<(StatusCode, Json<UserView>)> {
    let user = register_user(state.store.as_ref(), json_body(payload)?)?;
    Ok((
        StatusCode::CREATED,
        Json(UserView::new(user, is_public(&headers))),
    ))
}

async fn login(
    State(state): State<ApiState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> WebResult<Json<AuthBody>> {
    let Json(payload) = payload.map_err(|rejection| WebError::bad_request(rejection.body_text()))?;
    Ok(Json(login_user(
        state.store.as_ref(),
        &state.codec,
        &payload,
    )?))
}

async fn get_profile(
    State(state): State<ApiState>,
    ctx: Ctx,
    headers: HeaderMap,
) -> WebResult<Json<UserView>> {
    let user = fetch_user(state.store.as_ref(), ctx.user_id)?;
    Ok(Json(UserView::new(user, is_public(&headers))))
}

async fn put_profile(
    State(state): State<ApiState>,
    ctx: Ctx,
    headers: HeaderMap,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> WebResult<Json<UserView>> {
    let user = edit_profile(
        state.store.as_ref(),
        ctx.user_id,
        json_body(payload)?,
        false,
    )?;
    Ok(Json(UserView::new(user, is_public(&headers))))
}

async fn patch_profile(
    State(state): State<ApiState>,
    ctx: Ctx,
    headers: HeaderMap,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> WebResult<Json<UserView>> {
    let user = edit_profile(
        state.store.as_ref(),
        ctx.user_id,
        json_body(payload)?,
        true,
    )?;
    Ok(Json(UserView::new(user, is_public(&headers))))
}

async fn put_password(
    State(state): State<ApiState>,
    ctx: Ctx,
    payload: Result<Json<PasswordChange>, JsonRejection>,
) -> WebResult<Json<Value>> {
    change_password(state.store.as_ref(), ctx.user_id, json_body(payload)?)?;
    Ok(Json(json!({ "message": "password changed successfully" })))
}

async fn get_users(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> WebResult<Json<Vec<UserView>>> {
    let public = is_public(&headers);
    let users: Vec<UserView> = list_users(state.store.as_ref())?
        .into_iter()
        .map(|user| UserView::new(user, public))
        .collect();
    Ok(Json(users))
}

async fn get_user(
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> WebResult<Json<UserView>> {
    let user = fetch_user(state.store.as_ref(), parse_user_id(&user_id)?)?;
    Ok(Json(UserView::new(user, is_public(&headers))))
}

async fn remove_user(
    State(state): State<ApiState>,
    ctx: Ctx,
    Path(user_id): Path<String>,
) -> WebResult<Json<Value>> {
    let user_id = parse_user_id(&user_id)?;
    delete_user(state.store.as_ref(), user_id)?;
    info!("Admin {} deleted account {user_id}", ctx.user_id);
    Ok(Json(json!({ "status": "deleted" })))
}

async fn edit_role(
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
) -> WebResult<Json<Value>> {
    promote_to_admin(state.store.as_ref(), parse_user_id(&user_id)?)?;
    Ok(Json(json!({ "message": "Role edited to Admin successfully" })))
}
