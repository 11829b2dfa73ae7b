//! Account operations called by the HTTP handlers.

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use shop_auth::{
    auth_body::AuthBody,
    jwt::TokenCodec,
    role::{Role, RoleRequirement},
    secret_hash::{HASH_VERSION, generate_secret_hash, is_stored_secret_valid},
};
use shop_models::user::{DEFAULT_ROLE, User, UserCreate, store::AccountStore};
use tracing::{info, warn};

use crate::prelude::*;
use crate::validation::{normalize_email, validate_password_change, validate_registration};

/// Header selecting the public view of a user.
pub const PUBLIC_VIEW_HEADER: &str = "x-public";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Profile fields a customer may edit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordChange {
    pub password: String,
    pub confirm_password: String,
}

/// Serialized form of a [`User`].
///
/// The private view is returned unless the request carries `X-Public: true`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UserView {
    Public {
        id: i64,
        role: String,
        date_created: String,
    },
    Private {
        id: i64,
        first_name: String,
        last_name: String,
        email: String,
        role: String,
        date_created: String,
        image_url: Option<String>,
    },
}

impl UserView {
    pub fn new(user: User, public: bool) -> Self {
        let date_created = user.created_at.format(DATE_FORMAT).to_string();
        if public {
            Self::Public {
                id: user.id,
                role: user.role,
                date_created,
            }
        } else {
            Self::Private {
                id: user.id,
                first_name: user.first_name,
                last_name: user.last_name,
                email: user.email,
                role: user.role,
                date_created,
                image_url: user.image_url,
            }
        }
    }
}

pub fn is_public(headers: &HeaderMap) -> bool {
    headers
        .get(PUBLIC_VIEW_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == "true")
}

/// Parses a `user_id` path segment.
pub fn parse_user_id(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| Error::bad_request("user id should be a number"))
}

/// Validates the payload and stores a new account with the default role.
///
/// # Examples
///
/// ```rust
/// use shop_models::user::memory::MemoryAccountStore;
/// use shop_web::user::{RegisterRequest, register_user};
///
/// let store = MemoryAccountStore::new();
/// let user = register_user(
///     &store,
///     RegisterRequest {
///         first_name: "Ada".to_string(),
///         last_name: "Lovelace".to_string(),
///         email: "Ada@Example.com".to_string(),
///         password: "Abcdef1!".to_string(),
///         confirm_password: "Abcdef1!".to_string(),
///     },
/// )
/// .unwrap();
/// assert_eq!(user.email, "ada@example.com");
/// assert_eq!(user.role, "user");
/// ```
pub fn register_user(store: &dyn AccountStore, mut payload: RegisterRequest) -> Result<User> {
    validate_registration(&mut payload)?;

    let password = generate_secret_hash(&payload.password)?;
    let user = store.create(UserCreate {
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        role: String::from(DEFAULT_ROLE),
        password,
        hash_version: HASH_VERSION,
        image_url: None,
    })?;
    info!("Registered account {}", user.id);
    Ok(user)
}

/// Checks the credentials and issues an identity token.
///
/// Unknown emails and wrong passwords are indistinguishable to the caller.
pub fn login_user(
    store: &dyn AccountStore,
    codec: &TokenCodec,
    payload: &LoginRequest,
) -> Result<AuthBody> {
    let email = normalize_email(&payload.email);
    let user = match store.fetch_by_email(&email) {
        Ok(user) => user,
        Err(shop_models::error::Error::NotFound) => return Err(Error::WrongCredentials),
        Err(err) => return Err(err.into()),
    };

    if !is_stored_secret_valid(payload.password.trim(), &user.password, user.hash_version) {
        return Err(Error::WrongCredentials);
    }

    let role: Role = user.role.parse().map_err(|err| {
        warn!("Account {} has an unusable role: {err}", user.id);
        Error::Forbidden(RoleRequirement::CUSTOMER.denial_message())
    })?;

    let token = codec.issue(user.id, role)?;
    Ok(AuthBody::new(user.id, token, codec.ttl_seconds()))
}

pub fn fetch_user(store: &dyn AccountStore, user_id: i64) -> Result<User> {
    Ok(store.fetch_by_id(user_id)?)
}

pub fn list_users(store: &dyn AccountStore) -> Result<Vec<User>> {
    Ok(store.fetch_all()?)
}

/// Updates the caller's names.
///
/// A full update overwrites both names. A partial update keeps the stored
/// value for every field left empty.
pub fn edit_profile(
    store: &dyn AccountStore,
    user_id: i64,
    update: ProfileUpdate,
    partial: bool,
) -> Result<User> {
    let first_name = update.first_name.trim();
    let last_name = update.last_name.trim();

    if !partial {
        return Ok(store.update_profile(user_id, first_name, last_name)?);
    }

    let current = store.fetch_by_id(user_id)?;
    let first_name = if first_name.is_empty() {
        current.first_name.as_str()
    } else {
        first_name
    };
    let last_name = if last_name.is_empty() {
        current.last_name.as_str()
    } else {
        last_name
    };
    Ok(store.update_profile(user_id, first_name, last_name)?)
}

pub fn change_password(
    store: &dyn AccountStore,
    user_id: i64,
    mut payload: PasswordChange,
) -> Result<()> {
    validate_password_change(&mut payload)?;

    let digest = generate_secret_hash(&payload.password)?;
    store.update_password(user_id, &digest, HASH_VERSION)?;
    info!("Account {user_id} changed its password");
    Ok(())
}

pub fn promote_to_admin(store: &dyn AccountStore, user_id: i64) -> Result<()> {
    store.update_role(user_id, Role::Admin.as_str())?;
    info!("Account {user_id} promoted to admin");
    Ok(())
}

/// Deletes an account that must exist.
pub fn delete_user(store: &dyn AccountStore, user_id: i64) -> Result<()> {
    let map_missing = |err: shop_models::error::Error| match err {
        shop_models::error::Error::NotFound => Error::UserDoesNotExist,
        other => Error::Models(other),
    };

    store.fetch_by_id(user_id).map_err(map_missing)?;
    store.delete(user_id).map_err(map_missing)?;
    info!("Deleted account {user_id}");
    Ok(())
}
