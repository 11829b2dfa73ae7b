//! Main Crate Error

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::{debug, error};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Models(#[from] shop_models::error::Error),

    #[error(transparent)]
    Auth(#[from] shop_auth::error::Error),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Wrong Credentials")]
    WrongCredentials,

    #[error("User does not exist")]
    UserDoesNotExist,

    /* Valid token, role not allowed on this route */
    #[error("Forbidden: {0}")]
    Forbidden(&'static str),

    #[error("Context Missing")]
    CtxMissing,
}

const INTERNAL: (StatusCode, &str) = (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");

impl Error {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    fn status_and_message(&self) -> (StatusCode, &str) {
        match self {
            Error::BadRequest(message) => (StatusCode::BAD_REQUEST, message.as_str()),
            Error::WrongCredentials => (StatusCode::BAD_REQUEST, "password is incorrect"),
            Error::UserDoesNotExist => (StatusCode::BAD_REQUEST, "user does not exist"),
            Error::CtxMissing => (StatusCode::UNAUTHORIZED, "Authentication required"),
            Error::Forbidden(message) => (StatusCode::UNAUTHORIZED, *message),
            Error::Auth(err) => match err {
                shop_auth::error::Error::InvalidToken => {
                    (StatusCode::UNAUTHORIZED, "Authentication required")
                }
                shop_auth::error::Error::TokenCreation(_)
                | shop_auth::error::Error::TokenTtlOutOfRange
                | shop_auth::error::Error::PasswordHash(_)
                | shop_auth::error::Error::MissingConfig(_)
                | shop_auth::error::Error::InvalidConfig(..) => INTERNAL,
            },
            Error::Models(err) => match err {
                shop_models::error::Error::NotFound => (StatusCode::NOT_FOUND, "user not found"),
                shop_models::error::Error::EmailTaken => {
                    (StatusCode::BAD_REQUEST, "email address already registered")
                }
                shop_models::error::Error::R2D2(_)
                | shop_models::error::Error::Diesel(_)
                | shop_models::error::Error::Migration(_)
                | shop_models::error::Error::MissingConfig(_) => INTERNAL,
            },
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("Creating API error response for error: {:?}", self);
        } else {
            debug!("Rejecting request: {self}");
        }

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
