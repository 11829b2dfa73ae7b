//! Login response body.

use serde::{Deserialize, Serialize};

use super::CONNECTION_TOKEN_TYPE;

/// Successful login response.
///
/// # JSON Format
///
/// ```json
/// {
///   "user_id": 21,
///   "token_type": "Bearer",
///   "expires_in": 86400,
///   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// }
/// ```
#[derive(Debug, Deserialize, Serialize)]
pub struct AuthBody {
    pub user_id: i64,
    /// Always "Bearer".
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub access_token: String,
}

impl AuthBody {
    pub fn new(user_id: i64, access_token: String, expires_in: i64) -> Self {
        Self {
            user_id,
            token_type: String::from(CONNECTION_TOKEN_TYPE),
            expires_in,
            access_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_bearer_login_body() {
        let body = AuthBody::new(21, String::from("abc.def.ghi"), 86400);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "user_id": 21,
                "token_type": "Bearer",
                "expires_in": 86400,
                "access_token": "abc.def.ghi",
            })
        );
    }
}
