//! Shared handler state.

use std::sync::Arc;

use shop_auth::jwt::TokenCodec;
use shop_models::user::store::AccountStore;

/// State cloned into every request.
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<dyn AccountStore>,
    pub codec: TokenCodec,
}

impl ApiState {
    pub fn new(store: Arc<dyn AccountStore>, codec: TokenCodec) -> Self {
        Self { store, codec }
    }
}
