//! Errors that stop the shop daemon from starting or serving.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Auth(#[from] shop_auth::error::Error),

    #[error(transparent)]
    Model(#[from] shop_models::error::Error),

    #[error("Invalid value for {0}: {1}")]
    InvalidAddr(&'static str, std::net::AddrParseError),
}
