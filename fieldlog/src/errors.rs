//! Error types for dispatch configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("log dispatch already initialized")]
    AlreadyInitialized(),
}

pub type Result<T> = std::result::Result<T, Error>;
