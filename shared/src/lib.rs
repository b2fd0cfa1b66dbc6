// shared/src/lib.rs

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("store: {0}")]
    Store(String),
    #[error("key '{key}' holds a {kind} value")]
    WrongKind { key: String, kind: &'static str },
    #[error("value at '{key}' is not numeric")]
    NotNumeric { key: String },
    #[error("index {index} out of range for list '{key}'")]
    IndexOutOfRange { key: String, index: i64 },
    #[error("{0}")]
    InvalidDelta(&'static str),
    #[error("codec: {0}")]
    Codec(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
