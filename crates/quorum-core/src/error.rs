//! Error types for Quorum core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Voter list cannot be empty")]
    EmptyInput,

    #[error("Invalid Stellar address: {0}")]
    InvalidAddress(String),

    #[error("Invalid root length: {0}, expected 64")]
    InvalidRootLength(usize),

    #[error("Leaf index {index} out of range (tree has {leaf_count} leaves)")]
    LeafIndexOutOfRange { index: usize, leaf_count: usize },

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Count must be between 1 and {max}, got {count}")]
    InvalidSaltCount { count: usize, max: usize },

    #[error("Invalid governance config:\n{0}")]
    InvalidConfig(String),
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Error::InvalidHex(e.to_string())
    }
}
