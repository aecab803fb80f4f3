use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid key size {bits}: {reason}")]
    InvalidKeySize { bits: usize, reason: String },

    #[error("unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    #[error(transparent)]
    Pem(#[from] keyarmor_pem::Error),
}
