use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("message too long: {length} bytes, at most {max} bytes fit this key")]
    MessageTooLong { length: usize, max: usize },

    /// The padding could not be applied or removed. Carries no detail about
    /// where a decryption check failed.
    #[error("padding error")]
    Padding,
}
