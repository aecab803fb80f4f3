use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed PEM: {0}")]
    Pem(#[from] keyarmor_pem::Error),

    #[error(transparent)]
    Key(#[from] keyarmor_key::Error),

    #[error(transparent)]
    Cipher(#[from] keyarmor_cipher::Error),
}

/// The failure categories a caller can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidKeySize,
    UnsupportedAlgorithm,
    MalformedPem,
    InvalidKeyEncoding,
    MessageTooLong,
    PaddingError,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use keyarmor_cipher::Error as CipherError;
        use keyarmor_key::Error as KeyError;

        match self {
            Error::Pem(_) => ErrorKind::MalformedPem,
            Error::Key(KeyError::InvalidKeySize { .. }) => ErrorKind::InvalidKeySize,
            Error::Key(KeyError::UnsupportedAlgorithm(_)) => ErrorKind::UnsupportedAlgorithm,
            Error::Key(KeyError::InvalidKeyEncoding(_)) => ErrorKind::InvalidKeyEncoding,
            Error::Key(KeyError::Pem(_)) => ErrorKind::MalformedPem,
            Error::Cipher(CipherError::MessageTooLong { .. }) => ErrorKind::MessageTooLong,
            Error::Cipher(CipherError::Padding) => ErrorKind::PaddingError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(keyarmor_pem::Error::MissingData.into(), ErrorKind::MalformedPem)]
    #[case(
        keyarmor_key::Error::from(keyarmor_pem::Error::LabelMissMatch).into(),
        ErrorKind::MalformedPem
    )]
    #[case(
        keyarmor_key::Error::InvalidKeySize { bits: 0, reason: String::new() }.into(),
        ErrorKind::InvalidKeySize
    )]
    #[case(
        keyarmor_key::Error::UnsupportedAlgorithm("EC".to_string()).into(),
        ErrorKind::UnsupportedAlgorithm
    )]
    #[case(
        keyarmor_key::Error::InvalidKeyEncoding(String::new()).into(),
        ErrorKind::InvalidKeyEncoding
    )]
    #[case(
        keyarmor_cipher::Error::MessageTooLong { length: 246, max: 245 }.into(),
        ErrorKind::MessageTooLong
    )]
    #[case(keyarmor_cipher::Error::Padding.into(), ErrorKind::PaddingError)]
    fn test_error_kind(#[case] error: Error, #[case] expected: ErrorKind) {
        assert_eq!(error.kind(), expected);
    }
}
