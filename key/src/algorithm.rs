use std::str::FromStr;

use crate::error::Error;

pub const OID_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
pub const OID_DSA: &str = "1.2.840.10040.4.1";
pub const OID_EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
pub const OID_ED25519: &str = "1.3.101.112";
pub const OID_ED448: &str = "1.3.101.113";

/// Key algorithm type.
///
/// Only [`KeyAlgorithm::Rsa`] can be generated or decoded; the other
/// variants exist so that foreign keys are reported by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum KeyAlgorithm {
    /// RSA encryption
    Rsa,
    /// DSA
    Dsa,
    /// Elliptic Curve (ECDSA/ECDH)
    Ec,
    /// Ed25519 (EdDSA)
    Ed25519,
    /// Ed448 (EdDSA)
    Ed448,
    /// Unknown or unsupported algorithm
    Unknown,
}

impl KeyAlgorithm {
    #[must_use]
    pub fn from_oid(oid: &str) -> Self {
        match oid {
            OID_RSA_ENCRYPTION => KeyAlgorithm::Rsa,
            OID_DSA => KeyAlgorithm::Dsa,
            OID_EC_PUBLIC_KEY => KeyAlgorithm::Ec,
            OID_ED25519 => KeyAlgorithm::Ed25519,
            OID_ED448 => KeyAlgorithm::Ed448,
            _ => KeyAlgorithm::Unknown,
        }
    }

    /// Returns a human-readable name for this algorithm.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            KeyAlgorithm::Rsa => "RSA",
            KeyAlgorithm::Dsa => "DSA",
            KeyAlgorithm::Ec => "EC",
            KeyAlgorithm::Ed25519 => "Ed25519",
            KeyAlgorithm::Ed448 => "Ed448",
            KeyAlgorithm::Unknown => "Unknown",
        }
    }

    /// Fails with [`Error::UnsupportedAlgorithm`] for anything but RSA.
    pub(crate) fn ensure_rsa(oid: &str) -> Result<(), Error> {
        match KeyAlgorithm::from_oid(oid) {
            KeyAlgorithm::Rsa => Ok(()),
            other => Err(Error::UnsupportedAlgorithm(format!("{} ({})", other, oid))),
        }
    }
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for KeyAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rsa" => Ok(KeyAlgorithm::Rsa),
            "dsa" => Ok(KeyAlgorithm::Dsa),
            "ec" | "ecdsa" => Ok(KeyAlgorithm::Ec),
            "ed25519" => Ok(KeyAlgorithm::Ed25519),
            "ed448" => Ok(KeyAlgorithm::Ed448),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}
