//! Reconstructs typed RSA keys from DER.
//!
//! Public keys must be X.509 SubjectPublicKeyInfo and private keys PKCS#8
//! PrivateKeyInfo. The algorithm identifier is inspected before the key body,
//! so a well-formed key of another algorithm is reported as unsupported
//! rather than as a broken encoding.

use keyarmor_codec::decoder::{DecodableFrom, Decoder};
use keyarmor_pem::Label;
use rsa::pkcs8::der::Decode;
use rsa::pkcs8::{PrivateKeyInfo, SubjectPublicKeyInfoRef};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::algorithm::KeyAlgorithm;
use crate::error::{Error, Result};
use crate::handle::{PrivateKeyHandle, PublicKeyHandle};
use crate::material::KeyMaterial;

/// Parses DER-encoded SubjectPublicKeyInfo into a [`PublicKeyHandle`].
///
/// # Errors
///
/// - [`Error::InvalidKeyEncoding`] if the bytes are not a SubjectPublicKeyInfo
///   or the RSA key inside it is malformed.
/// - [`Error::UnsupportedAlgorithm`] if the structure names another algorithm.
pub fn parse_public(der: &[u8]) -> Result<PublicKeyHandle> {
    let spki = SubjectPublicKeyInfoRef::from_der(der)
        .map_err(|e| Error::InvalidKeyEncoding(format!("SubjectPublicKeyInfo: {}", e)))?;
    KeyAlgorithm::ensure_rsa(&spki.algorithm.oid.to_string())?;

    let key = RsaPublicKey::try_from(spki)
        .map_err(|e| Error::InvalidKeyEncoding(format!("RSA public key: {}", e)))?;
    Ok(PublicKeyHandle::new(key))
}

/// Parses DER-encoded PKCS#8 PrivateKeyInfo into a [`PrivateKeyHandle`].
///
/// The key is validated after parsing, so an inconsistent set of parameters
/// is rejected here instead of producing garbage at decryption time.
///
/// # Errors
///
/// Same as [`parse_public`].
pub fn parse_private(der: &[u8]) -> Result<PrivateKeyHandle> {
    let info = PrivateKeyInfo::from_der(der)
        .map_err(|e| Error::InvalidKeyEncoding(format!("PrivateKeyInfo: {}", e)))?;
    KeyAlgorithm::ensure_rsa(&info.algorithm.oid.to_string())?;

    let key = RsaPrivateKey::try_from(info)
        .map_err(|e| Error::InvalidKeyEncoding(format!("RSA private key: {}", e)))?;
    key.validate()
        .map_err(|e| Error::InvalidKeyEncoding(format!("RSA private key: {}", e)))?;
    Ok(PrivateKeyHandle::new(key))
}

fn ensure_label(material: &KeyMaterial, expected: Label) -> Result<()> {
    if material.label() != expected {
        return Err(keyarmor_pem::Error::UnexpectedLabel {
            expected: expected.to_string(),
            actual: material.label().to_string(),
        }
        .into());
    }
    Ok(())
}

impl DecodableFrom<KeyMaterial> for PublicKeyHandle {}

impl Decoder<KeyMaterial, PublicKeyHandle> for KeyMaterial {
    type Error = Error;

    fn decode(&self) -> Result<PublicKeyHandle> {
        ensure_label(self, Label::RsaPublicKey)?;
        parse_public(self.as_bytes())
    }
}

impl DecodableFrom<KeyMaterial> for PrivateKeyHandle {}

impl Decoder<KeyMaterial, PrivateKeyHandle> for KeyMaterial {
    type Error = Error;

    fn decode(&self) -> Result<PrivateKeyHandle> {
        ensure_label(self, Label::RsaPrivateKey)?;
        parse_private(self.as_bytes())
    }
}
