//! Typed RSA key handles produced by [`crate::codec`].
//!
//! [`PublicKeyHandle`] and [`PrivateKeyHandle`] wrap the parsed key
//! parameters. They can be converted back to DER [`KeyMaterial`] and to PEM,
//! and they are what the cipher layer consumes.

use keyarmor_codec::decoder::Decoder;
use keyarmor_pem::{FromPem, Label, Pem, ToPem};
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey};
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};

use crate::error::{Error, Result};
use crate::material::KeyMaterial;

/// An RSA public key: modulus and public exponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyHandle(RsaPublicKey);

impl PublicKeyHandle {
    pub(crate) fn new(key: RsaPublicKey) -> Self {
        PublicKeyHandle(key)
    }

    pub fn modulus(&self) -> &BigUint {
        self.0.n()
    }

    pub fn public_exponent(&self) -> &BigUint {
        self.0.e()
    }

    /// Modulus length in bits.
    pub fn bits(&self) -> usize {
        self.0.n().bits()
    }

    /// Modulus length in bytes, which is also the ciphertext length.
    pub fn size(&self) -> usize {
        self.0.size()
    }

    pub fn as_rsa(&self) -> &RsaPublicKey {
        &self.0
    }

    /// Re-encodes the key as X.509 SubjectPublicKeyInfo.
    pub fn to_material(&self) -> Result<KeyMaterial> {
        encode_public(&self.0)
    }
}

/// An RSA private key, including the CRT parameters when available.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKeyHandle(RsaPrivateKey);

impl PrivateKeyHandle {
    pub(crate) fn new(key: RsaPrivateKey) -> Self {
        PrivateKeyHandle(key)
    }

    pub fn modulus(&self) -> &BigUint {
        self.0.n()
    }

    pub fn public_exponent(&self) -> &BigUint {
        self.0.e()
    }

    pub fn private_exponent(&self) -> &BigUint {
        self.0.d()
    }

    pub fn bits(&self) -> usize {
        self.0.n().bits()
    }

    pub fn size(&self) -> usize {
        self.0.size()
    }

    /// Whether the precomputed CRT values are present for fast decryption.
    pub fn has_crt(&self) -> bool {
        self.0.dp().is_some() && self.0.dq().is_some()
    }

    /// Derives the matching public half.
    pub fn public_key(&self) -> PublicKeyHandle {
        PublicKeyHandle(self.0.to_public_key())
    }

    pub fn as_rsa(&self) -> &RsaPrivateKey {
        &self.0
    }

    /// Re-encodes the key as PKCS#8 PrivateKeyInfo.
    pub fn to_material(&self) -> Result<KeyMaterial> {
        encode_private(&self.0)
    }
}

impl std::fmt::Debug for PrivateKeyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKeyHandle")
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}

pub(crate) fn encode_public(key: &RsaPublicKey) -> Result<KeyMaterial> {
    let der = key
        .to_public_key_der()
        .map_err(|e| Error::InvalidKeyEncoding(format!("SubjectPublicKeyInfo: {}", e)))?;
    Ok(KeyMaterial::new(Label::RsaPublicKey, der.as_bytes().to_vec()))
}

pub(crate) fn encode_private(key: &RsaPrivateKey) -> Result<KeyMaterial> {
    let der = key
        .to_pkcs8_der()
        .map_err(|e| Error::InvalidKeyEncoding(format!("PrivateKeyInfo: {}", e)))?;
    Ok(KeyMaterial::new(Label::RsaPrivateKey, der.as_bytes().to_vec()))
}

impl ToPem for PublicKeyHandle {
    type Error = Error;

    fn pem_label(&self) -> Label {
        Label::RsaPublicKey
    }

    fn to_pem(&self) -> Result<Pem> {
        self.to_material()?.to_pem()
    }
}

impl FromPem for PublicKeyHandle {
    type Error = Error;

    fn expected_label() -> Label {
        Label::RsaPublicKey
    }

    fn from_pem(pem: &Pem) -> Result<Self> {
        pem.expect_label(Self::expected_label())?;
        let material: KeyMaterial = pem.decode()?;
        material.decode()
    }
}

impl ToPem for PrivateKeyHandle {
    type Error = Error;

    fn pem_label(&self) -> Label {
        Label::RsaPrivateKey
    }

    fn to_pem(&self) -> Result<Pem> {
        self.to_material()?.to_pem()
    }
}

impl FromPem for PrivateKeyHandle {
    type Error = Error;

    fn expected_label() -> Label {
        Label::RsaPrivateKey
    }

    fn from_pem(pem: &Pem) -> Result<Self> {
        pem.expect_label(Self::expected_label())?;
        let material: KeyMaterial = pem.decode()?;
        material.decode()
    }
}
