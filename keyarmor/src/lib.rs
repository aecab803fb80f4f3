//! # keyarmor
//!
//! Generate RSA key pairs, armor them as PEM text, load them back and use
//! them for single-block encryption.
//!
//! ```text
//! KeyPairGenerator → KeyMaterial → Pem → text
//! text → Pem → KeyMaterial → PublicKeyHandle / PrivateKeyHandle → RsaCipher
//! ```
//!
//! The crate never touches the filesystem; storing the armored text is the
//! caller's business.
//!
//! ## Example
//!
//! ```no_run
//! let (public_pem, private_pem) = keyarmor::generate_key_pair(2048)?;
//!
//! let public_key = keyarmor::load_public_key(&public_pem)?;
//! let private_key = keyarmor::load_private_key(&private_pem)?;
//!
//! let ciphertext = keyarmor::encrypt(&public_key, "Hola mundo".as_bytes())?;
//! let plaintext = keyarmor::decrypt(&private_key, &ciphertext)?;
//! assert_eq!(plaintext, b"Hola mundo");
//! # Ok::<(), keyarmor::Error>(())
//! ```

pub mod error;

use std::str::FromStr;

use keyarmor_codec::encoder::Encoder;

pub use error::{Error, ErrorKind, Result};
pub use keyarmor_cipher::{Padding, RsaCipher};
pub use keyarmor_key::{
    GeneratorConfig, KeyAlgorithm, KeyMaterial, KeyPairGenerator, PrivateKeyHandle,
    PublicKeyHandle,
};
pub use keyarmor_pem::{FromPem, Label, LineEnding, Pem, ToPem};

/// Bundles the generator and cipher configuration behind the public
/// operations.
///
/// `KeyArmor::default()` generates RSA keys of at least 2048 bits, pads
/// with PKCS#1 v1.5 and writes PEM with LF line endings.
#[derive(Debug, Clone, Default)]
pub struct KeyArmor {
    generator: KeyPairGenerator,
    cipher: RsaCipher,
    line_ending: LineEnding,
}

impl KeyArmor {
    pub fn new(config: GeneratorConfig, padding: Padding) -> Self {
        KeyArmor {
            generator: KeyPairGenerator::new(config),
            cipher: RsaCipher::new(padding),
            line_ending: LineEnding::default(),
        }
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn padding(&self) -> Padding {
        self.cipher.padding()
    }

    /// Generates a key pair and returns `(public, private)` armored text.
    pub fn generate_key_pair(&self, bits: usize) -> Result<(String, String)> {
        let (public, private) = self.generator.generate(bits)?;
        Ok((self.armor(&public)?, self.armor(&private)?))
    }

    /// Armors arbitrary key material with this instance's line ending.
    pub fn armor(&self, material: &KeyMaterial) -> Result<String> {
        let pem: Pem = material.encode()?;
        Ok(pem.encode(self.line_ending))
    }

    pub fn load_public_key(&self, armored: &str) -> Result<PublicKeyHandle> {
        let pem = Pem::from_str(armored)?;
        Ok(PublicKeyHandle::from_pem(&pem)?)
    }

    pub fn load_private_key(&self, armored: &str) -> Result<PrivateKeyHandle> {
        let pem = Pem::from_str(armored)?;
        Ok(PrivateKeyHandle::from_pem(&pem)?)
    }

    pub fn encrypt(&self, key: &PublicKeyHandle, plaintext: &[u8]) -> Result<Vec<u8>> {
        Ok(self.cipher.encrypt(key, plaintext)?)
    }

    pub fn decrypt(&self, key: &PrivateKeyHandle, ciphertext: &[u8]) -> Result<Vec<u8>> {
        Ok(self.cipher.decrypt(key, ciphertext)?)
    }

    pub fn max_message_len(&self, key: &PublicKeyHandle) -> usize {
        self.cipher.max_message_len(key)
    }
}

/// [`KeyArmor::generate_key_pair`] with the default configuration.
pub fn generate_key_pair(bits: usize) -> Result<(String, String)> {
    KeyArmor::default().generate_key_pair(bits)
}

pub fn load_public_key(armored: &str) -> Result<PublicKeyHandle> {
    KeyArmor::default().load_public_key(armored)
}

pub fn load_private_key(armored: &str) -> Result<PrivateKeyHandle> {
    KeyArmor::default().load_private_key(armored)
}

/// Encrypts with PKCS#1 v1.5 padding.
pub fn encrypt(key: &PublicKeyHandle, plaintext: &[u8]) -> Result<Vec<u8>> {
    KeyArmor::default().encrypt(key, plaintext)
}

/// Decrypts with PKCS#1 v1.5 padding.
pub fn decrypt(key: &PrivateKeyHandle, ciphertext: &[u8]) -> Result<Vec<u8>> {
    KeyArmor::default().decrypt(key, ciphertext)
}
