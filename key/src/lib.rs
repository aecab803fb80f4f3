//! # keyarmor-key
//!
//! RSA key material for keyarmor: generation of key pairs as DER
//! [`KeyMaterial`], and reconstruction of typed key handles from DER.
//!
//! - Public keys travel as X.509 SubjectPublicKeyInfo under the
//!   `RSA PUBLIC KEY` label.
//! - Private keys travel as PKCS#8 PrivateKeyInfo under the
//!   `RSA PRIVATE KEY` label.
//!
//! ```no_run
//! use keyarmor_codec::decoder::Decoder;
//! use keyarmor_key::{GeneratorConfig, KeyPairGenerator, PublicKeyHandle};
//!
//! let generator = KeyPairGenerator::new(GeneratorConfig::default());
//! let (public, _private) = generator.generate(2048).unwrap();
//! let key: PublicKeyHandle = public.decode().unwrap();
//! assert_eq!(key.bits(), 2048);
//! ```

pub mod algorithm;
pub mod codec;
pub mod error;
pub mod generator;
pub mod handle;
pub mod material;

pub use algorithm::KeyAlgorithm;
pub use codec::{parse_private, parse_public};
pub use error::{Error, Result};
pub use generator::{GeneratorConfig, KeyPairGenerator};
pub use handle::{PrivateKeyHandle, PublicKeyHandle};
pub use material::KeyMaterial;
