//! RSA key pair generation.

use rsa::rand_core::{CryptoRngCore, OsRng};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};

use crate::algorithm::KeyAlgorithm;
use crate::error::{Error, Result};
use crate::handle::{encode_private, encode_public};
use crate::material::KeyMaterial;

/// Smallest modulus that can ever be requested, whatever the configuration.
pub const MIN_MODULUS_BITS: usize = 512;
/// Default floor for [`GeneratorConfig::min_bits`].
pub const SAFE_MODULUS_BITS: usize = 2048;
/// Largest modulus the RSA primitive accepts when keys are parsed back.
pub const MAX_MODULUS_BITS: usize = 4096;

pub const DEFAULT_PUBLIC_EXPONENT: u32 = 65537;

/// Explicit generator configuration; there is no process-wide provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub algorithm: KeyAlgorithm,
    /// Requests below this size are rejected, never rounded up.
    pub min_bits: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            algorithm: KeyAlgorithm::Rsa,
            min_bits: SAFE_MODULUS_BITS,
        }
    }
}

impl GeneratorConfig {
    /// Moves the floor. Values under [`MIN_MODULUS_BITS`] still cannot be generated.
    pub fn with_min_bits(mut self, min_bits: usize) -> Self {
        self.min_bits = min_bits;
        self
    }

    pub fn with_algorithm(mut self, algorithm: KeyAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyPairGenerator {
    config: GeneratorConfig,
}

impl KeyPairGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        KeyPairGenerator { config }
    }

    /// Generates a key pair with the operating system's entropy source.
    ///
    /// Returns `(public, private)` as SubjectPublicKeyInfo and PKCS#8 DER.
    pub fn generate(&self, bits: usize) -> Result<(KeyMaterial, KeyMaterial)> {
        self.generate_with_rng(&mut OsRng, bits)
    }

    /// Generates a key pair drawing entropy from `rng`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedAlgorithm`] if the configured algorithm is not RSA.
    /// - [`Error::InvalidKeySize`] if `bits` is outside the accepted range.
    pub fn generate_with_rng<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        bits: usize,
    ) -> Result<(KeyMaterial, KeyMaterial)> {
        if self.config.algorithm != KeyAlgorithm::Rsa {
            return Err(Error::UnsupportedAlgorithm(format!(
                "{} key generation is not available",
                self.config.algorithm
            )));
        }
        self.check_size(bits)?;

        let exponent = BigUint::from(DEFAULT_PUBLIC_EXPONENT);
        let private_key = RsaPrivateKey::new_with_exp(rng, bits, &exponent).map_err(|e| {
            Error::InvalidKeySize {
                bits,
                reason: e.to_string(),
            }
        })?;
        let public_key = RsaPublicKey::from(&private_key);

        Ok((encode_public(&public_key)?, encode_private(&private_key)?))
    }

    fn check_size(&self, bits: usize) -> Result<()> {
        let reason = if bits == 0 {
            "modulus size must be positive".to_string()
        } else if bits > MAX_MODULUS_BITS {
            format!("exceeds the maximum of {} bits", MAX_MODULUS_BITS)
        } else if bits < MIN_MODULUS_BITS {
            format!("below the absolute minimum of {} bits", MIN_MODULUS_BITS)
        } else if bits < self.config.min_bits {
            format!("below the configured minimum of {} bits", self.config.min_bits)
        } else {
            return Ok(());
        };
        Err(Error::InvalidKeySize { bits, reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::{PrivateKeyHandle, PublicKeyHandle};
    use keyarmor_codec::decoder::Decoder;
    use keyarmor_pem::Label;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rsa::traits::PrivateKeyParts;
    use rstest::rstest;

    #[test]
    fn test_generate_default_2048() {
        let generator = KeyPairGenerator::default();
        let (public, private) = generator.generate(2048).unwrap();

        assert_eq!(public.label(), Label::RsaPublicKey);
        assert_eq!(private.label(), Label::RsaPrivateKey);

        let public_key: PublicKeyHandle = public.decode().unwrap();
        let private_key: PrivateKeyHandle = private.decode().unwrap();
        assert_eq!(public_key.bits(), 2048);
        assert_eq!(public_key.modulus(), private_key.modulus());
    }

    #[test]
    fn test_generated_exponents_are_inverse() {
        let generator = KeyPairGenerator::new(GeneratorConfig::default().with_min_bits(1024));
        let (_, private) = generator.generate(1024).unwrap();
        let private_key: PrivateKeyHandle = private.decode().unwrap();

        let one = BigUint::from(1u8);
        let de = private_key.private_exponent() * private_key.public_exponent();
        for prime in private_key.as_rsa().primes() {
            assert_eq!(&de % &(prime - &one), one);
        }
    }

    #[test]
    fn test_generate_twice_differs() {
        let generator = KeyPairGenerator::new(GeneratorConfig::default().with_min_bits(1024));
        let (first, _) = generator.generate(1024).unwrap();
        let (second, _) = generator.generate(1024).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_generate_with_seeded_rng() {
        let generator = KeyPairGenerator::new(GeneratorConfig::default().with_min_bits(1024));
        let generate = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            generator.generate_with_rng(&mut rng, 1024).unwrap()
        };

        let (public, private) = generate(42);
        let (same_public, same_private) = generate(42);
        assert_eq!(public, same_public);
        assert_eq!(private, same_private);

        let (other_public, other_private) = generate(43);
        assert_ne!(public, other_public);
        assert_ne!(private, other_private);

        let public_key: PublicKeyHandle = public.decode().unwrap();
        let private_key: PrivateKeyHandle = private.decode().unwrap();
        assert_eq!(private_key.public_key(), public_key);
    }

    #[test]
    fn test_generate_with_rng_checks_size_first() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = KeyPairGenerator::default().generate_with_rng(&mut rng, 1024);
        assert!(matches!(result, Err(Error::InvalidKeySize { bits: 1024, .. })));
    }

    #[rstest]
    #[case::zero(0, SAFE_MODULUS_BITS)]
    #[case::below_absolute_floor(256, 256)]
    #[case::below_default_floor(1024, SAFE_MODULUS_BITS)]
    #[case::below_configured_floor(2048, 3072)]
    #[case::above_ceiling(8192, SAFE_MODULUS_BITS)]
    fn test_generate_invalid_key_size(#[case] bits: usize, #[case] min_bits: usize) {
        let generator = KeyPairGenerator::new(GeneratorConfig::default().with_min_bits(min_bits));
        match generator.generate(bits) {
            Err(Error::InvalidKeySize { bits: got, .. }) => assert_eq!(got, bits),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_generate_unsupported_algorithm() {
        let generator =
            KeyPairGenerator::new(GeneratorConfig::default().with_algorithm(KeyAlgorithm::Ec));
        assert!(matches!(
            generator.generate(2048),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }
}
