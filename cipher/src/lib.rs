//! # keyarmor-cipher
//!
//! Single-block RSA encryption with a padding scheme fixed per
//! [`RsaCipher`] instance.
//!
//! PKCS#1 v1.5 is the default. It offers no integrity protection and is
//! exposed to padding oracles when decryption failures are observable, so
//! [`Padding::OaepSha256`] is provided for callers who do not need
//! compatibility with v1.5 ciphertexts.

pub mod error;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use keyarmor_key::{PrivateKeyHandle, PublicKeyHandle};
use rsa::rand_core::{CryptoRngCore, OsRng};
use rsa::{Oaep, Pkcs1v15Encrypt};
use sha2::Sha256;

pub use error::{Error, Result};

const PKCS1V15_OVERHEAD: usize = 11;
// 2 * SHA-256 output length + 2
const OAEP_SHA256_OVERHEAD: usize = 66;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Padding {
    /// RSAES-PKCS1-v1_5
    #[default]
    Pkcs1v15,
    /// RSAES-OAEP with SHA-256 for both the label hash and MGF1
    OaepSha256,
}

impl Padding {
    /// Bytes of the modulus consumed by the padding itself.
    pub fn overhead(&self) -> usize {
        match self {
            Padding::Pkcs1v15 => PKCS1V15_OVERHEAD,
            Padding::OaepSha256 => OAEP_SHA256_OVERHEAD,
        }
    }
}

impl Display for Padding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Padding::Pkcs1v15 => write!(f, "pkcs1v15"),
            Padding::OaepSha256 => write!(f, "oaep-sha256"),
        }
    }
}

impl FromStr for Padding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pkcs1v15" => Ok(Padding::Pkcs1v15),
            "oaep-sha256" => Ok(Padding::OaepSha256),
            _ => Err(format!("unknown padding scheme: {}", s)),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RsaCipher {
    padding: Padding,
}

impl RsaCipher {
    pub fn new(padding: Padding) -> Self {
        RsaCipher { padding }
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Longest plaintext that fits a single block under `key`.
    pub fn max_message_len(&self, key: &PublicKeyHandle) -> usize {
        key.size().saturating_sub(self.padding.overhead())
    }

    /// Encrypts `plaintext` with the operating system's entropy source.
    ///
    /// The ciphertext is always exactly `key.size()` bytes long.
    pub fn encrypt(&self, key: &PublicKeyHandle, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_with_rng(&mut OsRng, key, plaintext)
    }

    /// # Errors
    ///
    /// [`Error::MessageTooLong`] if `plaintext` exceeds [`Self::max_message_len`].
    pub fn encrypt_with_rng<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        key: &PublicKeyHandle,
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        let max = self.max_message_len(key);
        let too_long = Error::MessageTooLong {
            length: plaintext.len(),
            max,
        };
        if plaintext.len() > max {
            return Err(too_long);
        }

        let key = key.as_rsa();
        let encrypted = match self.padding {
            Padding::Pkcs1v15 => key.encrypt(rng, Pkcs1v15Encrypt, plaintext),
            Padding::OaepSha256 => key.encrypt(rng, Oaep::new::<Sha256>(), plaintext),
        };
        encrypted.map_err(|e| match e {
            rsa::Error::MessageTooLong => too_long,
            _ => Error::Padding,
        })
    }

    /// Decrypts a single block. Blinding is applied to the private-key
    /// operation.
    ///
    /// # Errors
    ///
    /// [`Error::Padding`] for any failure, including ciphertexts produced
    /// under a different public key or not exactly `key.size()` bytes long.
    pub fn decrypt(&self, key: &PrivateKeyHandle, ciphertext: &[u8]) -> Result<Vec<u8>> {
        // leading zero bytes would otherwise vanish in the integer conversion
        if ciphertext.len() != key.size() {
            return Err(Error::Padding);
        }
        let key = key.as_rsa();
        let mut rng = OsRng;
        let decrypted = match self.padding {
            Padding::Pkcs1v15 => key.decrypt_blinded(&mut rng, Pkcs1v15Encrypt, ciphertext),
            Padding::OaepSha256 => {
                key.decrypt_blinded(&mut rng, Oaep::new::<Sha256>(), ciphertext)
            }
        };
        decrypted.map_err(|_| Error::Padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyarmor_codec::decoder::Decoder;
    use keyarmor_key::{GeneratorConfig, KeyPairGenerator};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;
    use std::sync::OnceLock;

    type KeyPair = (PublicKeyHandle, PrivateKeyHandle);

    fn generate(bits: usize) -> KeyPair {
        let generator = KeyPairGenerator::new(GeneratorConfig::default());
        let (public, private) = generator.generate(bits).unwrap();
        (public.decode().unwrap(), private.decode().unwrap())
    }

    fn key_pair() -> &'static KeyPair {
        static PAIR: OnceLock<KeyPair> = OnceLock::new();
        PAIR.get_or_init(|| generate(2048))
    }

    fn other_key_pair() -> &'static KeyPair {
        static PAIR: OnceLock<KeyPair> = OnceLock::new();
        PAIR.get_or_init(|| generate(2048))
    }

    #[rstest]
    #[case::empty(Padding::Pkcs1v15, 0)]
    #[case::short(Padding::Pkcs1v15, 10)]
    #[case::max(Padding::Pkcs1v15, 245)]
    #[case::oaep_empty(Padding::OaepSha256, 0)]
    #[case::oaep_max(Padding::OaepSha256, 190)]
    fn test_roundtrip(#[case] padding: Padding, #[case] len: usize) {
        let (public, private) = key_pair();
        let cipher = RsaCipher::new(padding);
        let plaintext: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();

        let ciphertext = cipher.encrypt(public, &plaintext).unwrap();
        assert_eq!(ciphertext.len(), public.size());

        let decrypted = cipher.decrypt(private, &ciphertext).unwrap();
        assert_eq!(plaintext, decrypted);
    }

    #[rstest]
    #[case(Padding::Pkcs1v15, 245)]
    #[case(Padding::OaepSha256, 190)]
    fn test_max_message_len(#[case] padding: Padding, #[case] expected: usize) {
        let (public, _) = key_pair();
        assert_eq!(RsaCipher::new(padding).max_message_len(public), expected);
    }

    #[rstest]
    #[case(Padding::Pkcs1v15)]
    #[case(Padding::OaepSha256)]
    fn test_encrypt_one_byte_over_limit(#[case] padding: Padding) {
        let (public, _) = key_pair();
        let cipher = RsaCipher::new(padding);
        let max = cipher.max_message_len(public);
        let plaintext = vec![0x41; max + 1];

        assert_eq!(
            cipher.encrypt(public, &plaintext),
            Err(Error::MessageTooLong {
                length: max + 1,
                max
            })
        );
    }

    #[test]
    fn test_decrypt_with_other_key_fails() {
        let (public, _) = key_pair();
        let (_, other_private) = other_key_pair();
        let cipher = RsaCipher::default();

        let ciphertext = cipher.encrypt(public, b"Hola mundo").unwrap();
        assert_eq!(cipher.decrypt(other_private, &ciphertext), Err(Error::Padding));
    }

    #[test]
    fn test_decrypt_tampered_ciphertext_fails() {
        let (public, private) = key_pair();
        let cipher = RsaCipher::new(Padding::OaepSha256);

        let mut ciphertext = cipher.encrypt(public, b"some original text").unwrap();
        ciphertext[10] ^= 0xff;
        assert_eq!(cipher.decrypt(private, &ciphertext), Err(Error::Padding));
    }

    #[test]
    fn test_decrypt_with_other_padding_fails() {
        let (public, private) = key_pair();
        let ciphertext = RsaCipher::new(Padding::Pkcs1v15)
            .encrypt(public, b"Hola mundo")
            .unwrap();

        let result = RsaCipher::new(Padding::OaepSha256).decrypt(private, &ciphertext);
        assert_eq!(result, Err(Error::Padding));
    }

    #[test]
    fn test_decrypt_ciphertext_larger_than_modulus_fails() {
        let (_, private) = key_pair();
        let ciphertext = vec![0xff; private.size()];
        assert_eq!(
            RsaCipher::default().decrypt(private, &ciphertext),
            Err(Error::Padding)
        );
    }

    #[rstest]
    #[case::one_byte_longer(1, 0)]
    #[case::two_bytes_longer(2, 0)]
    #[case::one_byte_shorter(0, 1)]
    #[case::half(0, 128)]
    fn test_decrypt_wrong_length_fails(#[case] zeros: usize, #[case] dropped: usize) {
        let (public, private) = key_pair();
        let cipher = RsaCipher::default();

        let ciphertext = cipher.encrypt(public, b"Hola mundo").unwrap();
        let mut reshaped = vec![0x00; zeros];
        reshaped.extend_from_slice(&ciphertext[dropped..]);
        assert_ne!(reshaped.len(), private.size());
        assert_eq!(cipher.decrypt(private, &reshaped), Err(Error::Padding));
    }

    #[test]
    fn test_decrypt_empty_ciphertext_fails() {
        let (_, private) = key_pair();
        assert_eq!(RsaCipher::default().decrypt(private, &[]), Err(Error::Padding));
    }

    #[test]
    fn test_decrypt_rejects_stripped_leading_zero() {
        let (public, private) = key_pair();
        let cipher = RsaCipher::default();

        // find a ciphertext whose big-endian encoding starts with 0x00
        let mut seed = 0u64;
        let ciphertext = loop {
            let mut rng = StdRng::seed_from_u64(seed);
            let candidate = cipher.encrypt_with_rng(&mut rng, public, b"Hola mundo").unwrap();
            if candidate[0] == 0 {
                break candidate;
            }
            seed += 1;
        };
        assert_eq!(cipher.decrypt(private, &ciphertext).unwrap(), b"Hola mundo");
        assert_eq!(cipher.decrypt(private, &ciphertext[1..]), Err(Error::Padding));
    }

    #[rstest]
    #[case(Padding::Pkcs1v15)]
    #[case(Padding::OaepSha256)]
    fn test_encrypt_with_seeded_rng(#[case] padding: Padding) {
        let (public, private) = key_pair();
        let cipher = RsaCipher::new(padding);
        let encrypt = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            cipher.encrypt_with_rng(&mut rng, public, b"Hola mundo").unwrap()
        };

        let first = encrypt(7);
        assert_eq!(first, encrypt(7));
        assert_ne!(first, encrypt(8));
        assert_eq!(cipher.decrypt(private, &first).unwrap(), b"Hola mundo");
    }

    #[test]
    fn test_encryption_is_randomized() {
        let (public, _) = key_pair();
        let cipher = RsaCipher::default();
        let first = cipher.encrypt(public, b"Hola mundo").unwrap();
        let second = cipher.encrypt(public, b"Hola mundo").unwrap();
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("pkcs1v15", Padding::Pkcs1v15)]
    #[case("oaep-sha256", Padding::OaepSha256)]
    fn test_padding_from_str(#[case] input: &str, #[case] expected: Padding) {
        let padding: Padding = input.parse().unwrap();
        assert_eq!(padding, expected);
        assert_eq!(padding.to_string(), input);
    }
}
