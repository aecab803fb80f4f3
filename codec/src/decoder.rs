//! Decoder trait for type-safe conversions.
//!
//! The `Decoder` trait converts a source type `T` into a destination type
//! `D`. The destination opts in through the `DecodableFrom<T>` marker, so
//! only the conversions a crate declares can be written.
//!
//! # Implementation Guide
//!
//! ```no_run
//! use keyarmor_codec::decoder::{DecodableFrom, Decoder};
//!
//! struct Armored(String);
//! struct Raw(Vec<u8>);
//!
//! #[derive(Debug)]
//! struct MyError;
//!
//! impl DecodableFrom<Armored> for Raw {}
//!
//! impl Decoder<Armored, Raw> for Armored {
//!     type Error = MyError;
//!
//!     fn decode(&self) -> Result<Raw, Self::Error> {
//!         Ok(Raw(self.0.as_bytes().to_vec()))
//!     }
//! }
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// Implemented by the source type. The destination type must implement
/// `DecodableFrom<T>`.
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails. The specific error
    /// conditions depend on the implementing type.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
///
/// This trait has no methods. Implement it for each destination type that
/// may be produced from a given source type.
pub trait DecodableFrom<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Hex(&'static str);

    impl DecodableFrom<Hex> for Vec<u8> {}

    impl Decoder<Hex, Vec<u8>> for Hex {
        type Error = std::num::ParseIntError;

        fn decode(&self) -> Result<Vec<u8>, Self::Error> {
            (0..self.0.len())
                .step_by(2)
                .map(|i| u8::from_str_radix(&self.0[i..i + 2], 16))
                .collect()
        }
    }

    #[test]
    fn test_decode_through_marker() {
        let bytes: Vec<u8> = Hex("30820122").decode().unwrap();
        assert_eq!(bytes, vec![0x30, 0x82, 0x01, 0x22]);
    }

    #[test]
    fn test_decode_error_propagates() {
        let result: Result<Vec<u8>, _> = Hex("zz").decode();
        assert!(result.is_err());
    }
}
