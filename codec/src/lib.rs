//! # keyarmor-codec
//!
//! Core conversion traits for the keyarmor RSA key toolkit.
//!
//! Every layer of keyarmor converts one representation of key material into
//! the next through the `Decoder` and `Encoder` traits defined here:
//!
//! ```text
//! &str → Pem → KeyMaterial → PublicKeyHandle / PrivateKeyHandle
//! ```
//!
//! Encoding runs the chain backwards, from `KeyMaterial` to `Pem` to text.
//!
//! ## Type Safety
//!
//! Both traits are constrained by a marker trait (`DecodableFrom` and
//! `EncodableTo`), so a conversion only exists when the destination type
//! explicitly opts in for a given source type.
//!
//! ## Example
//!
//! ```ignore
//! use keyarmor_codec::decoder::Decoder;
//! use keyarmor_key::KeyMaterial;
//! use keyarmor_pem::Pem;
//!
//! let pem: Pem = armored_text.parse()?;
//! let material: KeyMaterial = pem.decode()?;
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
