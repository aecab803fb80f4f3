use keyarmor_codec::decoder::{DecodableFrom, Decoder};
use keyarmor_codec::encoder::{EncodableTo, Encoder};
use keyarmor_pem::{Label, Pem, ToPem};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// DER-encoded key bytes tagged with the PEM label they travel under.
///
/// The bytes are never modified after construction and are wiped when the
/// value is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    #[zeroize(skip)]
    label: Label,
    bytes: Vec<u8>,
}

impl KeyMaterial {
    pub fn new(label: Label, bytes: Vec<u8>) -> Self {
        KeyMaterial { label, bytes }
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_private(&self) -> bool {
        self.label == Label::RsaPrivateKey
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("label", &self.label)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ToPem for KeyMaterial {
    type Error = Error;

    fn pem_label(&self) -> Label {
        self.label
    }

    fn to_pem(&self) -> Result<Pem> {
        Ok(Pem::from_bytes(self.label, &self.bytes))
    }
}

impl EncodableTo<KeyMaterial> for Pem {}

impl Encoder<KeyMaterial, Pem> for KeyMaterial {
    type Error = Error;

    fn encode(&self) -> Result<Pem> {
        self.to_pem()
    }
}

impl DecodableFrom<Pem> for KeyMaterial {}

impl Decoder<Pem, KeyMaterial> for Pem {
    type Error = Error;

    fn decode(&self) -> Result<KeyMaterial> {
        let bytes: Vec<u8> = self.decode()?;
        Ok(KeyMaterial::new(self.label(), bytes))
    }
}
