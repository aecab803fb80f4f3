use std::fmt::Write;
use std::path::PathBuf;

use clap::Args;
use keyarmor::{FromPem, KeyAlgorithm, Label, Pem, PrivateKeyHandle, PublicKeyHandle};
use keyarmor_codec::decoder::Decoder;
use serde::Serialize;

use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::read_input;

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the PEM file. If not specified, reads from stdin
    pub(crate) file: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, value_enum, default_value = "text")]
    pub(crate) output: OutputFormat,
}

#[derive(Debug, Serialize)]
struct KeySummary {
    label: String,
    algorithm: String,
    private: bool,
    bits: usize,
    public_exponent: String,
    der_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    crt: Option<bool>,
}

impl KeySummary {
    fn from_pem(pem: &Pem) -> Result<Self> {
        let der: Vec<u8> =
            Decoder::<Pem, Vec<u8>>::decode(pem).map_err(keyarmor::Error::from)?;
        let summary = match pem.label() {
            Label::RsaPublicKey => {
                let key = PublicKeyHandle::from_pem(pem).map_err(keyarmor::Error::from)?;
                KeySummary {
                    label: pem.label().to_string(),
                    algorithm: KeyAlgorithm::Rsa.to_string(),
                    private: false,
                    bits: key.bits(),
                    public_exponent: key.public_exponent().to_string(),
                    der_length: der.len(),
                    crt: None,
                }
            }
            Label::RsaPrivateKey => {
                let key = PrivateKeyHandle::from_pem(pem).map_err(keyarmor::Error::from)?;
                KeySummary {
                    label: pem.label().to_string(),
                    algorithm: KeyAlgorithm::Rsa.to_string(),
                    private: true,
                    bits: key.bits(),
                    public_exponent: key.public_exponent().to_string(),
                    der_length: der.len(),
                    crt: Some(key.has_crt()),
                }
            }
        };
        Ok(summary)
    }

    fn to_text(&self) -> Result<String> {
        let mut output = String::new();
        let kind = if self.private { "Private" } else { "Public" };

        writeln!(output, "{} {} Key", self.algorithm, kind)?;
        writeln!(output, "Label: {}", self.label)?;
        writeln!(output, "Modulus (n): {} bits", self.bits)?;
        writeln!(output, "Public Exponent (e): {}", self.public_exponent)?;
        writeln!(output, "DER Length: {} bytes", self.der_length)?;
        if let Some(crt) = self.crt {
            writeln!(output, "CRT Parameters: {}", if crt { "yes" } else { "no" })?;
        }
        Ok(output)
    }
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input_bytes = read_input(config.file.as_deref())?;
    let pem = Pem::try_from(input_bytes.as_slice()).map_err(keyarmor::Error::from)?;
    let summary = KeySummary::from_pem(&pem)?;

    match config.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            print!("{}", summary.to_text()?);
        }
    }
    Ok(())
}
