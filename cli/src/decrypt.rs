use std::path::PathBuf;

use clap::Args;
use keyarmor::{GeneratorConfig, KeyArmor, Padding};
use tracing::debug;

use crate::error::Result;
use crate::utils::{decode_base64, read_input, read_text, write_output};

#[derive(Args)]
pub(crate) struct Config {
    /// Armored private key
    #[arg(long)]
    pub(crate) private: PathBuf,

    /// Base64 ciphertext
    #[arg(long, conflicts_with = "input")]
    pub(crate) ciphertext: Option<String>,

    /// File holding the base64 ciphertext. If neither this nor --ciphertext is given, reads from stdin
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,

    /// Where to write the recovered plaintext. Defaults to stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,

    /// Padding scheme (pkcs1v15, oaep-sha256)
    #[arg(long, default_value = "pkcs1v15")]
    pub(crate) padding: Padding,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let armor = KeyArmor::new(GeneratorConfig::default(), config.padding);
    let private_key = armor.load_private_key(&read_text(&config.private)?)?;

    let encoded = match config.ciphertext {
        Some(ciphertext) => ciphertext.into_bytes(),
        None => read_input(config.input.as_deref())?,
    };
    let ciphertext = decode_base64(&encoded)?;
    debug!(length = ciphertext.len(), padding = %config.padding, "decrypting");

    let plaintext = armor.decrypt(&private_key, &ciphertext)?;
    write_output(config.output.as_deref(), &plaintext)
}
