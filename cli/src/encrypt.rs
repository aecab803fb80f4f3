use std::path::PathBuf;

use clap::Args;
use keyarmor::{GeneratorConfig, KeyArmor, Padding};
use tracing::debug;

use crate::error::Result;
use crate::utils::{encode_base64, read_input, read_text, write_output};

#[derive(Args)]
pub(crate) struct Config {
    /// Armored public key
    #[arg(long)]
    pub(crate) public: PathBuf,

    /// Message to encrypt
    #[arg(long, conflicts_with = "input")]
    pub(crate) message: Option<String>,

    /// File holding the message. If neither this nor --message is given, reads from stdin
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,

    /// Where to write the base64 ciphertext. Defaults to stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,

    /// Padding scheme (pkcs1v15, oaep-sha256)
    #[arg(long, default_value = "pkcs1v15")]
    pub(crate) padding: Padding,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let armor = KeyArmor::new(GeneratorConfig::default(), config.padding);
    let public_key = armor.load_public_key(&read_text(&config.public)?)?;

    let plaintext = match config.message {
        Some(message) => message.into_bytes(),
        None => read_input(config.input.as_deref())?,
    };
    debug!(
        length = plaintext.len(),
        max = armor.max_message_len(&public_key),
        padding = %config.padding,
        "encrypting"
    );

    let ciphertext = armor.encrypt(&public_key, &plaintext)?;
    let mut encoded = encode_base64(&ciphertext);
    encoded.push('\n');
    write_output(config.output.as_deref(), encoded.as_bytes())
}
