use std::path::PathBuf;

use clap::Args;
use keyarmor::{GeneratorConfig, KeyArmor, Padding};
use tracing::info;

use crate::error::Result;
use crate::utils::{encode_base64, read_text};

#[derive(Args)]
pub(crate) struct Config {
    /// Armored public key
    #[arg(long, default_value = "public.pem")]
    pub(crate) public: PathBuf,

    /// Armored private key
    #[arg(long, default_value = "private.pem")]
    pub(crate) private: PathBuf,

    /// Message to send through the key pair
    #[arg(long, default_value = "Hola mundo")]
    pub(crate) message: String,

    /// Padding scheme (pkcs1v15, oaep-sha256)
    #[arg(long, default_value = "pkcs1v15")]
    pub(crate) padding: Padding,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let armor = KeyArmor::new(GeneratorConfig::default(), config.padding);
    let public_key = armor.load_public_key(&read_text(&config.public)?)?;
    let private_key = armor.load_private_key(&read_text(&config.private)?)?;

    if private_key.public_key() != public_key {
        return Err(format!(
            "{} and {} do not belong to the same key pair",
            config.public.display(),
            config.private.display()
        )
        .into());
    }

    let ciphertext = armor.encrypt(&public_key, config.message.as_bytes())?;
    println!("Encrypted: {}", encode_base64(&ciphertext));

    let decrypted = String::from_utf8(armor.decrypt(&private_key, &ciphertext)?)?;
    println!("Decrypted: {}", decrypted);

    if decrypted != config.message {
        return Err("decrypted message does not match the original".into());
    }
    info!(bits = public_key.bits(), "roundtrip succeeded");
    Ok(())
}
