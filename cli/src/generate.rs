use std::fs;
use std::path::PathBuf;

use clap::Args;
use keyarmor::{GeneratorConfig, KeyAlgorithm, KeyArmor, Padding};
use tracing::{debug, info};

use crate::error::Result;
use crate::output::LineEndingArg;
use crate::utils::write_private;

#[derive(Args)]
pub(crate) struct Config {
    /// Modulus size in bits
    #[arg(long, default_value_t = 2048)]
    pub(crate) bits: usize,

    /// Key algorithm. Only rsa can be generated
    #[arg(long, default_value = "rsa")]
    pub(crate) algorithm: KeyAlgorithm,

    /// Smallest modulus size accepted
    #[arg(long, default_value_t = 2048)]
    pub(crate) min_bits: usize,

    /// Destination of the armored public key
    #[arg(long, default_value = "public.pem")]
    pub(crate) public: PathBuf,

    /// Destination of the armored private key
    #[arg(long, default_value = "private.pem")]
    pub(crate) private: PathBuf,

    /// Line separator used in the PEM files
    #[arg(long, value_enum, default_value = "lf")]
    pub(crate) line_ending: LineEndingArg,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let armor = KeyArmor::new(
        GeneratorConfig::default()
            .with_algorithm(config.algorithm)
            .with_min_bits(config.min_bits),
        Padding::default(),
    )
    .with_line_ending(config.line_ending.into());

    debug!(
        algorithm = %config.algorithm,
        bits = config.bits,
        min_bits = config.min_bits,
        "generating key pair"
    );
    let (public_pem, private_pem) = armor.generate_key_pair(config.bits)?;

    fs::write(&config.public, &public_pem)?;
    write_private(&config.private, &private_pem)?;
    info!(
        public = %config.public.display(),
        private = %config.private.display(),
        "key pair written"
    );

    println!("Public key written to {}", config.public.display());
    println!("Private key written to {}", config.private.display());
    Ok(())
}
