use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod decrypt;
mod encrypt;
mod error;
mod generate;
mod inspect;
mod output;
mod roundtrip;
mod utils;

use error::Result;

#[derive(Parser)]
#[command(name = "keyarmor")]
#[command(about = "RSA key pair generation, PEM armoring and encryption", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a key pair and write it as PEM files
    Generate {
        #[command(flatten)]
        config: generate::Config,
    },
    /// Encrypt a message with a public key and print it as base64
    Encrypt {
        #[command(flatten)]
        config: encrypt::Config,
    },
    /// Decrypt a base64 ciphertext with a private key
    Decrypt {
        #[command(flatten)]
        config: decrypt::Config,
    },
    /// Encrypt and decrypt a message with a stored key pair
    Roundtrip {
        #[command(flatten)]
        config: roundtrip::Config,
    },
    /// Inspect a PEM key file
    Inspect {
        #[command(flatten)]
        config: inspect::Config,
    },
}

// Logs go to stderr so command output on stdout stays pipeable.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate { config } => generate::execute(config)?,
        Commands::Encrypt { config } => encrypt::execute(config)?,
        Commands::Decrypt { config } => decrypt::execute(config)?,
        Commands::Roundtrip { config } => roundtrip::execute(config)?,
        Commands::Inspect { config } => inspect::execute(config)?,
    }

    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
