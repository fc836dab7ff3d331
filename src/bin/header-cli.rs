use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::{self, Read};

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use qtum_header::encoding::encode_varint;
use qtum_header::header::constants::GENESIS_BITS;
use qtum_header::header::difficulty;
use qtum_header::Header;

#[derive(Parser)]
#[command(name = "header-cli", about = "Inspect serialized block headers")]
struct Cli {
    /// Reference target for difficulty, as hex (`0x1f00ffff`) or decimal.
    #[arg(long, value_parser = parse_bits, default_value_t = GENESIS_BITS)]
    genesis_bits: u32,

    /// Log decoding steps (repeat for more detail). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a hex header and print it.
    Decode {
        /// Header bytes as hex, or `-` to read stdin.
        hex: String,

        /// Print every field instead of the one-line summary.
        #[arg(long)]
        detailed: bool,

        /// Reject bytes after the signature.
        #[arg(long)]
        exact: bool,
    },
    /// Print the header id.
    Hash {
        hex: String,
    },
    /// Print the difficulty of a header, or of raw compact bits.
    Difficulty {
        #[arg(required_unless_present = "bits")]
        hex: Option<String>,

        #[arg(long, value_parser = parse_bits, conflicts_with = "hex")]
        bits: Option<u32>,
    },
    /// Print the minimal varint encoding of a number.
    Varint {
        value: u64,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Decode {
            hex,
            detailed,
            exact,
        } => {
            let header = decode(&hex, exact)?;
            if detailed {
                println!("{header:#?}");
                println!("proof_of_stake: {}", header.is_proof_of_stake());
            } else {
                println!("{header:?}");
            }
        }
        Commands::Hash { hex } => {
            let header = decode(&hex, false)?;
            println!("{}", header.id());
        }
        Commands::Difficulty { hex, bits } => {
            let bits = match (bits, hex) {
                (Some(bits), _) => bits,
                (None, Some(hex)) => decode(&hex, false)?.bits(),
                (None, None) => return Err("either a header or --bits is required".into()),
            };

            let value = difficulty::difficulty(bits, cli.genesis_bits)?;
            info!(bits = %format!("0x{bits:08x}"), "computed difficulty");
            println!("{value}");
        }
        Commands::Varint { value } => {
            println!("{}", hex::encode(encode_varint(value)));
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(true)
        .with_writer(io::stderr)
        .try_init();
}

fn decode(input: &str, exact: bool) -> Result<Header, Box<dyn Error>> {
    let text = if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        input.to_string()
    };

    let bytes = hex::decode(text.trim())?;
    debug!(len = bytes.len(), "decoding header");

    let header = if exact {
        Header::from_bytes_exact(&bytes)?
    } else {
        Header::from_bytes(&bytes)?
    };

    Ok(header)
}

fn parse_bits(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| format!("invalid compact bits {s:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bits_accepts_hex_and_decimal() {
        assert_eq!(parse_bits("0x1f00ffff").unwrap(), 0x1f00ffff);
        assert_eq!(parse_bits("0X1D00FFFF").unwrap(), 0x1d00ffff);
        assert_eq!(parse_bits("486604799").unwrap(), 0x1d00ffff);
        assert!(parse_bits("0xzz").is_err());
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["header-cli", "difficulty", "--bits", "0x1d00ffff"]).unwrap();
        assert_eq!(cli.genesis_bits, GENESIS_BITS);
        assert!(matches!(
            cli.command,
            Commands::Difficulty {
                hex: None,
                bits: Some(0x1d00ffff)
            }
        ));

        let cli = Cli::try_parse_from(["header-cli", "-vv", "decode", "00", "--detailed"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Decode { detailed: true, .. }));
    }

    #[test]
    fn decode_reads_hex_argument() {
        let header = decode(&"00".repeat(181), true).unwrap();
        assert!(!header.is_proof_of_stake());
        assert!(decode(&"00".repeat(182), true).is_err());
    }
}
