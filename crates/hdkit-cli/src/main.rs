use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use hdkit_address::ChainSpec;
use hdkit_bip::{Entropy, Version};
use hdkit_core::hex;
use hdkit_wallet::Wallet;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Default log filter when neither `--log-level` nor `RUST_LOG` is set.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Default Ethereum account path.
const DEFAULT_PATH: &str = "m/44'/60'/0'/0/0";

#[derive(Parser, Debug)]
#[command(
    name = "hdkit",
    version,
    about = "HD wallet derivation, multi-chain addresses and EIP-712 hashing"
)]
struct Cli {
    /// Log filter, overrides RUST_LOG (e.g. "debug", "hdkit_bip=trace")
    #[arg(long = "log-level", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct PhraseArgs {
    /// BIP39 mnemonic phrase
    #[arg(long = "mnemonic", env = "HDKIT_MNEMONIC", hide_env_values = true)]
    mnemonic: String,

    /// BIP39 passphrase
    #[arg(long = "passphrase", default_value = "")]
    passphrase: String,
}

#[derive(Args, Debug)]
struct ChainArgs {
    /// Built-in chain preset (see `hdkit address --help`)
    #[arg(long = "chain", default_value = "ethereum", conflicts_with = "chain_file")]
    chain: String,

    /// JSON chain spec, e.g. {"family":"bech32","hrp":"avax"}
    #[arg(long = "chain-file")]
    chain_file: Option<PathBuf>,
}

impl ChainArgs {
    fn resolve(&self) -> Result<ChainSpec> {
        match &self.chain_file {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("reading chain spec {}", path.display()))?;
                Ok(ChainSpec::from_json(&json)?)
            }
            None => ChainSpec::preset(&self.chain).ok_or_else(|| {
                anyhow!(
                    "unknown chain {:?} (presets: {})",
                    self.chain,
                    hdkit_address::PRESET_NAMES.join(", ")
                )
            }),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a random mnemonic phrase
    Mnemonic {
        /// Word count: 3, 6, 9, 12, 15, 18, 21 or 24
        #[arg(short = 'w', long = "words", default_value_t = 12)]
        words: usize,
    },

    /// Print the 64-byte BIP39 seed
    Seed {
        #[command(flatten)]
        phrase: PhraseArgs,
    },

    /// Print the depth-0 extended key and master fingerprint
    Root {
        #[command(flatten)]
        phrase: PhraseArgs,

        /// Key prefix: xprv, xpub, tprv or tpub
        #[arg(long = "prefix", default_value = "xprv")]
        prefix: Version,
    },

    /// Derive an extended key along a path
    Xkey {
        #[command(flatten)]
        phrase: PhraseArgs,

        #[arg(long = "path", default_value = "m/44'/60'/0'/0")]
        path: String,

        /// Serialize as xpub instead of xprv
        #[arg(long = "public", default_value_t = false)]
        public: bool,
    },

    /// Derive a chain address
    Address {
        #[command(flatten)]
        phrase: PhraseArgs,

        #[command(flatten)]
        chain: ChainArgs,

        #[arg(long = "path", default_value = DEFAULT_PATH)]
        path: String,
    },

    /// Derive an Ethereum account (address and keys) as JSON
    Account {
        #[command(flatten)]
        phrase: PhraseArgs,

        #[arg(long = "path", default_value = DEFAULT_PATH)]
        path: String,
    },

    /// Print the EIP-712 sign hash of a typed-data JSON file ("-" for stdin)
    Eip712 {
        #[arg(default_value = "-")]
        file: PathBuf,
    },

    /// Check a legacy native address against a chain id
    VerifyAddress {
        address: String,

        /// Chain id character, e.g. W (mainnet) or T (testnet)
        #[arg(long = "chain-id", default_value_t = 'W')]
        chain_id: char,
    },
}

fn init_logging(log_level: Option<&str>) -> Result<()> {
    let filter = match log_level {
        Some(level) => EnvFilter::try_new(level).with_context(|| format!("invalid log filter {level:?}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn chain_id_byte(chain_id: char) -> Result<u8> {
    u8::try_from(chain_id)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| anyhow!("chain id must be a single ASCII character, got {chain_id:?}"))
}

fn read_input(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("reading typed data from stdin")?;
        Ok(input)
    } else {
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))
    }
}

fn run(command: Command) -> Result<()> {
    let wallet: Wallet = Wallet::default();
    match command {
        Command::Mnemonic { words } => {
            let entropy = Entropy::from_word_count(words)
                .ok_or_else(|| anyhow!("unsupported word count {words}"))?;
            if !entropy.is_standard() {
                warn!(words, "word count below BIP39 minimum of 12");
            }
            println!("{}", wallet.random_mnemonic(entropy));
        }
        Command::Seed { phrase } => {
            let seed = wallet.mnemonic_to_seed(&phrase.mnemonic, &phrase.passphrase);
            println!("{}", hex::encode(&seed));
        }
        Command::Root { phrase, prefix } => {
            let seed = wallet.mnemonic_to_seed(&phrase.mnemonic, &phrase.passphrase);
            let root = wallet.root_key(&seed, prefix)?;
            let master = wallet.derive_master_key(&seed)?;
            let fingerprint = wallet.engine().fingerprint(&master)?;
            println!("{root}");
            println!("fingerprint: {}", hex::encode(&fingerprint));
        }
        Command::Xkey { phrase, path, public } => {
            let master = wallet.master_key_from_phrase(&phrase.mnemonic, &phrase.passphrase)?;
            println!("{}", wallet.derive_extended_key(&path, &master, public)?);
        }
        Command::Address { phrase, chain, path } => {
            let chain = chain.resolve()?;
            debug!(%chain, %path, "resolved chain");
            let address = match chain {
                ChainSpec::Native { chain_id } => {
                    if path != DEFAULT_PATH {
                        warn!("native addresses derive from the phrase directly; --path is ignored");
                    }
                    wallet.native_address(&phrase.mnemonic, chain_id)
                }
                _ => {
                    let master =
                        wallet.master_key_from_phrase(&phrase.mnemonic, &phrase.passphrase)?;
                    wallet.derive_address(&path, &master, &chain)?
                }
            };
            println!("{address}");
        }
        Command::Account { phrase, path } => {
            if !phrase.passphrase.is_empty() {
                warn!("accounts derive without a passphrase; --passphrase is ignored");
            }
            let account = wallet.account(&phrase.mnemonic, &path)?;
            let json = serde_json::json!({
                "address": account.address,
                "public_key": account.public_key,
                "private_key": account.private_key,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Command::Eip712 { file } => {
            let json = read_input(&file)?;
            let hash = wallet.encode_typed_data(&json)?;
            println!("{}", hex::encode_prefixed(&hash));
        }
        Command::VerifyAddress { address, chain_id } => {
            let chain_id = chain_id_byte(chain_id)?;
            match wallet.verify_address(&address, chain_id) {
                Ok(()) => println!("valid"),
                Err(err) => bail!("invalid address: {err}"),
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;
    run(cli.command)
}
