//! Command-line and environment configuration.
//!
//! Every option can come from a flag or an environment variable; the
//! Anchor provider variables are honoured so an existing Anchor setup
//! works unchanged.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair};
use staking_client_core::discriminator::snake_case;
use staking_client_core::error::{ClientError, ClientResult};
use staking_client_core::idl::AnchorIdl;

use crate::hex::decode_pubkey;

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEFAULT_WALLET: &str = "~/.config/solana/id.json";
pub const DEFAULT_PROGRAM_ID: &str = "kScf9gaYZfjVStDAL6V6tfhLWR29UKi2mK7aojJA8Xp";
pub const DEFAULT_OWNER: &str = "6JxLdTweYt6cb6UeyCiqkPCVTo4RBxswfoQwHWe5aHzY";
pub const DEFAULT_TOKEN_MINT: &str = "Azia2MRh34sWejk7ZpPxvXS2tQdcoq2xZja6RN3Q26o3";
/// SPL Token-2022 program.
pub const DEFAULT_TOKEN_PROGRAM: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";

#[derive(Parser, Debug, Clone)]
#[command(name = "staking-cli", version, about = "Initialize a token staking account")]
#[command(args_override_self = true)]
pub struct Cli {
    #[command(flatten)]
    pub config: ClientConfig,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new staking account and submit `initialize` (default)
    Initialize,
    /// Print the instructions described by the IDL
    Idl,
}

#[derive(Args, Debug, Clone)]
pub struct ClientConfig {
    /// RPC endpoint of the cluster
    #[arg(long, env = "ANCHOR_PROVIDER_URL", default_value = DEFAULT_RPC_URL)]
    pub url: String,

    /// Keypair file paying for and signing the transaction
    #[arg(long, env = "ANCHOR_WALLET", default_value = DEFAULT_WALLET)]
    pub wallet: String,

    /// Anchor IDL JSON file
    #[arg(long, env = "STAKING_IDL", default_value = "./idl.json")]
    pub idl: PathBuf,

    /// Staking program address (defaults to the IDL metadata address)
    #[arg(long, env = "STAKING_PROGRAM_ID")]
    pub program_id: Option<String>,

    /// Owner recorded in the new staking account
    #[arg(long, env = "STAKING_OWNER", default_value = DEFAULT_OWNER)]
    pub owner: String,

    #[arg(long, env = "STAKING_TOKEN_MINT", default_value = DEFAULT_TOKEN_MINT)]
    pub token_mint: String,

    #[arg(long, env = "STAKING_TOKEN_PROGRAM", default_value = DEFAULT_TOKEN_PROGRAM)]
    pub token_program: String,

    /// Token account, for IDLs whose `initialize` expects one
    #[arg(long, env = "STAKING_TOKEN_ACCOUNT")]
    pub token_account: Option<String>,

    /// Extra account as NAME=ADDRESS (repeatable)
    #[arg(long = "account", value_name = "NAME=ADDRESS", value_parser = parse_named_account)]
    pub accounts: Vec<(String, String)>,

    /// Instruction argument as NAME=VALUE (repeatable); `owner` defaults to --owner
    #[arg(long = "arg", value_name = "NAME=VALUE", value_parser = parse_named_arg)]
    pub args: Vec<(String, String)>,

    /// Commitment level to wait for
    #[arg(long, env = "STAKING_COMMITMENT", value_enum, default_value_t = Commitment::Confirmed)]
    pub commitment: Commitment,

    /// Print the serialized instruction without submitting it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl From<Commitment> for CommitmentConfig {
    fn from(c: Commitment) -> Self {
        match c {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

fn parse_named_arg(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    if name.is_empty() {
        return Err(format!("expected NAME=VALUE, got '{}'", s));
    }
    Ok((name.to_string(), value.to_string()))
}

fn parse_named_account(s: &str) -> Result<(String, String), String> {
    let (name, addr) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=ADDRESS, got '{}'", s))?;
    if name.is_empty() || addr.is_empty() {
        return Err(format!("expected NAME=ADDRESS, got '{}'", s));
    }
    Ok((name.to_string(), addr.to_string()))
}

impl ClientConfig {
    /// Wallet path with a leading `~` expanded to `$HOME`.
    pub fn wallet_path(&self) -> PathBuf {
        expand_home(&self.wallet)
    }

    /// Program address: explicit option, then IDL metadata, then the
    /// built-in default.
    pub fn program_id(&self, idl: &AnchorIdl) -> ClientResult<Pubkey> {
        let raw = self
            .program_id
            .as_deref()
            .or_else(|| idl.program_address())
            .unwrap_or(DEFAULT_PROGRAM_ID);
        decode_pubkey(raw)
    }

    /// Read the fee payer keypair.
    pub fn load_wallet(&self) -> ClientResult<Keypair> {
        let path = self.wallet_path();
        read_keypair_file(&path).map_err(|e| ClientError::Wallet {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Raw instruction arguments keyed by snake_case name. `--arg` values
    /// win over `--owner`.
    pub fn raw_args(&self) -> HashMap<String, String> {
        let mut out = HashMap::from([("owner".to_string(), self.owner.clone())]);
        for (name, value) in &self.args {
            out.insert(snake_case(name), value.clone());
        }
        out
    }

    /// Named accounts supplied by configuration, in insertion order.
    pub fn named_accounts(&self) -> ClientResult<Vec<(String, Pubkey)>> {
        let mut out = vec![
            ("tokenMint".to_string(), decode_pubkey(&self.token_mint)?),
            ("tokenProgram".to_string(), decode_pubkey(&self.token_program)?),
        ];
        if let Some(acc) = &self.token_account {
            out.push(("tokenAccount".to_string(), decode_pubkey(acc)?));
        }
        for (name, addr) in &self.accounts {
            out.push((name.clone(), decode_pubkey(addr)?));
        }
        Ok(out)
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(rest),
            None => PathBuf::from(path),
        },
        None => PathBuf::from(path),
    }
}
