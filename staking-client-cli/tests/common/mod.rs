//! Shared fixtures for the client integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use clap::Parser;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use staking_client_cli::config::Cli;
use staking_client_cli::rpc::ChainClient;
use staking_client_core::error::{ClientError, ClientResult};
use staking_client_core::idl::AnchorIdl;

pub const PROGRAM_ID: &str = "kScf9gaYZfjVStDAL6V6tfhLWR29UKi2mK7aojJA8Xp";

pub fn idl_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../idl.json")
}

pub fn load_idl() -> AnchorIdl {
    AnchorIdl::load(idl_path()).unwrap()
}

/// Parse a command line with the IDL and wallet pinned so the test does
/// not depend on the caller's environment.
pub fn parse_cli(extra: &[&str]) -> Cli {
    let idl = idl_path();
    let mut args = vec![
        "staking-cli".to_string(),
        "--idl".to_string(),
        idl.display().to_string(),
        "--wallet".to_string(),
        "/nonexistent/id.json".to_string(),
        "--program-id".to_string(),
        PROGRAM_ID.to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    Cli::try_parse_from(args).unwrap()
}

/// In-memory chain that records what it was sent.
pub struct MockChain {
    pub logs: Vec<String>,
    pub account_data: Option<Vec<u8>>,
    /// When set, submission fails with this program error code and logs.
    pub reject: Option<(u32, Vec<String>)>,
    pub sent: Mutex<Vec<Transaction>>,
}

impl MockChain {
    pub fn confirming(logs: &[&str]) -> Self {
        Self {
            logs: logs.iter().map(|s| s.to_string()).collect(),
            account_data: None,
            reject: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(code: u32, logs: &[&str]) -> Self {
        Self {
            reject: Some((code, logs.iter().map(|s| s.to_string()).collect())),
            ..Self::confirming(&[])
        }
    }

    pub fn with_account_data(mut self, data: Vec<u8>) -> Self {
        self.account_data = Some(data);
        self
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn latest_blockhash(&self) -> ClientResult<Hash> {
        Ok(Hash::new_from_array([42u8; 32]))
    }

    async fn send_and_confirm(&self, tx: &Transaction) -> ClientResult<Signature> {
        self.sent.lock().unwrap().push(tx.clone());
        if let Some((code, logs)) = &self.reject {
            return Err(ClientError::program(*code, None, logs.clone()));
        }
        Ok(tx.signatures[0])
    }

    async fn fetch_logs(&self, _signature: &Signature) -> ClientResult<Vec<String>> {
        Ok(self.logs.clone())
    }

    async fn fetch_account_data(&self, address: &Pubkey) -> ClientResult<Vec<u8>> {
        self.account_data.clone().ok_or_else(|| ClientError::Rpc {
            message: format!("AccountNotFound: pubkey={}", address),
            logs: vec![],
        })
    }
}
