//! Network access behind a small trait so submission can run against a
//! live cluster or an in-memory stand-in.

use async_trait::async_trait;
use solana_client::client_error::{ClientError as RpcClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcTransactionConfig;
use solana_client::rpc_request::{RpcError, RpcResponseErrorData};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::instruction::InstructionError;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::{Transaction, TransactionError};
use solana_transaction_status::option_serializer::OptionSerializer;
use solana_transaction_status::UiTransactionEncoding;
use staking_client_core::error::{ClientError, ClientResult};
use staking_client_core::idl::AnchorIdl;

/// The remote calls one submission needs.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn latest_blockhash(&self) -> ClientResult<Hash>;

    /// Send a signed transaction and wait for the client's commitment.
    async fn send_and_confirm(&self, tx: &Transaction) -> ClientResult<Signature>;

    /// Log messages of a confirmed transaction.
    async fn fetch_logs(&self, signature: &Signature) -> ClientResult<Vec<String>>;

    async fn fetch_account_data(&self, address: &Pubkey) -> ClientResult<Vec<u8>>;
}

/// `ChainClient` backed by a JSON-RPC node.
pub struct RpcChainClient {
    rpc: RpcClient,
    commitment: CommitmentConfig,
    idl: Option<AnchorIdl>,
}

impl RpcChainClient {
    pub fn new(url: &str, commitment: CommitmentConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(url.to_string(), commitment),
            commitment,
            idl: None,
        }
    }

    /// Resolve custom program error codes through this IDL.
    pub fn with_idl(mut self, idl: AnchorIdl) -> Self {
        self.idl = Some(idl);
        self
    }

    pub fn url(&self) -> String {
        self.rpc.url()
    }

    fn classify(&self, err: RpcClientError) -> ClientError {
        let logs = preflight_logs(&err);
        if let Some(TransactionError::InstructionError(_, InstructionError::Custom(code))) =
            err.get_transaction_error()
        {
            return ClientError::program(code, self.idl.as_ref(), logs);
        }
        ClientError::Rpc { message: err.to_string(), logs }
    }
}

fn preflight_logs(err: &RpcClientError) -> Vec<String> {
    match err.kind() {
        ClientErrorKind::RpcError(RpcError::RpcResponseError {
            data: RpcResponseErrorData::SendTransactionPreflightFailure(sim),
            ..
        }) => sim.logs.clone().unwrap_or_default(),
        _ => Vec::new(),
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn latest_blockhash(&self) -> ClientResult<Hash> {
        self.rpc.get_latest_blockhash().await.map_err(|e| self.classify(e))
    }

    async fn send_and_confirm(&self, tx: &Transaction) -> ClientResult<Signature> {
        self.rpc
            .send_and_confirm_transaction(tx)
            .await
            .map_err(|e| self.classify(e))
    }

    async fn fetch_logs(&self, signature: &Signature) -> ClientResult<Vec<String>> {
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Json),
            commitment: Some(self.commitment),
            max_supported_transaction_version: Some(0),
        };
        let tx = self
            .rpc
            .get_transaction_with_config(signature, config)
            .await
            .map_err(|e| self.classify(e))?;
        let meta = tx.transaction.meta.ok_or_else(|| ClientError::MissingMeta {
            signature: signature.to_string(),
        })?;
        match meta.log_messages {
            OptionSerializer::Some(logs) => Ok(logs),
            OptionSerializer::None | OptionSerializer::Skip => Ok(Vec::new()),
        }
    }

    async fn fetch_account_data(&self, address: &Pubkey) -> ClientResult<Vec<u8>> {
        self.rpc.get_account_data(address).await.map_err(|e| self.classify(e))
    }
}
