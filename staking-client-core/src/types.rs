//! On-chain account layouts read back by the client.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::discriminator::{account_discriminator, DISCRIMINATOR_LEN};
use crate::error::{ClientError, ClientResult};

/// State written by the `initialize` instruction.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StakingAccount {
    pub owner: [u8; 32],
    pub token_mint: [u8; 32],
    pub token_account: [u8; 32],
    pub is_initialized: bool,
}

impl StakingAccount {
    pub const NAME: &'static str = "StakingAccount";

    /// Serialized size without the discriminator.
    pub const LEN: usize = 32 + 32 + 32 + 1;

    /// Space the program allocates: discriminator plus fields.
    pub const SPACE: usize = DISCRIMINATOR_LEN + Self::LEN;

    /// Decode raw account data, checking the Anchor discriminator first.
    pub fn try_from_account_data(data: &[u8]) -> ClientResult<Self> {
        if data.len() < Self::SPACE {
            return Err(ClientError::AccountData {
                message: format!("expected {} bytes, got {}", Self::SPACE, data.len()),
            });
        }
        let (disc, body) = data.split_at(DISCRIMINATOR_LEN);
        if disc != account_discriminator(Self::NAME) {
            return Err(ClientError::AccountData {
                message: format!("discriminator mismatch for {}", Self::NAME),
            });
        }
        let mut body = &body[..Self::LEN];
        Self::deserialize(&mut body).map_err(|e| ClientError::AccountData {
            message: e.to_string(),
        })
    }

    /// Encode with the discriminator prefix, as the program stores it.
    pub fn to_account_data(&self) -> ClientResult<Vec<u8>> {
        let mut out = account_discriminator(Self::NAME).to_vec();
        borsh::to_writer(&mut out, self).map_err(|e| ClientError::Serialization {
            message: e.to_string(),
        })?;
        Ok(out)
    }
}
