//! Resolution of an instruction's account list from named addresses.

use std::collections::HashMap;

use solana_sdk::instruction::AccountMeta;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::{system_program, sysvar};
use staking_client_core::discriminator::snake_case;
use staking_client_core::error::{ClientError, ClientResult};
use staking_client_core::idl::{IdlInstruction, IdlType};
use tracing::debug;

use crate::parse::ParsedValue;
use crate::pda::compute_pda_from_seeds;

/// Named addresses available to an instruction.
///
/// Names are normalised to snake_case so `tokenMint`, `token-mint` and
/// `token_mint` refer to the same entry.
#[derive(Debug, Clone)]
pub struct AccountResolver {
    named: HashMap<String, Pubkey>,
}

impl Default for AccountResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountResolver {
    /// A resolver pre-filled with well-known program and sysvar addresses.
    pub fn new() -> Self {
        let mut named = HashMap::new();
        named.insert("system_program".to_string(), system_program::ID);
        named.insert("rent".to_string(), sysvar::rent::ID);
        Self { named }
    }

    pub fn insert(&mut self, name: &str, key: Pubkey) -> &mut Self {
        self.named.insert(snake_case(name), key);
        self
    }

    pub fn get(&self, name: &str) -> Option<Pubkey> {
        self.named.get(&snake_case(name)).copied()
    }

    /// Build the instruction's account metas in IDL order.
    ///
    /// Plain accounts must have been inserted beforehand. PDA accounts are
    /// derived from their seeds once the plain accounts are known. A missing
    /// optional account is passed as the program id, which Anchor reads as
    /// `None`.
    pub fn resolve(
        &mut self,
        ix: &IdlInstruction,
        program_id: &Pubkey,
        parsed_args: &HashMap<String, (IdlType, ParsedValue)>,
    ) -> ClientResult<Vec<AccountMeta>> {
        for acc in &ix.accounts {
            let Some(pda) = &acc.pda else { continue };
            if self.get(&acc.name).is_some() {
                continue;
            }
            let key = compute_pda_from_seeds(&pda.seeds, program_id, &self.named, parsed_args)
                .map_err(|message| ClientError::Pda {
                    account: acc.name.clone(),
                    message,
                })?;
            debug!(account = %acc.name, pda = %key, "derived PDA");
            self.insert(&acc.name, key);
        }

        let mut metas = Vec::with_capacity(ix.accounts.len());
        for acc in &ix.accounts {
            let meta = match self.get(&acc.name) {
                Some(key) if acc.writable => AccountMeta::new(key, acc.signer),
                Some(key) => AccountMeta::new_readonly(key, acc.signer),
                None if acc.optional => AccountMeta::new_readonly(*program_id, false),
                None => {
                    return Err(ClientError::MissingAccount { name: acc.name.clone() });
                }
            };
            metas.push(meta);
        }
        Ok(metas)
    }
}
