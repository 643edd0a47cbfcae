//! PDA (Program Derived Address) computation from IDL seed definitions.

use std::collections::HashMap;

use solana_sdk::pubkey::Pubkey;
use staking_client_core::discriminator::snake_case;
use staking_client_core::idl::{IdlSeed, IdlType};

use crate::parse::ParsedValue;
use crate::serialize::encode_seed;

/// Compute a PDA from IDL seed definitions.
///
/// `account_map` and `parsed_args` are keyed by snake_case name.
pub fn compute_pda_from_seeds(
    seeds: &[IdlSeed],
    program_id: &Pubkey,
    account_map: &HashMap<String, Pubkey>,
    parsed_args: &HashMap<String, (IdlType, ParsedValue)>,
) -> Result<Pubkey, String> {
    let mut seed_bytes: Vec<Vec<u8>> = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let bytes = match seed {
            IdlSeed::Const { value } => value.as_bytes().to_vec(),
            IdlSeed::Account { path } => {
                let key = account_map.get(&snake_case(path)).ok_or_else(|| {
                    format!("PDA seed references account '{}' which hasn't been resolved yet", path)
                })?;
                key.to_bytes().to_vec()
            }
            IdlSeed::Arg { path } => {
                let (ty, val) = parsed_args
                    .get(&snake_case(path))
                    .ok_or_else(|| format!("PDA seed references unknown argument '{}'", path))?;
                encode_seed(ty, val).map_err(|e| e.to_string())?
            }
        };
        if bytes.len() > 32 {
            return Err(format!("Seed is {} bytes, max 32", bytes.len()));
        }
        seed_bytes.push(bytes);
    }

    let refs: Vec<&[u8]> = seed_bytes.iter().map(|s| s.as_slice()).collect();
    let (address, _bump) = Pubkey::find_program_address(&refs, program_id);
    Ok(address)
}
