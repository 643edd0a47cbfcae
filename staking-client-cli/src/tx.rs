//! Transaction building and submission.

use std::collections::HashMap;

use solana_sdk::hash::Hash;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;
use staking_client_core::discriminator::snake_case;
use staking_client_core::error::{ClientError, ClientResult};
use staking_client_core::idl::{AnchorIdl, IdlType};
use staking_client_core::types::StakingAccount;
use tracing::{debug, info, warn};

use crate::accounts::AccountResolver;
use crate::config::ClientConfig;
use crate::hex::hex_encode;
use crate::parse::{parse_value, ParsedValue};
use crate::rpc::ChainClient;
use crate::serialize::encode_instruction_data;

pub const INITIALIZE: &str = "initialize";

/// Accounts whose keys the client signs for and so never takes from config.
const GENERATED_ACCOUNTS: [&str; 2] = ["staking_account", "user"];

/// An instruction ready to be signed, with the names it was resolved from.
#[derive(Debug, Clone)]
pub struct PreparedInstruction {
    pub name: String,
    pub instruction: Instruction,
    pub account_names: Vec<String>,
    pub args: Vec<(String, ParsedValue)>,
}

/// Outcome of a confirmed submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub signature: Signature,
    pub logs: Vec<String>,
    pub staking_account: Option<StakingAccount>,
}

/// Parse raw argument strings against the instruction's IDL types.
///
/// Keys may use any spelling of the argument name. The result is keyed by
/// snake_case name.
pub fn parse_args(
    idl: &AnchorIdl,
    instruction: &str,
    raw: &HashMap<String, String>,
) -> ClientResult<HashMap<String, (IdlType, ParsedValue)>> {
    let ix = idl.instruction(instruction)?;
    let normalised: HashMap<String, &String> =
        raw.iter().map(|(k, v)| (snake_case(k), v)).collect();

    let mut parsed = HashMap::new();
    for arg in &ix.args {
        let key = snake_case(&arg.name);
        let value = normalised
            .get(&key)
            .ok_or_else(|| ClientError::MissingArgument { name: arg.name.clone() })?;
        let val = parse_value(value, &arg.type_).map_err(|message| ClientError::InvalidArgument {
            name: arg.name.clone(),
            message,
        })?;
        parsed.insert(key, (arg.type_.clone(), val));
    }
    Ok(parsed)
}

/// Resolve accounts and encode data for one IDL instruction.
pub fn prepare_instruction(
    idl: &AnchorIdl,
    instruction: &str,
    program_id: &Pubkey,
    resolver: &mut AccountResolver,
    args: &HashMap<String, (IdlType, ParsedValue)>,
) -> ClientResult<PreparedInstruction> {
    let ix = idl.instruction(instruction)?;

    let mut ordered: Vec<(&IdlType, &ParsedValue)> = Vec::with_capacity(ix.args.len());
    let mut shown = Vec::with_capacity(ix.args.len());
    for arg in &ix.args {
        let (ty, val) = args
            .get(&snake_case(&arg.name))
            .ok_or_else(|| ClientError::MissingArgument { name: arg.name.clone() })?;
        ordered.push((ty, val));
        shown.push((arg.name.clone(), val.clone()));
    }
    let data = encode_instruction_data(&ix.name, &ordered)?;

    let accounts = resolver.resolve(ix, program_id, args)?;
    debug!(instruction = %ix.name, accounts = accounts.len(), data_len = data.len(), "prepared instruction");

    Ok(PreparedInstruction {
        name: ix.name.clone(),
        instruction: Instruction { program_id: *program_id, accounts, data },
        account_names: ix.accounts.iter().map(|a| a.name.clone()).collect(),
        args: shown,
    })
}

/// Prepare `initialize` for a fresh staking account.
///
/// The payer fills the `user` slot; configured addresses fill the rest.
pub fn prepare_initialize(
    idl: &AnchorIdl,
    config: &ClientConfig,
    payer: &Pubkey,
    staking_account: &Pubkey,
) -> ClientResult<PreparedInstruction> {
    let program_id = config.program_id(idl)?;

    let mut resolver = AccountResolver::new();
    for (name, key) in config.named_accounts()? {
        if GENERATED_ACCOUNTS.contains(&snake_case(&name).as_str()) {
            return Err(ClientError::InvalidArgument {
                name,
                message: "filled from the wallet or the generated staking keypair".to_string(),
            });
        }
        resolver.insert(&name, key);
    }
    resolver
        .insert("stakingAccount", *staking_account)
        .insert("user", *payer);

    let args = parse_args(idl, INITIALIZE, &config.raw_args())?;

    prepare_instruction(idl, INITIALIZE, &program_id, &mut resolver, &args)
}

/// Payer for a dry run: the wallet when it loads, otherwise a fresh random
/// key so the `user` slot never aliases a well-known program id.
pub fn dry_run_payer(config: &ClientConfig) -> Pubkey {
    match config.load_wallet() {
        Ok(kp) => kp.pubkey(),
        Err(e) => {
            let placeholder = Keypair::new().pubkey();
            warn!(error = %e, %placeholder, "no wallet, using a placeholder payer");
            placeholder
        }
    }
}

/// Sign the instruction with the payer and whichever other keypairs the
/// account list marks as signers.
pub fn build_transaction(
    prepared: &PreparedInstruction,
    payer: &Keypair,
    extra_signers: &[&Keypair],
    recent_blockhash: Hash,
) -> ClientResult<Transaction> {
    let required: Vec<&AccountMeta> =
        prepared.instruction.accounts.iter().filter(|m| m.is_signer).collect();

    let mut signers: Vec<&Keypair> = vec![payer];
    for &kp in extra_signers {
        let key = kp.pubkey();
        if key != payer.pubkey() && required.iter().any(|m| m.pubkey == key) {
            signers.push(kp);
        }
    }

    let mut tx = Transaction::new_with_payer(
        std::slice::from_ref(&prepared.instruction),
        Some(&payer.pubkey()),
    );
    tx.try_sign(&signers[..], recent_blockhash)
        .map_err(|e| ClientError::Signing { message: e.to_string() })?;
    Ok(tx)
}

/// Print what would be sent, without touching the network.
pub fn print_dry_run(prepared: &PreparedInstruction) {
    println!("📋 Instruction: {}", prepared.name);
    println!();
    println!("Accounts:");
    for (name, meta) in prepared.account_names.iter().zip(&prepared.instruction.accounts) {
        let mut flags = vec![];
        if meta.is_writable { flags.push("mut"); }
        if meta.is_signer { flags.push("signer"); }
        let flags_str = if flags.is_empty() { String::new() } else { format!(" [{}]", flags.join(", ")) };
        println!("  📦 {} → {}{}", name, meta.pubkey, flags_str);
    }
    println!();
    println!("Arguments (parsed):");
    for (name, val) in &prepared.args {
        println!("  {} = {}", name, val);
    }
    println!();
    println!("  program: {}", prepared.instruction.program_id);
    println!("  Serialized instruction data ({} bytes):", prepared.instruction.data.len());
    println!("    {}", hex_encode(&prepared.instruction.data));
    println!();
    println!("⚠️  Dry run — omit --dry-run to submit the transaction.");
}

/// Submit `initialize`, wait for confirmation and print its logs.
///
/// The staking account is read back afterwards; failing to read or
/// decode it is only logged.
pub async fn submit_initialize<C: ChainClient + ?Sized>(
    client: &C,
    prepared: &PreparedInstruction,
    payer: &Keypair,
    staking_account: &Keypair,
) -> ClientResult<Submission> {
    let blockhash = client.latest_blockhash().await?;
    let tx = build_transaction(prepared, payer, &[staking_account], blockhash)?;

    info!(instruction = %prepared.name, "submitting transaction");
    let signature = client.send_and_confirm(&tx).await?;
    info!(%signature, "transaction confirmed");

    println!("Fetching transaction logs...");
    let logs = client.fetch_logs(&signature).await?;
    for line in &logs {
        println!("{}", line);
    }

    let address = staking_account.pubkey();
    let staking = match client.fetch_account_data(&address).await {
        Ok(data) => match StakingAccount::try_from_account_data(&data) {
            Ok(acc) => {
                print_staking_account(&address, &acc);
                Some(acc)
            }
            Err(e) => {
                warn!(%address, error = %e, "staking account has unexpected layout");
                None
            }
        },
        Err(e) => {
            warn!(%address, error = %e, "could not read back staking account");
            None
        }
    };

    Ok(Submission { signature, logs, staking_account: staking })
}

/// Prepare and submit `initialize`.
///
/// Setup failures are returned. A failed submission or log fetch is
/// printed together with any program logs it carries and yields
/// `Ok(None)`, so the run carries on.
pub async fn run_initialize<C: ChainClient + ?Sized>(
    client: &C,
    idl: &AnchorIdl,
    config: &ClientConfig,
    payer: &Keypair,
    staking_account: &Keypair,
) -> ClientResult<Option<Submission>> {
    let prepared = prepare_initialize(idl, config, &payer.pubkey(), &staking_account.pubkey())?;
    info!(program = %prepared.instruction.program_id, "initialize prepared");

    match submit_initialize(client, &prepared, payer, staking_account).await {
        Ok(submission) => {
            info!(signature = %submission.signature, "initialize complete");
            Ok(Some(submission))
        }
        Err(e) => {
            eprintln!("Transaction failed: {}", e);
            for line in e.logs() {
                eprintln!("  {}", line);
            }
            Ok(None)
        }
    }
}

fn print_staking_account(address: &Pubkey, acc: &StakingAccount) {
    println!("Staking account {}:", address);
    println!("  owner:          {}", Pubkey::new_from_array(acc.owner));
    println!("  token_mint:     {}", Pubkey::new_from_array(acc.token_mint));
    println!("  token_account:  {}", Pubkey::new_from_array(acc.token_account));
    println!("  is_initialized: {}", acc.is_initialized);
}
