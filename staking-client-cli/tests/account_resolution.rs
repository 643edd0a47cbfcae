//! Account resolution from named addresses and IDL seeds.

use std::collections::HashMap;

use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;
use staking_client_cli::accounts::AccountResolver;
use staking_client_cli::parse::ParsedValue;
use staking_client_cli::tx::{parse_args, prepare_instruction};
use staking_client_core::error::ClientError;
use staking_client_core::idl::AnchorIdl;

fn vault_idl() -> AnchorIdl {
    AnchorIdl::from_json(
        r#"{
            "name": "vault",
            "instructions": [{
                "name": "openVault",
                "accounts": [
                    { "name": "vault", "isMut": true, "isSigner": false, "pda": { "seeds": [
                        { "kind": "const", "type": "string", "value": "vault" },
                        { "kind": "account", "type": "publicKey", "path": "authority" },
                        { "kind": "arg", "type": "string", "path": "label" }
                    ] } },
                    { "name": "authority", "isMut": true, "isSigner": true },
                    { "name": "referrer", "isMut": false, "isSigner": false, "isOptional": true },
                    { "name": "systemProgram", "isMut": false, "isSigner": false }
                ],
                "args": [
                    { "name": "label", "type": "string" },
                    { "name": "limit", "type": "u64" }
                ]
            }]
        }"#,
    )
    .unwrap()
}

fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn test_pda_matches_find_program_address() {
    let idl = vault_idl();
    let program_id = Pubkey::new_unique();
    let authority = Pubkey::new_unique();

    let args = parse_args(&idl, "open_vault", &raw(&[("label", "main"), ("limit", "500")])).unwrap();
    let mut resolver = AccountResolver::new();
    resolver.insert("authority", authority);
    let prepared = prepare_instruction(&idl, "openVault", &program_id, &mut resolver, &args).unwrap();

    let (expected, _) = Pubkey::find_program_address(
        &[b"vault", authority.as_ref(), b"main"],
        &program_id,
    );
    let metas = &prepared.instruction.accounts;
    assert_eq!(metas[0].pubkey, expected);
    assert!(metas[0].is_writable && !metas[0].is_signer);
    assert_eq!(metas[1].pubkey, authority);
    // absent optional account is passed as the program id
    assert_eq!(metas[2].pubkey, program_id);
    assert_eq!(metas[3].pubkey, system_program::ID);

    // discriminator + (u32 len + "main") + u64
    assert_eq!(prepared.instruction.data.len(), 8 + 4 + 4 + 8);
    assert_eq!(&prepared.instruction.data[16..], &500u64.to_le_bytes());
}

#[test]
fn test_names_are_spelling_insensitive() {
    let mut resolver = AccountResolver::new();
    let key = Pubkey::new_unique();
    resolver.insert("token-mint", key);
    assert_eq!(resolver.get("tokenMint"), Some(key));
    assert_eq!(resolver.get("token_mint"), Some(key));
    assert_eq!(resolver.get("systemProgram"), Some(system_program::ID));
}

#[test]
fn test_pda_seed_needs_its_account() {
    let idl = vault_idl();
    let args = parse_args(&idl, "openVault", &raw(&[("label", "main"), ("limit", "1")])).unwrap();
    let mut resolver = AccountResolver::new();
    let err = prepare_instruction(&idl, "openVault", &Pubkey::new_unique(), &mut resolver, &args)
        .unwrap_err();
    match err {
        ClientError::Pda { account, message } => {
            assert_eq!(account, "vault");
            assert!(message.contains("authority"));
        }
        _ => panic!("Expected Pda error, got {:?}", err),
    }
}

#[test]
fn test_missing_required_account() {
    let idl = AnchorIdl::from_json(
        r#"{ "name": "p", "instructions": [{ "name": "touch", "accounts": [
            { "name": "target", "isMut": true, "isSigner": false }
        ], "args": [] }] }"#,
    )
    .unwrap();
    let mut resolver = AccountResolver::new();
    let err = prepare_instruction(&idl, "touch", &Pubkey::new_unique(), &mut resolver, &HashMap::new())
        .unwrap_err();
    assert!(matches!(err, ClientError::MissingAccount { name } if name == "target"));
}

#[test]
fn test_parse_args_reports_missing_and_invalid() {
    let idl = vault_idl();
    let err = parse_args(&idl, "openVault", &raw(&[("label", "main")])).unwrap_err();
    assert!(matches!(err, ClientError::MissingArgument { name } if name == "limit"));

    let err = parse_args(&idl, "openVault", &raw(&[("label", "main"), ("limit", "-3")])).unwrap_err();
    assert!(matches!(err, ClientError::InvalidArgument { ref name, .. } if name == "limit"));

    let args = parse_args(&idl, "openVault", &raw(&[("label", " padded "), ("limit", " 7 ")])).unwrap();
    assert_eq!(args["label"].1, ParsedValue::Str(" padded ".into()));
    assert_eq!(args["limit"].1, ParsedValue::U64(7));
}
