//! The client must accept the IDL shapes `anchor build` has emitted over
//! time and resolve instructions regardless of name spelling.

use std::io::Write;
use std::path::PathBuf;

use staking_client_core::error::ClientError;
use staking_client_core::idl::{AnchorIdl, IdlSeed, IdlType};

fn workspace_idl() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../idl.json")
}

#[test]
fn test_bundled_idl_describes_initialize() {
    let idl = AnchorIdl::load(workspace_idl()).unwrap();
    assert_eq!(idl.name, "token_staking");
    assert_eq!(idl.program_address(), Some("kScf9gaYZfjVStDAL6V6tfhLWR29UKi2mK7aojJA8Xp"));

    let ix = idl.instruction("initialize").unwrap();
    let names: Vec<&str> = ix.accounts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["stakingAccount", "tokenMint", "user", "systemProgram", "tokenProgram"]
    );
    assert!(ix.accounts[0].writable && ix.accounts[0].signer);
    assert!(!ix.accounts[1].writable && !ix.accounts[1].signer);
    assert_eq!(ix.args.len(), 1);
    assert!(ix.args[0].type_.is_pubkey());
}

#[test]
fn test_instruction_lookup_accepts_both_spellings() {
    let idl = AnchorIdl::load(workspace_idl()).unwrap();
    assert_eq!(idl.instruction("stake24_m").unwrap().name, "stake24M");
    assert_eq!(idl.instruction("stake24M").unwrap().name, "stake24M");
}

#[test]
fn test_unknown_instruction_lists_available() {
    let idl = AnchorIdl::load(workspace_idl()).unwrap();
    let err = idl.instruction("close").unwrap_err();
    match &err {
        ClientError::UnknownInstruction { name, available } => {
            assert_eq!(name, "close");
            assert!(available.contains(&"initialize".to_string()));
        }
        _ => panic!("Expected UnknownInstruction, got {:?}", err),
    }
    assert!(err.to_string().contains("initialize"));
}

#[test]
fn test_new_style_keys_and_nested_types() {
    let json = r#"{
        "name": "vault",
        "instructions": [{
            "name": "deposit",
            "accounts": [
                { "name": "vault", "writable": true, "pda": { "seeds": [
                    { "kind": "const", "value": [118, 97, 117, 108, 116] },
                    { "kind": "account", "path": "authority" },
                    { "kind": "arg", "path": "label" }
                ] } },
                { "name": "authority", "signer": true },
                { "name": "referrer", "optional": true }
            ],
            "args": [
                { "name": "amounts", "type": { "vec": "u64" } },
                { "name": "memo", "type": { "option": "string" } },
                { "name": "label", "type": { "array": ["u8", 4] } },
                { "name": "config", "type": { "defined": { "name": "Config" } } }
            ]
        }]
    }"#;
    let idl = AnchorIdl::from_json(json).unwrap();
    assert_eq!(idl.version, "0.0.0");
    let ix = idl.instruction("deposit").unwrap();

    assert!(ix.accounts[0].writable);
    assert!(ix.accounts[1].signer);
    assert!(ix.accounts[2].optional);

    let seeds = &ix.accounts[0].pda.as_ref().unwrap().seeds;
    match &seeds[0] {
        IdlSeed::Const { value } => assert_eq!(value.as_bytes(), b"vault"),
        other => panic!("Expected const seed, got {:?}", other),
    }
    assert!(matches!(&seeds[1], IdlSeed::Account { path } if path == "authority"));
    assert!(matches!(&seeds[2], IdlSeed::Arg { path } if path == "label"));

    assert_eq!(
        ix.args[0].type_,
        IdlType::Vec { vec: Box::new(IdlType::Primitive("u64".into())) }
    );
    assert!(matches!(&ix.args[2].type_, IdlType::Array { array } if array.1 == 4));
    match &ix.args[3].type_ {
        IdlType::Defined { defined } => assert_eq!(defined.name(), "Config"),
        other => panic!("Expected defined type, got {:?}", other),
    }
}

#[test]
fn test_load_reports_path_on_failure() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();
    let err = AnchorIdl::load(file.path()).unwrap_err();
    assert!(matches!(err, ClientError::IdlParse { .. }));
    assert!(err.to_string().contains(&file.path().display().to_string()));

    let err = AnchorIdl::load("/nonexistent/idl.json").unwrap_err();
    assert!(matches!(err, ClientError::IdlRead { .. }));
}
