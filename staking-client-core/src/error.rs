//! Structured error types for the staking client.
//!
//! Every failure on the path from reading the IDL to fetching transaction
//! logs is one of these variants, so the binary can print a single line
//! (plus any program logs) instead of a backtrace.

use thiserror::Error;

use crate::idl::AnchorIdl;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// First code Anchor hands out to `#[error_code]` enums.
pub const CUSTOM_ERROR_OFFSET: u32 = 6000;

#[derive(Error, Debug)]
pub enum ClientError {
    /// IDL file could not be read
    #[error("Failed to read IDL '{path}': {message}")]
    IdlRead { path: String, message: String },

    /// IDL file is not valid JSON or does not match the IDL shape
    #[error("Failed to parse IDL '{path}': {message}")]
    IdlParse { path: String, message: String },

    #[error("Instruction '{name}' not found in IDL (available: {})", available.join(", "))]
    UnknownInstruction { name: String, available: Vec<String> },

    #[error("Missing required argument '{name}'")]
    MissingArgument { name: String },

    #[error("Invalid value for argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    #[error("Account '{name}' was not provided")]
    MissingAccount { name: String },

    #[error("Invalid address '{input}': {message}")]
    InvalidAddress { input: String, message: String },

    /// PDA seeds could not be resolved
    #[error("Failed to derive PDA for '{account}': {message}")]
    Pda { account: String, message: String },

    #[error("Failed to load wallet '{path}': {message}")]
    Wallet { path: String, message: String },

    /// Account data does not match the expected layout
    #[error("Failed to decode account data: {message}")]
    AccountData { message: String },

    #[error("Failed to sign transaction: {message}")]
    Signing { message: String },

    #[error("Failed to serialize instruction data: {message}")]
    Serialization { message: String },

    /// Transport or node-side failure; `logs` holds preflight simulation output
    #[error("RPC error: {message}")]
    Rpc { message: String, logs: Vec<String> },

    /// The program rejected the instruction with a known error code
    #[error("Program error {code} ({name}): {msg}")]
    Program {
        code: u32,
        name: String,
        msg: String,
        logs: Vec<String>,
    },

    #[error("Transaction {signature} has no status metadata")]
    MissingMeta { signature: String },
}

impl ClientError {
    /// Program log lines carried by this error, if any.
    pub fn logs(&self) -> &[String] {
        match self {
            ClientError::Rpc { logs, .. } | ClientError::Program { logs, .. } => logs,
            _ => &[],
        }
    }

    /// Build a `Program` error from a raw custom code, resolving its name
    /// through the IDL or the Anchor framework table.
    pub fn program(code: u32, idl: Option<&AnchorIdl>, logs: Vec<String>) -> Self {
        let (name, msg) = describe_program_error(code, idl);
        ClientError::Program { code, name, msg, logs }
    }
}

/// Resolve a custom program error code to a `(name, message)` pair.
///
/// Codes from `CUSTOM_ERROR_OFFSET` upward belong to the program's own
/// error enum and are looked up in the IDL; lower codes are reserved by
/// the Anchor framework.
pub fn describe_program_error(code: u32, idl: Option<&AnchorIdl>) -> (String, String) {
    if code >= CUSTOM_ERROR_OFFSET {
        if let Some(e) = idl.and_then(|idl| idl.error_for_code(code)) {
            return (e.name.clone(), e.msg.clone().unwrap_or_default());
        }
        return ("Unknown".to_string(), format!("custom program error 0x{:x}", code));
    }
    match anchor_error(code) {
        Some((name, msg)) => (name.to_string(), msg.to_string()),
        None => ("Unknown".to_string(), format!("custom program error 0x{:x}", code)),
    }
}

fn anchor_error(code: u32) -> Option<(&'static str, &'static str)> {
    let entry = match code {
        100 => ("InstructionMissing", "8 byte instruction identifier not provided"),
        101 => ("InstructionFallbackNotFound", "Fallback functions are not supported"),
        102 => ("InstructionDidNotDeserialize", "The program could not deserialize the given instruction"),
        103 => ("InstructionDidNotSerialize", "The program could not serialize the given instruction"),
        2000 => ("ConstraintMut", "A mut constraint was violated"),
        2001 => ("ConstraintHasOne", "A has one constraint was violated"),
        2002 => ("ConstraintSigner", "A signer constraint was violated"),
        2003 => ("ConstraintRaw", "A raw constraint was violated"),
        2004 => ("ConstraintOwner", "An owner constraint was violated"),
        2005 => ("ConstraintRentExempt", "A rent exemption constraint was violated"),
        2006 => ("ConstraintSeeds", "A seeds constraint was violated"),
        3000 => ("AccountDiscriminatorAlreadySet", "The account discriminator was already set on this account"),
        3001 => ("AccountDiscriminatorNotFound", "No 8 byte discriminator was found on the account"),
        3002 => ("AccountDiscriminatorMismatch", "8 byte discriminator did not match what was expected"),
        3003 => ("AccountDidNotDeserialize", "Failed to deserialize the account"),
        3004 => ("AccountDidNotSerialize", "Failed to serialize the account"),
        3005 => ("AccountNotEnoughKeys", "Not enough account keys given to the instruction"),
        3006 => ("AccountNotMutable", "The given account is not mutable"),
        3007 => ("AccountOwnedByWrongProgram", "The given account is owned by a different program than expected"),
        3008 => ("InvalidProgramId", "Program ID was not as expected"),
        3009 => ("InvalidProgramExecutable", "Program account is not executable"),
        3010 => ("AccountNotSigner", "The given account did not sign"),
        3011 => ("AccountNotSystemOwned", "The given account is not owned by the system program"),
        3012 => ("AccountNotInitialized", "The program expected this account to be already initialized"),
        _ => return None,
    };
    Some(entry)
}
