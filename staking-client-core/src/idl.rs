//! Anchor IDL (Interface Definition Language) types.
//!
//! The on-chain program publishes an IDL JSON file describing its
//! instructions, account layouts and error codes. This module defines the
//! deserializable IDL format the client is driven by. Both the legacy
//! Anchor key spelling (`isMut`, `isSigner`) and the newer one
//! (`writable`, `signer`) are accepted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::discriminator::snake_case;
use crate::error::{ClientError, ClientResult};

/// Top-level IDL for an Anchor program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorIdl {
    #[serde(default = "default_version")]
    pub version: String,
    pub name: String,
    pub instructions: Vec<IdlInstruction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accounts: Vec<IdlAccountType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<IdlAccountType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<IdlError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<IdlMetadata>,
}

fn default_version() -> String {
    "0.0.0".to_string()
}

/// Deployment metadata written by `anchor build` / `anchor deploy`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdlMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// An instruction in the IDL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    pub accounts: Vec<IdlAccountItem>,
    #[serde(default)]
    pub args: Vec<IdlArg>,
}

/// An account expected by an instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlAccountItem {
    pub name: String,
    #[serde(default, alias = "isMut")]
    pub writable: bool,
    #[serde(default, alias = "isSigner")]
    pub signer: bool,
    #[serde(default, alias = "isOptional", skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pda: Option<IdlPda>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
}

fn is_false(v: &bool) -> bool { !v }

/// PDA derivation specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlPda {
    pub seeds: Vec<IdlSeed>,
}

/// A seed component for PDA derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum IdlSeed {
    #[serde(rename = "const")]
    Const { value: IdlSeedValue },
    #[serde(rename = "account")]
    Account { path: String },
    #[serde(rename = "arg")]
    Arg { path: String },
}

/// Constant seeds appear either as a UTF-8 string or as raw bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdlSeedValue {
    Bytes(Vec<u8>),
    Str(String),
}

impl IdlSeedValue {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IdlSeedValue::Bytes(b) => b,
            IdlSeedValue::Str(s) => s.as_bytes(),
        }
    }
}

/// An instruction argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlArg {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: IdlType,
}

/// Type representation in the IDL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdlType {
    Primitive(String),
    Vec { vec: Box<IdlType> },
    Option { option: Box<IdlType> },
    Defined { defined: IdlDefined },
    Array { array: (Box<IdlType>, usize) },
}

/// `defined` is a bare name in legacy IDLs and `{ "name": .. }` in newer ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdlDefined {
    Name(String),
    Named { name: String },
}

impl IdlDefined {
    pub fn name(&self) -> &str {
        match self {
            IdlDefined::Name(n) | IdlDefined::Named { name: n } => n,
        }
    }
}

impl IdlType {
    /// True for the public key primitive under either spelling.
    pub fn is_pubkey(&self) -> bool {
        matches!(self, IdlType::Primitive(p) if p == "publicKey" || p == "pubkey")
    }
}

/// Account or user type definition in the IDL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlAccountType {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: IdlTypeDef,
}

/// Type definition (struct or enum).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlTypeDef {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<IdlField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<IdlEnumVariant>,
}

/// A field in a struct type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: IdlType,
}

/// An enum variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlEnumVariant {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<IdlField>,
}

/// Error definition in the IDL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlError {
    pub code: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl AnchorIdl {
    /// Parse an IDL from a JSON string.
    pub fn from_json(json: &str) -> ClientResult<Self> {
        serde_json::from_str(json).map_err(|e| ClientError::IdlParse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Read and parse an IDL file.
    pub fn load(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ClientError::IdlRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| ClientError::IdlParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Look up an instruction by name, in either snake_case or camelCase.
    pub fn instruction(&self, name: &str) -> ClientResult<&IdlInstruction> {
        let wanted = snake_case(name);
        self.instructions
            .iter()
            .find(|ix| snake_case(&ix.name) == wanted)
            .ok_or_else(|| ClientError::UnknownInstruction {
                name: name.to_string(),
                available: self.instructions.iter().map(|ix| ix.name.clone()).collect(),
            })
    }

    /// Program address recorded in the IDL metadata, if deployed.
    pub fn program_address(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.address.as_deref())
    }

    /// Find a program-defined error by its numeric code.
    pub fn error_for_code(&self, code: u32) -> Option<&IdlError> {
        self.errors.iter().find(|e| e.code == code)
    }

    /// Serialize the IDL to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
