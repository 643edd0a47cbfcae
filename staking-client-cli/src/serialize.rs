//! Borsh serialization of IDL instruction data.

use borsh::BorshSerialize;
use staking_client_core::discriminator::instruction_discriminator;
use staking_client_core::error::{ClientError, ClientResult};
use staking_client_core::idl::IdlType;

use crate::parse::ParsedValue;

/// Serialize an instruction the way an Anchor program expects it.
///
/// Produces: the 8-byte instruction discriminator, then each argument
/// Borsh-encoded in IDL order.
pub fn encode_instruction_data(
    instruction_name: &str,
    parsed_args: &[(&IdlType, &ParsedValue)],
) -> ClientResult<Vec<u8>> {
    let mut out = instruction_discriminator(instruction_name).to_vec();
    for (ty, val) in parsed_args {
        serialize_value(&mut out, ty, val)?;
    }
    Ok(out)
}

/// Seed bytes for an argument-based PDA seed. Strings and byte vectors
/// contribute their raw bytes without the length prefix.
pub fn encode_seed(ty: &IdlType, val: &ParsedValue) -> ClientResult<Vec<u8>> {
    match val {
        ParsedValue::Str(s) => Ok(s.as_bytes().to_vec()),
        ParsedValue::Bytes(b) => Ok(b.clone()),
        _ => {
            let mut out = Vec::new();
            serialize_value(&mut out, ty, val)?;
            Ok(out)
        }
    }
}

fn mismatch(ty: &IdlType, val: &ParsedValue) -> ClientError {
    ClientError::Serialization {
        message: format!("value {} does not match type {:?}", val, ty),
    }
}

fn io_err(e: std::io::Error) -> ClientError {
    ClientError::Serialization { message: e.to_string() }
}

fn serialize_value(out: &mut Vec<u8>, ty: &IdlType, val: &ParsedValue) -> ClientResult<()> {
    match (ty, val) {
        (IdlType::Primitive(p), _) => serialize_primitive(out, p.as_str(), ty, val),
        (IdlType::Array { array }, ParsedValue::ByteArray(bytes)) => {
            if bytes.len() != array.1 {
                return Err(mismatch(ty, val));
            }
            out.extend_from_slice(bytes);
            Ok(())
        }
        (IdlType::Array { array }, ParsedValue::List(items)) => {
            if items.len() != array.1 {
                return Err(mismatch(ty, val));
            }
            for item in items {
                serialize_value(out, &array.0, item)?;
            }
            Ok(())
        }
        (IdlType::Vec { vec }, ParsedValue::List(items)) => {
            (items.len() as u32).serialize(out).map_err(io_err)?;
            for item in items {
                serialize_value(out, vec, item)?;
            }
            Ok(())
        }
        (IdlType::Option { option: _ }, ParsedValue::None) => {
            out.push(0);
            Ok(())
        }
        (IdlType::Option { option }, ParsedValue::Some(inner)) => {
            out.push(1);
            serialize_value(out, option, inner)
        }
        _ => Err(mismatch(ty, val)),
    }
}

fn serialize_primitive(
    out: &mut Vec<u8>,
    prim: &str,
    ty: &IdlType,
    val: &ParsedValue,
) -> ClientResult<()> {
    let res = match (prim, val) {
        ("bool", ParsedValue::Bool(v)) => v.serialize(out),
        ("u8", ParsedValue::U8(v)) => v.serialize(out),
        ("u16", ParsedValue::U16(v)) => v.serialize(out),
        ("u32", ParsedValue::U32(v)) => v.serialize(out),
        ("u64", ParsedValue::U64(v)) => v.serialize(out),
        ("u128", ParsedValue::U128(v)) => v.serialize(out),
        ("i8", ParsedValue::I8(v)) => v.serialize(out),
        ("i16", ParsedValue::I16(v)) => v.serialize(out),
        ("i32", ParsedValue::I32(v)) => v.serialize(out),
        ("i64", ParsedValue::I64(v)) => v.serialize(out),
        ("i128", ParsedValue::I128(v)) => v.serialize(out),
        ("string" | "String", ParsedValue::Str(s)) => s.serialize(out),
        ("bytes", ParsedValue::Bytes(b)) => b.serialize(out),
        ("publicKey" | "pubkey", ParsedValue::Pubkey(key)) => key.to_bytes().serialize(out),
        _ => return Err(mismatch(ty, val)),
    };
    res.map_err(io_err)
}
