//! IDL type-aware value parsing from CLI strings.

use solana_sdk::pubkey::Pubkey;
use staking_client_core::idl::IdlType;

use crate::hex::{decode_bytes_32, hex_decode, hex_encode};

/// A parsed CLI value with type information preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Str(String),
    Bytes(Vec<u8>),         // bytes (length-prefixed)
    Pubkey(Pubkey),
    ByteArray(Vec<u8>),     // [u8; N]
    List(Vec<ParsedValue>), // Vec<T> and [T; N] for non-byte T
    None,                   // Option::None
    Some(Box<ParsedValue>), // Option::Some
}

impl ParsedValue {
    pub fn from_pubkey(key: Pubkey) -> Self {
        ParsedValue::Pubkey(key)
    }
}

impl std::fmt::Display for ParsedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParsedValue::Bool(v) => write!(f, "{}", v),
            ParsedValue::U8(v) => write!(f, "{}", v),
            ParsedValue::U16(v) => write!(f, "{}", v),
            ParsedValue::U32(v) => write!(f, "{}", v),
            ParsedValue::U64(v) => write!(f, "{}", v),
            ParsedValue::U128(v) => write!(f, "{}", v),
            ParsedValue::I8(v) => write!(f, "{}", v),
            ParsedValue::I16(v) => write!(f, "{}", v),
            ParsedValue::I32(v) => write!(f, "{}", v),
            ParsedValue::I64(v) => write!(f, "{}", v),
            ParsedValue::I128(v) => write!(f, "{}", v),
            ParsedValue::Str(s) => write!(f, "\"{}\"", s),
            ParsedValue::Bytes(bytes) => write!(f, "0x{}", hex_encode(bytes)),
            ParsedValue::Pubkey(key) => write!(f, "{}", key),
            ParsedValue::ByteArray(bytes) => {
                if let Ok(s) = std::str::from_utf8(bytes) {
                    let trimmed = s.trim_end_matches('\0');
                    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
                        return write!(f, "\"{}\" (hex: {})", trimmed, hex_encode(bytes));
                    }
                }
                write!(f, "0x{}", hex_encode(bytes))
            }
            ParsedValue::List(vals) => {
                let strs: Vec<String> = vals.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", strs.join(", "))
            }
            ParsedValue::None => write!(f, "None"),
            ParsedValue::Some(inner) => write!(f, "Some({})", inner),
        }
    }
}

/// Parse a CLI string value according to its IDL type.
pub fn parse_value(raw: &str, ty: &IdlType) -> Result<ParsedValue, String> {
    match ty {
        IdlType::Primitive(p) => parse_primitive(raw, p),
        IdlType::Array { array } => parse_array(raw, &array.0, array.1),
        IdlType::Vec { vec } => parse_vec(raw, vec),
        IdlType::Option { option } => {
            if raw == "none" || raw == "null" || raw.is_empty() {
                Ok(ParsedValue::None)
            } else {
                Ok(ParsedValue::Some(Box::new(parse_value(raw, option)?)))
            }
        }
        IdlType::Defined { defined } => Err(format!(
            "User-defined type '{}' cannot be given on the command line",
            defined.name()
        )),
    }
}

macro_rules! parse_num {
    ($raw:expr, $ty:ty, $variant:ident) => {
        $raw.parse::<$ty>()
            .map(ParsedValue::$variant)
            .map_err(|e| format!("Invalid {} '{}': {}", stringify!($ty), $raw, e))
    };
}

fn parse_primitive(input: &str, prim: &str) -> Result<ParsedValue, String> {
    let raw = input.trim();
    match prim {
        "u8" => parse_num!(raw, u8, U8),
        "u16" => parse_num!(raw, u16, U16),
        "u32" => parse_num!(raw, u32, U32),
        "u64" => parse_num!(raw, u64, U64),
        "u128" => parse_num!(raw, u128, U128),
        "i8" => parse_num!(raw, i8, I8),
        "i16" => parse_num!(raw, i16, I16),
        "i32" => parse_num!(raw, i32, I32),
        "i64" => parse_num!(raw, i64, I64),
        "i128" => parse_num!(raw, i128, I128),
        "bool" => match raw {
            "true" | "1" | "yes" => Ok(ParsedValue::Bool(true)),
            "false" | "0" | "no" => Ok(ParsedValue::Bool(false)),
            _ => Err(format!("Invalid bool '{}': expected true/false", raw)),
        },
        "string" | "String" => Ok(ParsedValue::Str(input.to_string())),
        "publicKey" | "pubkey" => decode_bytes_32(raw)
            .map(|b| ParsedValue::Pubkey(Pubkey::new_from_array(b))),
        "bytes" => {
            let hex = raw.strip_prefix("0x").unwrap_or(raw);
            hex_decode(hex).map(ParsedValue::Bytes)
        }
        other => Err(format!("Unsupported primitive type '{}'", other)),
    }
}

fn parse_array(raw: &str, elem_type: &IdlType, size: usize) -> Result<ParsedValue, String> {
    match elem_type {
        IdlType::Primitive(p) if p == "u8" => {
            if raw.len() == size * 2 && raw.chars().all(|c| c.is_ascii_hexdigit()) {
                Ok(ParsedValue::ByteArray(hex_decode(raw)?))
            } else if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
                let bytes = hex_decode(hex)?;
                if bytes.len() != size {
                    return Err(format!("Expected {} bytes from hex, got {}", size, bytes.len()));
                }
                Ok(ParsedValue::ByteArray(bytes))
            } else {
                let str_bytes = raw.as_bytes();
                if str_bytes.len() > size {
                    return Err(format!(
                        "String '{}' is {} bytes, max {} for [u8; {}]",
                        raw, str_bytes.len(), size, size
                    ));
                }
                let mut bytes = vec![0u8; size];
                bytes[..str_bytes.len()].copy_from_slice(str_bytes);
                Ok(ParsedValue::ByteArray(bytes))
            }
        }
        _ => {
            let items = parse_list(raw, elem_type)?;
            if items.len() != size {
                return Err(format!("Expected {} values, got {}", size, items.len()));
            }
            Ok(ParsedValue::List(items))
        }
    }
}

fn parse_vec(raw: &str, elem_type: &IdlType) -> Result<ParsedValue, String> {
    if raw.trim().is_empty() {
        return Ok(ParsedValue::List(vec![]));
    }
    parse_list(raw, elem_type).map(ParsedValue::List)
}

fn parse_list(raw: &str, elem_type: &IdlType) -> Result<Vec<ParsedValue>, String> {
    raw.split(',')
        .map(|s| s.trim())
        .enumerate()
        .map(|(i, part)| parse_value(part, elem_type).map_err(|e| format!("Element [{}]: {}", i, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prim(name: &str) -> IdlType {
        IdlType::Primitive(name.to_string())
    }

    #[test]
    fn numbers_respect_their_width() {
        assert_eq!(parse_value("255", &prim("u8")).unwrap(), ParsedValue::U8(255));
        assert!(parse_value("256", &prim("u8")).is_err());
        assert_eq!(parse_value("-5", &prim("i64")).unwrap(), ParsedValue::I64(-5));
        assert!(parse_value("-5", &prim("u64")).is_err());
    }

    #[test]
    fn pubkey_accepts_base58() {
        let key = Pubkey::new_unique();
        assert_eq!(
            parse_value(&key.to_string(), &prim("publicKey")).unwrap(),
            ParsedValue::Pubkey(key)
        );
    }

    #[test]
    fn byte_array_pads_strings() {
        let ty = IdlType::Array { array: (Box::new(prim("u8")), 4) };
        assert_eq!(
            parse_value("ab", &ty).unwrap(),
            ParsedValue::ByteArray(vec![b'a', b'b', 0, 0])
        );
        assert_eq!(
            parse_value("0a0b0c0d", &ty).unwrap(),
            ParsedValue::ByteArray(vec![10, 11, 12, 13])
        );
        assert!(parse_value("abcde", &ty).is_err());
    }

    #[test]
    fn options_and_lists() {
        let opt = IdlType::Option { option: Box::new(prim("u32")) };
        assert_eq!(parse_value("none", &opt).unwrap(), ParsedValue::None);
        assert_eq!(
            parse_value("3", &opt).unwrap(),
            ParsedValue::Some(Box::new(ParsedValue::U32(3)))
        );

        let list = IdlType::Vec { vec: Box::new(prim("bool")) };
        assert_eq!(
            parse_value("true, no", &list).unwrap(),
            ParsedValue::List(vec![ParsedValue::Bool(true), ParsedValue::Bool(false)])
        );
        assert_eq!(parse_value("", &list).unwrap(), ParsedValue::List(vec![]));
        let err = parse_value("1,x", &IdlType::Vec { vec: Box::new(prim("u8")) }).unwrap_err();
        assert!(err.starts_with("Element [1]"));
    }
}
