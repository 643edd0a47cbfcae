//! Anchor discriminators and identifier case conversion.
//!
//! Anchor prefixes instruction data and account data with the first eight
//! bytes of a SHA-256 hash over a namespaced name.

use sha2::{Digest, Sha256};

pub const DISCRIMINATOR_LEN: usize = 8;

fn sighash(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let preimage = format!("{}:{}", namespace, name);
    let hash = Sha256::digest(preimage.as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    out
}

/// Discriminator for an instruction, `sha256("global:<snake_name>")[..8]`.
pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    sighash("global", &snake_case(name))
}

/// Discriminator for an account type, `sha256("account:<PascalName>")[..8]`.
pub fn account_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    sighash("account", &pascal_case(name))
}

/// `stakingAccount`, `staking-account` and `staking_account` all map to
/// `staking_account`. Digits stay attached to the preceding word, so
/// `stake24M` becomes `stake24_m`.
pub fn snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower_or_digit = false;
    for ch in s.chars() {
        if ch == '-' || ch == '_' {
            if !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
            prev_lower_or_digit = false;
        } else if ch.is_ascii_uppercase() {
            if prev_lower_or_digit && !out.ends_with('_') {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower_or_digit = false;
        } else {
            out.push(ch);
            prev_lower_or_digit = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

pub fn pascal_case(s: &str) -> String {
    snake_case(s)
        .split('_')
        .map(|w| {
            let mut c = w.chars();
            match c.next() {
                None => String::new(),
                Some(ch) => ch.to_uppercase().collect::<String>() + c.as_str(),
            }
        })
        .collect()
}

pub fn camel_case(s: &str) -> String {
    let pascal = pascal_case(s);
    let mut c = pascal.chars();
    match c.next() {
        None => String::new(),
        Some(ch) => ch.to_lowercase().collect::<String>() + c.as_str(),
    }
}
