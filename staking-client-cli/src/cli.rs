//! Human-readable views of the IDL.

use staking_client_core::discriminator::instruction_discriminator;
use staking_client_core::idl::{AnchorIdl, IdlInstruction, IdlType};

use crate::hex::hex_encode;

/// Print every instruction the IDL describes.
pub fn print_idl(idl: &AnchorIdl) {
    println!("🔧 {} v{}", idl.name, idl.version);
    if let Some(address) = idl.program_address() {
        println!("   address: {}", address);
    }
    println!();
    for ix in &idl.instructions {
        print_instruction(ix);
        println!();
    }
    if !idl.errors.is_empty() {
        println!("ERRORS:");
        for e in &idl.errors {
            println!("  {:<6} {:<28} {}", e.code, e.name, e.msg.as_deref().unwrap_or(""));
        }
    }
}

/// Print accounts and arguments of a single instruction.
pub fn print_instruction(ix: &IdlInstruction) {
    println!(
        "📋 {} — {} account(s), {} arg(s), discriminator {}",
        ix.name,
        ix.accounts.len(),
        ix.args.len(),
        hex_encode(&instruction_discriminator(&ix.name))
    );
    println!("  ACCOUNTS:");
    for acc in &ix.accounts {
        let mut flags = vec![];
        if acc.writable { flags.push("mut"); }
        if acc.signer { flags.push("signer"); }
        if acc.optional { flags.push("optional"); }
        let flags_str = if flags.is_empty() { String::new() } else { format!(" [{}]", flags.join(", ")) };
        let pda_note = if acc.pda.is_some() { " (PDA — auto-computed)" } else { "" };
        println!("    {}{}{}", acc.name, flags_str, pda_note);
    }
    if !ix.args.is_empty() {
        println!("  ARGS:");
        for arg in &ix.args {
            println!("    {:<20} {}", arg.name, idl_type_display(&arg.type_));
        }
    }
}

pub fn idl_type_display(ty: &IdlType) -> String {
    match ty {
        IdlType::Primitive(s) => s.clone(),
        IdlType::Vec { vec } => format!("Vec<{}>", idl_type_display(vec)),
        IdlType::Option { option } => format!("Option<{}>", idl_type_display(option)),
        IdlType::Defined { defined } => defined.name().to_string(),
        IdlType::Array { array } => format!("[{}; {}]", idl_type_display(&array.0), array.1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_types_display_like_rust() {
        let ty = IdlType::Option {
            option: Box::new(IdlType::Vec {
                vec: Box::new(IdlType::Array {
                    array: (Box::new(IdlType::Primitive("u8".into())), 32),
                }),
            }),
        };
        assert_eq!(idl_type_display(&ty), "Option<Vec<[u8; 32]>>");
    }
}
