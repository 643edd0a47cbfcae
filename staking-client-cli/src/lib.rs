//! IDL-driven client for the token staking program.
//!
//! Provides:
//! - Configuration from flags and the Anchor provider environment
//! - IDL type-aware argument parsing and Borsh serialization
//! - Account resolution, including PDA derivation from IDL seeds
//! - Transaction building, submission and log retrieval
//!
//! The `staking-cli` binary wires these together to create a staking
//! account with the `initialize` instruction.

pub mod accounts;
pub mod cli;
pub mod config;
pub mod hex;
pub mod parse;
pub mod pda;
pub mod rpc;
pub mod serialize;
pub mod tx;
