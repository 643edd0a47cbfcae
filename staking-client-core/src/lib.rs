//! # Staking Client Core
//!
//! IDL model, Anchor discriminators, account layouts and error types
//! shared by the token staking client.

pub mod discriminator;
pub mod error;
pub mod idl;
pub mod types;

pub mod prelude {
    pub use crate::discriminator::{account_discriminator, instruction_discriminator};
    pub use crate::error::{ClientError, ClientResult};
    pub use crate::idl::{AnchorIdl, IdlAccountItem, IdlInstruction, IdlType};
    pub use crate::types::StakingAccount;
}
