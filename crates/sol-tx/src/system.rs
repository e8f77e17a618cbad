//! System program instructions.

use crate::keys::PublicKey;
use crate::message::Instruction;

/// The System program id, `11111111111111111111111111111111`.
pub const SYSTEM_PROGRAM_ID: PublicKey = PublicKey::zeroed();

/// System program `Transfer` instruction index.
const TRANSFER_INDEX: u32 = 2;

/// Build a native SOL transfer of `lamports` from `from` to `to`.
///
/// Data layout: u32 LE instruction index (2) followed by u64 LE lamports.
pub fn transfer(from: &PublicKey, to: &PublicKey, lamports: u64) -> Instruction {
    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&TRANSFER_INDEX.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());

    Instruction::new(SYSTEM_PROGRAM_ID, vec![*from, *to], data)
}
