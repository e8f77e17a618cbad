//! Transaction message building and the message wire format.
//!
//! ```text
//! build() output:
//!   signature_count         u8 (placeholder, replaced by the signer)
//!   message:
//!     num_required_sigs     u8
//!     num_readonly_signed   u8
//!     num_readonly_unsigned u8
//!     num_accounts          compact-u16
//!     account_keys          32 bytes * num_accounts
//!     recent_blockhash      32 bytes
//!     num_instructions      compact-u16
//!     instructions[]        (see below)
//!
//! Instruction:
//!   program_id_index        u8
//!   num_accounts            compact-u16
//!   account_indices         u8 * num_accounts
//!   data_len                compact-u16
//!   data                    u8 * data_len
//! ```
//!
//! The account table is the fee payer followed by every program id and
//! instruction account in first-seen order, each key appearing once.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{BuildError, WireError};
use crate::keys::{Hash, PublicKey};

/// Flat fee charged per required signature.
pub const LAMPORTS_PER_SIGNATURE: u64 = 5_000;

/// Account indices are single bytes.
const MAX_ACCOUNT_TABLE: usize = 256;

// ---------------------------------------------------------------------------
// Compact-u16 encoding
// ---------------------------------------------------------------------------

/// Append `value` in compact-u16 form.
///
/// - Values 0..0x7f       -> 1 byte
/// - Values 0x80..0x3fff  -> 2 bytes (low 7 bits | 0x80, then the rest)
/// - Values 0x4000..      -> 3 bytes
pub fn encode_compact_u16(value: u16, out: &mut Vec<u8>) {
    let mut val = value as u32;
    loop {
        let mut byte = (val & 0x7f) as u8;
        val >>= 7;
        if val > 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if val == 0 {
            break;
        }
    }
}

/// Decode a compact-u16 from the front of `data`.
///
/// Returns `(value, bytes_consumed)`. Truncated input, overlong encodings
/// (a trailing zero continuation byte) and values above `u16::MAX` are
/// rejected.
pub fn decode_compact_u16(data: &[u8]) -> Result<(u16, usize), WireError> {
    let mut value: u32 = 0;
    for i in 0..3 {
        let byte = *data.get(i).ok_or(WireError::Truncated("compact-u16"))?;
        // The third byte only carries the top two bits of a u16.
        if i == 2 && byte > 0x03 {
            return Err(WireError::CompactU16Overflow);
        }
        value |= ((byte & 0x7f) as u32) << (7 * i);
        if byte & 0x80 == 0 {
            if i > 0 && byte == 0 {
                return Err(WireError::NonCanonicalCompactU16);
            }
            return Ok((value as u16, i + 1));
        }
    }
    Err(WireError::CompactU16Overflow)
}

fn encode_len(field: &'static str, len: usize, out: &mut Vec<u8>) -> Result<(), BuildError> {
    let value = u16::try_from(len).map_err(|_| BuildError::LengthOverflow { field, len })?;
    encode_compact_u16(value, out);
    Ok(())
}

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// A program invocation before compilation.
///
/// `accounts` is kept exactly as given: order matters, duplicates and the
/// program's own key are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: PublicKey,
    pub accounts: Vec<PublicKey>,
    /// Opaque, program-defined payload.
    pub data: Vec<u8>,
}

impl Instruction {
    pub fn new(program_id: PublicKey, accounts: Vec<PublicKey>, data: Vec<u8>) -> Self {
        Self {
            program_id,
            accounts,
            data,
        }
    }
}

/// The three-byte message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    /// Number of required signatures (the first N account keys sign).
    pub num_required_signatures: u8,
    pub num_readonly_signed_accounts: u8,
    pub num_readonly_unsigned_accounts: u8,
}

impl MessageHeader {
    /// The fee payer is the only signer.
    pub const SINGLE_SIGNER: Self = Self {
        num_required_signatures: 1,
        num_readonly_signed_accounts: 0,
        num_readonly_unsigned_accounts: 0,
    };
}

/// An instruction whose keys have been replaced by account table indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

/// A compiled message: the exact bytes a signer signs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    /// Deduplicated account table, fee payer at index 0.
    pub account_keys: Vec<PublicKey>,
    pub recent_blockhash: Hash,
    pub instructions: Vec<CompiledInstruction>,
}

impl Message {
    /// Serialize to wire bytes (no signature-count prefix).
    pub fn serialize(&self) -> Result<Vec<u8>, BuildError> {
        if self.account_keys.len() > MAX_ACCOUNT_TABLE {
            return Err(BuildError::TooManyAccounts {
                count: self.account_keys.len(),
            });
        }

        let mut buf = Vec::with_capacity(3 + 3 + 32 * (self.account_keys.len() + 1) + 64);

        buf.push(self.header.num_required_signatures);
        buf.push(self.header.num_readonly_signed_accounts);
        buf.push(self.header.num_readonly_unsigned_accounts);

        encode_len("account table", self.account_keys.len(), &mut buf)?;
        for key in &self.account_keys {
            buf.extend_from_slice(key.as_bytes());
        }

        buf.extend_from_slice(self.recent_blockhash.as_bytes());

        encode_len("instruction list", self.instructions.len(), &mut buf)?;
        for ix in &self.instructions {
            buf.push(ix.program_id_index);
            encode_len("instruction accounts", ix.accounts.len(), &mut buf)?;
            buf.extend_from_slice(&ix.accounts);
            encode_len("instruction data", ix.data.len(), &mut buf)?;
            buf.extend_from_slice(&ix.data);
        }

        Ok(buf)
    }

    /// Parse message wire bytes. The whole slice must be consumed.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, WireError> {
        let mut reader = Reader::new(bytes);

        let header = MessageHeader {
            num_required_signatures: reader.u8("message header")?,
            num_readonly_signed_accounts: reader.u8("message header")?,
            num_readonly_unsigned_accounts: reader.u8("message header")?,
        };

        let num_accounts = reader.compact_u16()? as usize;
        let mut account_keys = Vec::with_capacity(num_accounts.min(MAX_ACCOUNT_TABLE));
        for _ in 0..num_accounts {
            let raw = reader.take(32, "account keys")?;
            let key =
                PublicKey::try_from_slice(raw).map_err(|_| WireError::Truncated("account keys"))?;
            account_keys.push(key);
        }

        // At least the fee payer signs, and the fee payer is never read-only.
        let required = header.num_required_signatures as usize;
        if required == 0
            || required > account_keys.len()
            || header.num_readonly_signed_accounts as usize >= required
            || header.num_readonly_unsigned_accounts as usize > account_keys.len() - required
        {
            return Err(WireError::InvalidHeader);
        }

        let raw_hash = reader.take(32, "recent blockhash")?;
        let recent_blockhash =
            Hash::try_from_slice(raw_hash).map_err(|_| WireError::Truncated("recent blockhash"))?;

        let check = |index: u8| {
            if (index as usize) < account_keys.len() {
                Ok(index)
            } else {
                Err(WireError::IndexOutOfRange {
                    index,
                    count: account_keys.len(),
                })
            }
        };

        let num_instructions = reader.compact_u16()? as usize;
        let mut instructions = Vec::with_capacity(num_instructions.min(64));
        for _ in 0..num_instructions {
            let program_id_index = check(reader.u8("instruction program index")?)?;

            let num_ix_accounts = reader.compact_u16()? as usize;
            let accounts = reader
                .take(num_ix_accounts, "instruction accounts")?
                .iter()
                .map(|&index| check(index))
                .collect::<Result<Vec<u8>, _>>()?;

            let data_len = reader.compact_u16()? as usize;
            let data = reader.take(data_len, "instruction data")?.to_vec();

            instructions.push(CompiledInstruction {
                program_id_index,
                accounts,
                data,
            });
        }

        let remaining = reader.remaining();
        if remaining > 0 {
            return Err(WireError::TrailingBytes(remaining));
        }

        Ok(Message {
            header,
            account_keys,
            recent_blockhash,
            instructions,
        })
    }

    /// The account keys that must sign, in signature order.
    pub fn signer_keys(&self) -> &[PublicKey] {
        let n = (self.header.num_required_signatures as usize).min(self.account_keys.len());
        &self.account_keys[..n]
    }

    /// Base fee for this message.
    pub fn fee(&self) -> u64 {
        LAMPORTS_PER_SIGNATURE * self.header.num_required_signatures as u64
    }
}

/// Forward-only cursor over wire bytes.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize, what: &'static str) -> Result<&'a [u8], WireError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(WireError::Truncated(what))?;
        let out = &self.data[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn u8(&mut self, what: &'static str) -> Result<u8, WireError> {
        Ok(self.take(1, what)?[0])
    }

    fn compact_u16(&mut self) -> Result<u16, WireError> {
        let (value, consumed) = decode_compact_u16(&self.data[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Deduplicating, order-preserving account table.
struct AccountTable {
    keys: Vec<PublicKey>,
    positions: HashMap<PublicKey, usize>,
}

impl AccountTable {
    fn new(fee_payer: PublicKey) -> Self {
        let mut table = Self {
            keys: Vec::new(),
            positions: HashMap::new(),
        };
        table.insert(fee_payer);
        table
    }

    /// Index of `key`, appending it if unseen.
    fn insert(&mut self, key: PublicKey) -> usize {
        if let Some(&index) = self.positions.get(&key) {
            return index;
        }
        let index = self.keys.len();
        self.keys.push(key);
        self.positions.insert(key, index);
        index
    }
}

/// Accumulates a fee payer, a blockhash and instructions, then emits the
/// canonical message bytes.
///
/// Single-use and single-threaded. `build` and `compile` take `&self`, so a
/// failed build leaves the accumulated state untouched and the same builder
/// can be fixed up and built again.
#[derive(Debug, Default)]
pub struct TransactionBuilder {
    fee_payer: Option<PublicKey>,
    recent_blockhash: Option<Hash>,
    instructions: Vec<Instruction>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fee payer, replacing any previous one.
    pub fn set_fee_payer(&mut self, fee_payer: PublicKey) -> &mut Self {
        self.fee_payer = Some(fee_payer);
        self
    }

    pub fn set_recent_blockhash(&mut self, blockhash: Hash) -> &mut Self {
        self.recent_blockhash = Some(blockhash);
        self
    }

    /// Append an instruction. Accounts are preserved exactly as given.
    pub fn add_instruction(
        &mut self,
        program_id: PublicKey,
        accounts: Vec<PublicKey>,
        data: impl Into<Vec<u8>>,
    ) -> &mut Self {
        self.instructions
            .push(Instruction::new(program_id, accounts, data.into()));
        self
    }

    pub fn push_instruction(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    pub fn fee_payer(&self) -> Option<&PublicKey> {
        self.fee_payer.as_ref()
    }

    pub fn recent_blockhash(&self) -> Option<&Hash> {
        self.recent_blockhash.as_ref()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Reset payer, blockhash and instructions so the builder can be reused.
    pub fn clear(&mut self) -> &mut Self {
        self.fee_payer = None;
        self.recent_blockhash = None;
        self.instructions.clear();
        self
    }

    /// Base fee the built transaction will be charged.
    pub fn estimate_fee(&self) -> u64 {
        LAMPORTS_PER_SIGNATURE * MessageHeader::SINGLE_SIGNER.num_required_signatures as u64
    }

    /// Compile accumulated state into a structured [`Message`].
    pub fn compile(&self) -> Result<Message, BuildError> {
        let fee_payer = self.fee_payer.ok_or(BuildError::MissingFeePayer)?;
        if self.instructions.is_empty() {
            return Err(BuildError::NoInstructions);
        }
        let recent_blockhash = self.recent_blockhash.ok_or(BuildError::MissingBlockhash)?;

        let mut table = AccountTable::new(fee_payer);
        let indexed: Vec<(usize, Vec<usize>)> = self
            .instructions
            .iter()
            .map(|ix| {
                let program_index = table.insert(ix.program_id);
                let account_indices = ix.accounts.iter().map(|k| table.insert(*k)).collect();
                (program_index, account_indices)
            })
            .collect();

        if table.keys.len() > MAX_ACCOUNT_TABLE {
            return Err(BuildError::TooManyAccounts {
                count: table.keys.len(),
            });
        }

        // Every index is now < 256.
        let instructions = indexed
            .into_iter()
            .zip(&self.instructions)
            .map(|((program_index, account_indices), ix)| CompiledInstruction {
                program_id_index: program_index as u8,
                accounts: account_indices.into_iter().map(|i| i as u8).collect(),
                data: ix.data.clone(),
            })
            .collect();

        debug!(
            accounts = table.keys.len(),
            instructions = self.instructions.len(),
            "compiled transaction message"
        );

        Ok(Message {
            header: MessageHeader::SINGLE_SIGNER,
            account_keys: table.keys,
            recent_blockhash,
            instructions,
        })
    }

    /// Emit the signature-count placeholder followed by the message bytes.
    ///
    /// The placeholder holds the number of required signatures; the signer
    /// strips it before signing.
    pub fn build(&self) -> Result<Vec<u8>, BuildError> {
        let message = self.compile()?;
        let body = message.serialize()?;

        let mut out = Vec::with_capacity(1 + body.len());
        out.push(message.header.num_required_signatures);
        out.extend_from_slice(&body);

        debug!(len = out.len(), "built unsigned transaction");
        Ok(out)
    }
}
