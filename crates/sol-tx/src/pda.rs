//! Program-derived addresses.
//!
//! A PDA is `SHA-256(seed_0 || .. || seed_n || program_id || "ProgramDerivedAddress")`
//! that does not decompress to an Ed25519 point, so no private key can
//! ever sign for it. `find_program_address` appends a one-byte bump seed,
//! searching from 255 down to 0.

use sha2::{Digest, Sha256};

use crate::error::AddressError;
use crate::keys::PublicKey;

/// Maximum number of seeds, including the bump.
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed.
pub const MAX_SEED_LEN: usize = 32;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Derive the address for `seeds` under `program_id`.
///
/// Fails with [`AddressError::OnCurve`] when the hash happens to be a valid
/// curve point; callers that need a guaranteed result should use
/// [`find_program_address`].
pub fn create_program_address(
    seeds: &[&[u8]],
    program_id: &PublicKey,
) -> Result<PublicKey, AddressError> {
    if seeds.len() > MAX_SEEDS {
        return Err(AddressError::TooManySeeds);
    }
    if seeds.iter().any(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(AddressError::MaxSeedLengthExceeded);
    }

    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(program_id.as_bytes());
    hasher.update(PDA_MARKER);

    let address = PublicKey::new(hasher.finalize().into());
    if address.is_on_curve() {
        return Err(AddressError::OnCurve);
    }
    Ok(address)
}

/// Find the first off-curve address for `seeds`, returning it with its bump.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &PublicKey,
) -> Result<(PublicKey, u8), AddressError> {
    // The bump takes one of the seed slots.
    if seeds.len() >= MAX_SEEDS {
        return Err(AddressError::TooManySeeds);
    }

    for bump in (0u8..=255).rev() {
        let bump_seed = [bump];
        let mut with_bump: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 1);
        with_bump.extend_from_slice(seeds);
        with_bump.push(&bump_seed);

        match create_program_address(&with_bump, program_id) {
            Ok(address) => return Ok((address, bump)),
            Err(AddressError::OnCurve) => continue,
            Err(e) => return Err(e),
        }
    }

    Err(AddressError::NoViableBump)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
    const ASSOCIATED_TOKEN_PROGRAM: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";

    fn program() -> PublicKey {
        PublicKey::new([0x77; 32])
    }

    #[test]
    fn found_address_is_off_curve() {
        let (address, _) = find_program_address(&[b"agent", &[0xAA; 32]], &program()).unwrap();
        assert!(!address.is_on_curve());
    }

    #[test]
    fn find_matches_create_with_bump() {
        let owner = [0x11u8; 32];
        let (address, bump) = find_program_address(&[b"agent", &owner], &program()).unwrap();
        let recreated = create_program_address(&[b"agent", &owner, &[bump]], &program()).unwrap();
        assert_eq!(address, recreated);
    }

    #[test]
    fn derivation_is_deterministic() {
        let seeds: &[&[u8]] = &[b"mcp_server", b"server-1"];
        assert_eq!(
            find_program_address(seeds, &program()).unwrap(),
            find_program_address(seeds, &program()).unwrap()
        );
    }

    #[test]
    fn different_inputs_give_different_addresses() {
        let (a, _) = find_program_address(&[b"agent", b"one"], &program()).unwrap();
        let (b, _) = find_program_address(&[b"agent", b"two"], &program()).unwrap();
        let (c, _) = find_program_address(&[b"agent", b"one"], &PublicKey::new([0x78; 32])).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn seed_limits_are_enforced() {
        let long = [0u8; MAX_SEED_LEN + 1];
        assert_eq!(
            create_program_address(&[&long], &program()),
            Err(AddressError::MaxSeedLengthExceeded)
        );
        assert_eq!(
            find_program_address(&[&long], &program()),
            Err(AddressError::MaxSeedLengthExceeded)
        );

        let seeds: Vec<&[u8]> = vec![&b"s"[..]; MAX_SEEDS + 1];
        assert_eq!(
            create_program_address(&seeds, &program()),
            Err(AddressError::TooManySeeds)
        );

        let seeds: Vec<&[u8]> = vec![&b"s"[..]; MAX_SEEDS];
        assert_eq!(
            find_program_address(&seeds, &program()),
            Err(AddressError::TooManySeeds)
        );
    }

    #[test]
    fn associated_token_style_derivation() {
        let token_program: PublicKey = TOKEN_PROGRAM.parse().unwrap();
        let ata_program: PublicKey = ASSOCIATED_TOKEN_PROGRAM.parse().unwrap();
        let wallet = [0x42u8; 32];
        let mint = [0xBBu8; 32];

        let (ata, _) = find_program_address(
            &[&wallet, token_program.as_bytes(), &mint],
            &ata_program,
        )
        .unwrap();
        assert!(!ata.is_on_curve());
        assert_eq!(ata.to_base58().parse::<PublicKey>().unwrap(), ata);
    }
}
