//! Account address derivation from public keys.
//!
//! An address is the first 20 bytes of Blake2b-256(public key). Vouch tokens
//! carry the signer's public key; consumers re-derive the address to bind
//! the token to a registered voucher.

use persona_types::{Address, PublicKey};

/// Derive the 20-byte account address of a public key.
pub fn derive_address(public_key: &PublicKey) -> Address {
    let hash = crate::blake2b_256(public_key.as_bytes());
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[..20]);
    Address::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{generate_keypair, keypair_from_seed};

    #[test]
    fn derive_is_deterministic() {
        let kp = keypair_from_seed(&[7u8; 32]);
        assert_eq!(derive_address(&kp.public), derive_address(&kp.public));
    }

    #[test]
    fn different_keys_different_addresses() {
        let k1 = generate_keypair();
        let k2 = generate_keypair();
        assert_ne!(derive_address(&k1.public), derive_address(&k2.public));
    }

    #[test]
    fn derived_address_is_nonzero() {
        let kp = generate_keypair();
        assert!(!derive_address(&kp.public).is_zero());
    }
}
