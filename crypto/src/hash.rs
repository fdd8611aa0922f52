//! Blake2b hashing for addresses and cross-chain transfers.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use persona_types::{Address, HumanityId, Timestamp, TransferHash};

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Deterministic id of a cross-chain humanity transfer.
///
/// Bound to the humanity, the initiating timestamp and both proxy addresses,
/// so a replayed or rerouted message cannot reuse it.
pub fn transfer_hash(
    humanity_id: HumanityId,
    initiated_at: Timestamp,
    sender_proxy: Address,
    destination_proxy: Address,
) -> TransferHash {
    let secs = initiated_at.as_secs().to_be_bytes();
    TransferHash::new(blake2b_256_multi(&[
        humanity_id.as_bytes(),
        &secs,
        sender_proxy.as_bytes(),
        destination_proxy.as_bytes(),
    ]))
}
