//! Off-chain signed vouches.
//!
//! A signed vouch is a capability token: the voucher signs
//! `(vouchee, humanity, expiry)` under a fixed domain tag and hands the
//! token to the claimer, who presents it at `advance_state`. Nothing is
//! persisted unless the vouch is actually consumed.

use persona_crypto::{derive_address, sign_message, verify_signature};
use persona_types::{Address, HumanityId, KeyPair, PublicKey, Signature, Timestamp};
use serde::{Deserialize, Serialize};

/// Domain separation tag for vouch signatures.
const VOUCH_DOMAIN: &[u8] = b"persona/vouch/v1";

/// A vouch signed off-chain, verified at consumption time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignedVouch {
    /// The voucher's public key; their address is re-derived from it.
    pub voucher_key: PublicKey,
    /// The claimer being vouched for.
    pub vouchee: Address,
    /// The humanity the claim targets.
    pub humanity_id: HumanityId,
    /// The token is dead once `now >= expiry`.
    pub expiry: Timestamp,
    pub signature: Signature,
}

fn vouch_message(vouchee: Address, humanity_id: HumanityId, expiry: Timestamp) -> Vec<u8> {
    let mut message =
        Vec::with_capacity(VOUCH_DOMAIN.len() + vouchee.as_bytes().len() + 20 + 8);
    message.extend_from_slice(VOUCH_DOMAIN);
    message.extend_from_slice(vouchee.as_bytes());
    message.extend_from_slice(humanity_id.as_bytes());
    message.extend_from_slice(&expiry.as_secs().to_be_bytes());
    message
}

impl SignedVouch {
    /// Create and sign a vouch token.
    pub fn sign(
        keypair: &KeyPair,
        vouchee: Address,
        humanity_id: HumanityId,
        expiry: Timestamp,
    ) -> Self {
        let message = vouch_message(vouchee, humanity_id, expiry);
        Self {
            voucher_key: keypair.public.clone(),
            vouchee,
            humanity_id,
            expiry,
            signature: sign_message(&message, &keypair.private),
        }
    }

    /// The address this token binds to as the voucher.
    pub fn voucher_address(&self) -> Address {
        derive_address(&self.voucher_key)
    }

    /// Signature check only; liveness and expiry are the consumer's job.
    pub fn has_valid_signature(&self) -> bool {
        let message = vouch_message(self.vouchee, self.humanity_id, self.expiry);
        verify_signature(&message, &self.signature, &self.voucher_key)
    }

    /// Full consumption-time validity for a given claim at `now`.
    pub fn is_valid_for(
        &self,
        vouchee: Address,
        humanity_id: HumanityId,
        now: Timestamp,
    ) -> bool {
        self.vouchee == vouchee
            && self.humanity_id == humanity_id
            && now < self.expiry
            && self.has_valid_signature()
    }
}
