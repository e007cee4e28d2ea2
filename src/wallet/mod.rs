use rand::rngs::OsRng;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey, ecdsa::Signature};
use sha2::{Digest, Sha256};

/// Generate a new secp256k1 keypair and return (priv_hex, pub_hex_compressed).
/// The hex of the compressed public key doubles as the account address.
pub fn generate_keypair_hex() -> (String, String) {
    let secp = Secp256k1::new();
    let (sk, pk) = secp.generate_keypair(&mut OsRng);
    let sk_hex = hex::encode(sk.secret_bytes());
    let pk_hex = hex::encode(pk.serialize()); // compressed (33 bytes)
    (sk_hex, pk_hex)
}

/// Canonical signing payload for a transfer: colon-separated field values,
/// amounts in their natural decimal form, an absent nonce rendered as the
/// literal `null`. Signer and verifier must produce the identical string.
pub fn signing_payload(
    sender: &str,
    recipient: &str,
    amount: f64,
    fee: f64,
    nonce: Option<u64>,
) -> String {
    let nonce_repr = nonce.map_or_else(|| "null".to_string(), |n| n.to_string());
    format!("{sender}:{recipient}:{amount}:{fee}:{nonce_repr}")
}

/// Sign a payload with a hex-encoded secret key; returns the hex DER signature.
/// Used by the test suite and by client tooling; the node itself never signs.
pub fn sign_payload_hex(priv_hex: &str, payload: &str) -> Result<String, &'static str> {
    let secp = Secp256k1::new();
    let sk_bytes = hex::decode(priv_hex).map_err(|_| "invalid private key hex")?;
    let sk = SecretKey::from_slice(&sk_bytes).map_err(|_| "invalid private key bytes")?;
    let msg = Message::from_digest(payload_digest(payload));
    let sig = secp.sign_ecdsa(&msg, &sk);
    Ok(hex::encode(sig.serialize_der()))
}

/// Verify a transfer signature. The sender identifier is itself the
/// hex-encoded compressed public key; the signature is hex DER over the
/// SHA-256 of the canonical payload. Every decode or verification failure
/// yields `false` rather than an error.
pub fn verify_transaction_signature(sender: &str, payload: &str, sig_hex: &str) -> bool {
    verify_signature_hex(sender, sig_hex, payload_digest(payload)).unwrap_or(false)
}

/// Verify a signature (hex DER) against the given pubkey (hex, compressed)
/// and message hash (32 bytes).
fn verify_signature_hex(pubkey_hex: &str, sig_hex: &str, msg32: [u8; 32]) -> Option<bool> {
    let secp = Secp256k1::verification_only();

    let sig_bytes = hex::decode(sig_hex).ok()?;
    let sig = Signature::from_der(&sig_bytes).ok()?;

    let pk_bytes = hex::decode(pubkey_hex).ok()?;
    let pk = PublicKey::from_slice(&pk_bytes).ok()?;

    let msg = Message::from_digest(msg32);
    Some(secp.verify_ecdsa(&msg, &sig, &pk).is_ok())
}

fn payload_digest(payload: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest[..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_renders_all_fields_colon_separated() {
        assert_eq!(
            signing_payload("alice", "bob", 1.5, 0.25, Some(0)),
            "alice:bob:1.5:0.25:0"
        );
        assert_eq!(
            signing_payload("alice", "bob", 1.0, 0.0, None),
            "alice:bob:1:0:null"
        );
    }

    #[test]
    fn sign_then_verify_roundtrip() {
        let (sk, pk) = generate_keypair_hex();
        let payload = signing_payload(&pk, "bob", 0.4, 0.05, Some(0));
        let sig = sign_payload_hex(&sk, &payload).unwrap();
        assert!(verify_transaction_signature(&pk, &payload, &sig));
    }

    #[test]
    fn tampered_payload_fails_verification() {
        let (sk, pk) = generate_keypair_hex();
        let payload = signing_payload(&pk, "bob", 0.4, 0.05, Some(0));
        let sig = sign_payload_hex(&sk, &payload).unwrap();

        let altered = signing_payload(&pk, "bob", 0.5, 0.05, Some(0));
        assert!(!verify_transaction_signature(&pk, &altered, &sig));
    }

    #[test]
    fn wrong_key_fails_verification() {
        let (sk, _) = generate_keypair_hex();
        let (_, other_pk) = generate_keypair_hex();
        let payload = signing_payload("x", "y", 1.0, 0.0, Some(0));
        let sig = sign_payload_hex(&sk, &payload).unwrap();
        assert!(!verify_transaction_signature(&other_pk, &payload, &sig));
    }

    #[test]
    fn garbage_inputs_yield_false_not_errors() {
        assert!(!verify_transaction_signature("not-hex", "payload", "zz"));
        assert!(!verify_transaction_signature("", "payload", ""));

        let (_, pk) = generate_keypair_hex();
        assert!(!verify_transaction_signature(&pk, "payload", "deadbeef"));
    }
}
