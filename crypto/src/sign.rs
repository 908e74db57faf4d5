//! Ed25519 message signing, verification, and signer recovery.

use relay_types::{Address, KeyPair, PrivateKey, PublicKey, RecoverableSignature, Signature};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};

use crate::derive_address;

/// Sign a message with a private key, returning the signature.
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    Signature(signing_key.sign(message).to_bytes())
}

/// Verify a signature against a message and public key.
///
/// Rejects non-canonical signatures and weak keys (`verify_strict`).
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify_strict(message, &dalek_sig).is_ok()
}

/// Sign a message, bundling the public key so the signer can be recovered.
pub fn sign_recoverable(message: &[u8], keypair: &KeyPair) -> RecoverableSignature {
    RecoverableSignature::new(keypair.public, sign_message(message, &keypair.private))
}

/// Recover the address that produced `signature` over `message`.
///
/// Returns `None` for malformed keys or signatures that do not verify.
pub fn recover_signer(message: &[u8], signature: &RecoverableSignature) -> Option<Address> {
    if !verify_signature(message, &signature.signature, &signature.public) {
        return None;
    }
    Some(derive_address(&signature.public))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    #[test]
    fn sign_and_verify() {
        let kp = keypair_from_seed(&[1u8; 32]);
        let msg = b"test message for the relay";
        let sig = sign_message(msg, &kp.private);
        assert!(verify_signature(msg, &sig, &kp.public));
    }

    #[test]
    fn wrong_message_fails() {
        let kp = keypair_from_seed(&[1u8; 32]);
        let sig = sign_message(b"correct message", &kp.private);
        assert!(!verify_signature(b"wrong message", &sig, &kp.public));
    }

    #[test]
    fn invalid_public_key() {
        let kp = keypair_from_seed(&[1u8; 32]);
        let sig = sign_message(b"test", &kp.private);
        assert!(!verify_signature(b"test", &sig, &PublicKey([0xFF; 32])));
    }

    #[test]
    fn recover_returns_signer_address() {
        let kp = keypair_from_seed(&[4u8; 32]);
        let sig = sign_recoverable(b"digest", &kp);
        assert_eq!(recover_signer(b"digest", &sig), Some(derive_address(&kp.public)));
    }

    #[test]
    fn recover_rejects_other_message() {
        let kp = keypair_from_seed(&[4u8; 32]);
        let sig = sign_recoverable(b"digest", &kp);
        assert_eq!(recover_signer(b"other", &sig), None);
    }

    #[test]
    fn recover_rejects_swapped_public_key() {
        let signer = keypair_from_seed(&[4u8; 32]);
        let impostor = keypair_from_seed(&[5u8; 32]);
        let mut sig = sign_recoverable(b"digest", &signer);
        sig.public = impostor.public;
        assert_eq!(recover_signer(b"digest", &sig), None);
    }

    #[test]
    fn recover_rejects_garbage() {
        let sig = RecoverableSignature::new(PublicKey([0u8; 32]), Signature([0u8; 64]));
        assert_eq!(recover_signer(b"digest", &sig), None);
    }
}
