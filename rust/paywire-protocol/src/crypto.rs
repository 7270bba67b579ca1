//! Boundary to the asymmetric key provider
//!
//! Messages never touch key material directly. They hand their payload to a
//! [`KeyProvider`] together with the [`PkiAlgorithm`] they were built for.

use rand::rngs::OsRng;
use secp256k1::{ecdsa, Message, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};

use crate::codes::PkiAlgorithm;
use crate::error::WireError;

/// Encoded key material as produced by a [`KeyProvider`].
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub public_key: Vec<u8>,
    pub private_key: Vec<u8>,
}

impl core::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Generates keys, signs and verifies byte strings for a named algorithm.
pub trait KeyProvider {
    fn generate_key_pair(&self, algorithm: PkiAlgorithm) -> Result<KeyPair, WireError>;

    fn sign_bytes(
        &self,
        private_key: &[u8],
        algorithm: PkiAlgorithm,
        bytes: &[u8],
    ) -> Result<Vec<u8>, WireError>;

    /// A signature that does not match is `Ok(false)`, not an error.
    fn verify_bytes(
        &self,
        public_key: &[u8],
        algorithm: PkiAlgorithm,
        bytes: &[u8],
        signature: &[u8],
    ) -> Result<bool, WireError>;
}

/// Compute SHA-256 hash of data
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// ECDSA over secp256k1
///
/// The payload is hashed with SHA-256 before signing and signatures are
/// DER-encoded. Public keys are 33-byte compressed points, private keys are
/// 32-byte scalars.
#[derive(Debug, Default, Clone, Copy)]
pub struct Secp256k1Provider;

impl KeyProvider for Secp256k1Provider {
    fn generate_key_pair(&self, algorithm: PkiAlgorithm) -> Result<KeyPair, WireError> {
        match algorithm {
            PkiAlgorithm::Default => {
                let secp = Secp256k1::new();
                let secret_key = SecretKey::new(&mut OsRng);
                let public_key = PublicKey::from_secret_key(&secp, &secret_key);
                Ok(KeyPair {
                    public_key: public_key.serialize().to_vec(),
                    private_key: secret_key.secret_bytes().to_vec(),
                })
            }
        }
    }

    fn sign_bytes(
        &self,
        private_key: &[u8],
        algorithm: PkiAlgorithm,
        bytes: &[u8],
    ) -> Result<Vec<u8>, WireError> {
        match algorithm {
            PkiAlgorithm::Default => {
                let secp = Secp256k1::signing_only();
                let secret_key =
                    SecretKey::from_slice(private_key).map_err(|_| WireError::InvalidPrivateKey)?;
                let msg = Message::from_digest(sha256(bytes));
                let sig = secp.sign_ecdsa(&msg, &secret_key);
                Ok(sig.serialize_der().to_vec())
            }
        }
    }

    fn verify_bytes(
        &self,
        public_key: &[u8],
        algorithm: PkiAlgorithm,
        bytes: &[u8],
        signature: &[u8],
    ) -> Result<bool, WireError> {
        match algorithm {
            PkiAlgorithm::Default => {
                let secp = Secp256k1::verification_only();
                let pubkey =
                    PublicKey::from_slice(public_key).map_err(|_| WireError::InvalidPublicKey)?;
                let sig = match ecdsa::Signature::from_der(signature) {
                    Ok(sig) => sig,
                    Err(_) => return Ok(false),
                };
                let msg = Message::from_digest(sha256(bytes));
                Ok(secp.verify_ecdsa(&msg, &sig, &pubkey).is_ok())
            }
        }
    }
}

/// Derive the compressed public key for a private key
pub fn derive_public_key(private_key: &[u8]) -> Result<Vec<u8>, WireError> {
    let secp = Secp256k1::signing_only();
    let secret_key = SecretKey::from_slice(private_key).map_err(|_| WireError::InvalidPrivateKey)?;
    Ok(PublicKey::from_secret_key(&secp, &secret_key)
        .serialize()
        .to_vec())
}
