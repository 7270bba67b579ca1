//! Signed messages.
//!
//! # Type-State Flow
//!
//! ```text
//! Local:   T  ──sign──►  Signed<T>  ──encode──►  payload ‖ signature
//! Remote:  bytes  ──decode──►  Signed<T>  ──verify──►  bool
//! ```
//!
//! An unsigned message has no `encode`, so it cannot reach the wire:
//!
//! ```compile_fail
//! use paywire_protocol::{Currency, PaymentRequest, PkiAlgorithm, SerializableObject};
//!
//! let request = PaymentRequest::new(
//!     PkiAlgorithm::Default, 1, "buyer", "seller", Currency::Btc, 12, 1_705_320_000_000,
//! ).unwrap();
//! let _ = request.encode();
//! ```
//!
//! # Wire Format
//!
//! There is no signature length field: whatever follows the payload is the
//! signature. Zero trailing bytes means the message was never signed. Any
//! trailing data a transport appends would be taken as part of the signature
//! and fail verification.

use crate::crypto::KeyProvider;
use crate::cursor::Reader;
use crate::error::WireError;
use crate::traits::{require_input, SerializableObject, SignedPayload};

/// A message together with the signature over its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signed<T> {
    message: T,
    signature: Vec<u8>,
}

impl<T: SignedPayload> Signed<T> {
    /// Attach a signature obtained elsewhere. An empty signature is
    /// `NotSigned`; whether it is valid is only known after [`verify`](Self::verify).
    pub fn from_parts(message: T, signature: Vec<u8>) -> Result<Self, WireError> {
        if signature.is_empty() {
            return Err(WireError::NotSigned);
        }
        Ok(Self { message, signature })
    }

    pub fn message(&self) -> &T {
        &self.message
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    pub fn payload(&self) -> &[u8] {
        self.message.payload()
    }

    pub fn into_parts(self) -> (T, Vec<u8>) {
        (self.message, self.signature)
    }

    /// Length of [`encode`](SerializableObject::encode) output
    pub fn encoded_len(&self) -> usize {
        self.message.payload().len() + self.signature.len()
    }

    /// Check the signature over the payload with the signer's public key.
    ///
    /// A mismatch is `Ok(false)`. Errors come only from the key provider
    /// rejecting the key itself.
    pub fn verify<P: KeyProvider + ?Sized>(
        &self,
        provider: &P,
        public_key: &[u8],
    ) -> Result<bool, WireError> {
        let valid = provider.verify_bytes(
            public_key,
            self.message.pki_algorithm(),
            self.message.payload(),
            &self.signature,
        )?;
        if !valid {
            log::warn!(
                "signature rejected (key number {}, {} payload bytes)",
                self.message.key_number(),
                self.message.payload().len()
            );
        }
        Ok(valid)
    }
}

impl<T: SignedPayload> SerializableObject for Signed<T> {
    fn version(&self) -> u8 {
        self.message.version()
    }

    fn encode(&self) -> Result<Vec<u8>, WireError> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(self.message.payload());
        out.extend_from_slice(&self.signature);
        Ok(out)
    }

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        require_input(bytes)?;
        let mut reader = Reader::new(bytes);
        let message = T::decode_payload(&mut reader)?;
        let signature = reader.read_rest().to_vec();
        Self::from_parts(message, signature)
    }
}
