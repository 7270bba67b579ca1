use crate::codes::PkiAlgorithm;
use crate::crypto::KeyProvider;
use crate::cursor::{Reader, MAX_STR8_LEN};
use crate::error::WireError;
use crate::signed::Signed;

/// Version every message built by this crate carries.
pub const CURRENT_VERSION: u8 = 1;

/// Anything that can be written to and read back from the wire.
pub trait SerializableObject: Sized {
    /// Layout revision, 1..=255
    fn version(&self) -> u8;

    fn encode(&self) -> Result<Vec<u8>, WireError>;

    /// Parse `bytes` and run the same validation the public constructors run.
    fn decode(bytes: &[u8]) -> Result<Self, WireError>;
}

/// A message whose payload is signed as a whole.
///
/// Implementors build their payload once at construction. The signature is
/// not part of the type; [`sign`](Self::sign) moves the value into
/// [`Signed`], which is the only form that can be encoded.
pub trait SignedPayload: Sized {
    fn version(&self) -> u8;

    fn pki_algorithm(&self) -> PkiAlgorithm;

    /// Which of the signer's keys produced the signature, 1..=255
    fn key_number(&self) -> u8;

    /// Every field except the signature, in wire order
    fn payload(&self) -> &[u8];

    /// Read the payload fields from `reader`, leaving the signature bytes
    /// unconsumed.
    fn decode_payload(reader: &mut Reader<'_>) -> Result<Self, WireError>;

    fn sign<P: KeyProvider + ?Sized>(
        self,
        provider: &P,
        private_key: &[u8],
    ) -> Result<Signed<Self>, WireError> {
        let signature = provider.sign_bytes(private_key, self.pki_algorithm(), self.payload())?;
        Signed::from_parts(self, signature)
    }
}

pub(crate) fn check_version(version: u8) -> Result<(), WireError> {
    if version == 0 {
        return Err(WireError::invalid("version must be between 1 and 255"));
    }
    Ok(())
}

pub(crate) fn check_key_number(key_number: u8) -> Result<(), WireError> {
    if key_number == 0 {
        return Err(WireError::invalid("key number must be between 1 and 255"));
    }
    Ok(())
}

pub(crate) fn require_input(bytes: &[u8]) -> Result<(), WireError> {
    if bytes.is_empty() {
        return Err(WireError::malformed("input is empty"));
    }
    Ok(())
}

/// Usernames travel with a one-byte length prefix.
pub(crate) fn check_username(role: &str, username: &str) -> Result<(), WireError> {
    if username.is_empty() || username.len() > MAX_STR8_LEN {
        return Err(WireError::invalid(format!(
            "the {}'s username cannot be empty or longer than {} bytes",
            role, MAX_STR8_LEN
        )));
    }
    Ok(())
}

pub(crate) fn check_distinct_users(payer: &str, payee: &str) -> Result<(), WireError> {
    if payer.to_lowercase() == payee.to_lowercase() {
        return Err(WireError::invalid(
            "the payee's username can't be equal to the payer's username",
        ));
    }
    Ok(())
}

pub(crate) fn check_positive(field: &str, value: i64) -> Result<(), WireError> {
    if value <= 0 {
        return Err(WireError::invalid(format!("the {} must be greater than 0", field)));
    }
    Ok(())
}
