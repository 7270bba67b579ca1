//! Error types for wire encoding, decoding and signing

use core::fmt;

/// Which code registry rejected a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    Currency,
    PkiAlgorithm,
    ServerResponseStatus,
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Currency => write!(f, "currency"),
            Self::PkiAlgorithm => write!(f, "PKI algorithm"),
            Self::ServerResponseStatus => write!(f, "server response status"),
        }
    }
}

/// Errors that can occur while building, encoding, decoding or signing messages
///
/// None of these are transient. The caller has to fix its input or obtain a
/// new, correctly signed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// A business rule was violated while constructing a message
    InvalidArgument(String),
    /// The input was empty or ended before the layout was complete
    MalformedInput(String),
    /// A code byte is not part of its registry
    UnknownCode { kind: CodeKind, code: u8 },
    /// A signed message was expected but no signature is present
    NotSigned,
    /// The key provider could not parse the private key
    InvalidPrivateKey,
    /// The key provider could not parse the public key
    InvalidPublicKey,
}

impl WireError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput(reason.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }

    pub fn is_unknown_code(&self) -> bool {
        matches!(self, Self::UnknownCode { .. })
    }

    pub fn is_not_signed(&self) -> bool {
        matches!(self, Self::NotSigned)
    }
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Self::MalformedInput(msg) => write!(f, "malformed input: {}", msg),
            Self::UnknownCode { kind, code } => {
                write!(f, "unknown {} code: 0x{:02x}", kind, code)
            }
            Self::NotSigned => write!(f, "message is not signed"),
            Self::InvalidPrivateKey => write!(f, "invalid private key format"),
            Self::InvalidPublicKey => write!(f, "invalid public key format"),
        }
    }
}

impl std::error::Error for WireError {}
