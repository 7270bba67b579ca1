//! Closed code registries carried as single bytes on the wire.
//!
//! Every registry maps each variant to a unique, stable byte and back. The
//! mapping is an exhaustive `match`, so it is fixed at compile time and safe
//! to read from any thread. Decoding a byte that is not in the registry is a
//! hard failure; there is no fallback variant.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CodeKind, WireError};

/// A closed enumeration with a one-byte wire code.
pub trait WireCode: Sized + Copy + 'static {
    const KIND: CodeKind;

    /// Every variant, in code order.
    fn all() -> &'static [Self];

    fn code(self) -> u8;

    fn from_code(code: u8) -> Result<Self, WireError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Btc,
    Chf,
}

impl Currency {
    /// ISO-style abbreviation shown to users
    pub fn currency_code(self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Chf => "CHF",
        }
    }
}

impl WireCode for Currency {
    const KIND: CodeKind = CodeKind::Currency;

    fn all() -> &'static [Self] {
        &[Self::Btc, Self::Chf]
    }

    fn code(self) -> u8 {
        match self {
            Self::Btc => 0x01,
            Self::Chf => 0x02,
        }
    }

    fn from_code(code: u8) -> Result<Self, WireError> {
        match code {
            0x01 => Ok(Self::Btc),
            0x02 => Ok(Self::Chf),
            _ => Err(WireError::UnknownCode {
                kind: Self::KIND,
                code,
            }),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.currency_code())
    }
}

impl FromStr for Currency {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|currency| currency.currency_code().eq_ignore_ascii_case(s))
            .ok_or_else(|| WireError::invalid(format!("unknown currency: {}", s)))
    }
}

/// Supported asymmetric key algorithms and the signature scheme used with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PkiAlgorithm {
    Default,
}

impl PkiAlgorithm {
    /// Algorithm used to generate the key pair
    pub fn key_pair_algorithm(self) -> &'static str {
        match self {
            Self::Default => "ECDSA",
        }
    }

    /// Named curve for EC keys, key size for RSA keys
    pub fn key_pair_specification(self) -> &'static str {
        match self {
            Self::Default => "brainpoolp256r1",
        }
    }

    pub fn signature_algorithm(self) -> &'static str {
        match self {
            Self::Default => "SHA256withECDSA",
        }
    }
}

impl WireCode for PkiAlgorithm {
    const KIND: CodeKind = CodeKind::PkiAlgorithm;

    fn all() -> &'static [Self] {
        &[Self::Default]
    }

    fn code(self) -> u8 {
        match self {
            Self::Default => 0x01,
        }
    }

    fn from_code(code: u8) -> Result<Self, WireError> {
        match code {
            0x01 => Ok(Self::Default),
            _ => Err(WireError::UnknownCode {
                kind: Self::KIND,
                code,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerResponseStatus {
    Success,
    Failure,
    DuplicateRequest,
}

impl WireCode for ServerResponseStatus {
    const KIND: CodeKind = CodeKind::ServerResponseStatus;

    fn all() -> &'static [Self] {
        &[Self::Success, Self::Failure, Self::DuplicateRequest]
    }

    fn code(self) -> u8 {
        match self {
            Self::Success => 0x01,
            Self::Failure => 0x02,
            Self::DuplicateRequest => 0x03,
        }
    }

    fn from_code(code: u8) -> Result<Self, WireError> {
        match code {
            0x01 => Ok(Self::Success),
            0x02 => Ok(Self::Failure),
            0x03 => Ok(Self::DuplicateRequest),
            _ => Err(WireError::UnknownCode {
                kind: Self::KIND,
                code,
            }),
        }
    }
}
