//! Decode by expected message type.
//!
//! The set of message types is closed, so callers either name the type
//! statically ([`decode`]) or pick a [`MessageKind`] at runtime
//! ([`decode_message`]), e.g. from a command-line argument.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WireError;
use crate::init_message_payee::InitMessagePayee;
use crate::payment_request::PaymentRequest;
use crate::payment_response::PaymentResponse;
use crate::server_payment_request::ServerPaymentRequest;
use crate::server_payment_response::ServerPaymentResponse;
use crate::signed::Signed;
use crate::traits::SerializableObject;

/// Decode `bytes` as a `T`.
pub fn decode<T: SerializableObject>(bytes: &[u8]) -> Result<T, WireError> {
    log::debug!(
        "decoding {} bytes as {}",
        bytes.len(),
        core::any::type_name::<T>()
    );
    T::decode(bytes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    PaymentRequest,
    PaymentResponse,
    ServerPaymentRequest,
    ServerPaymentResponse,
    InitMessagePayee,
}

impl MessageKind {
    pub const ALL: [MessageKind; 5] = [
        Self::PaymentRequest,
        Self::PaymentResponse,
        Self::ServerPaymentRequest,
        Self::ServerPaymentResponse,
        Self::InitMessagePayee,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PaymentRequest => "payment-request",
            Self::PaymentResponse => "payment-response",
            Self::ServerPaymentRequest => "server-payment-request",
            Self::ServerPaymentResponse => "server-payment-response",
            Self::InitMessagePayee => "init-message-payee",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| WireError::invalid(format!("unknown message kind: {}", s)))
    }
}

/// Any decoded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    PaymentRequest(Signed<PaymentRequest>),
    PaymentResponse(Signed<PaymentResponse>),
    ServerPaymentRequest(ServerPaymentRequest),
    ServerPaymentResponse(ServerPaymentResponse),
    InitMessagePayee(InitMessagePayee),
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::PaymentRequest(_) => MessageKind::PaymentRequest,
            Self::PaymentResponse(_) => MessageKind::PaymentResponse,
            Self::ServerPaymentRequest(_) => MessageKind::ServerPaymentRequest,
            Self::ServerPaymentResponse(_) => MessageKind::ServerPaymentResponse,
            Self::InitMessagePayee(_) => MessageKind::InitMessagePayee,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        match self {
            Self::PaymentRequest(m) => m.encode(),
            Self::PaymentResponse(m) => m.encode(),
            Self::ServerPaymentRequest(m) => m.encode(),
            Self::ServerPaymentResponse(m) => m.encode(),
            Self::InitMessagePayee(m) => m.encode(),
        }
    }
}

/// Decode `bytes` as the message type named by `kind`.
pub fn decode_message(kind: MessageKind, bytes: &[u8]) -> Result<Message, WireError> {
    Ok(match kind {
        MessageKind::PaymentRequest => Message::PaymentRequest(decode(bytes)?),
        MessageKind::PaymentResponse => Message::PaymentResponse(decode(bytes)?),
        MessageKind::ServerPaymentRequest => Message::ServerPaymentRequest(decode(bytes)?),
        MessageKind::ServerPaymentResponse => Message::ServerPaymentResponse(decode(bytes)?),
        MessageKind::InitMessagePayee => Message::InitMessagePayee(decode(bytes)?),
    })
}
