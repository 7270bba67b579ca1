//! Paywire wire format
//!
//! Compact, versioned binary encoding for payment negotiation between a payer,
//! a payee and their servers, small enough to travel over NFC.
//!
//! - [`PaymentRequest`] / [`PaymentResponse`]: leaf messages, signed by their
//!   author through a [`KeyProvider`]
//! - [`ServerPaymentRequest`] / [`ServerPaymentResponse`]: bundle one or two
//!   signed leaf messages behind 2-byte length prefixes
//! - [`InitMessagePayee`]: unsigned opener of a payee-initiated payment
//! - [`decode`] / [`decode_message`]: decode by expected type
//!
//! ```
//! use paywire_protocol::{
//!     Currency, KeyProvider, PaymentRequest, PkiAlgorithm, Secp256k1Provider,
//!     SerializableObject, Signed, SignedPayload,
//! };
//!
//! let provider = Secp256k1Provider;
//! let keys = provider.generate_key_pair(PkiAlgorithm::Default)?;
//!
//! let request = PaymentRequest::new(
//!     PkiAlgorithm::Default, 1, "buyer", "seller", Currency::Btc, 12, 1_705_320_000_000,
//! )?
//! .sign(&provider, &keys.private_key)?;
//!
//! let bytes = request.encode()?;
//! let received: Signed<PaymentRequest> = paywire_protocol::decode(&bytes)?;
//! assert!(received.verify(&provider, &keys.public_key)?);
//! # Ok::<(), paywire_protocol::WireError>(())
//! ```

pub mod codes;
pub mod crypto;
pub mod cursor;
pub mod decoder;
pub mod error;
pub mod init_message_payee;
pub mod payment_request;
pub mod payment_response;
pub mod primitive;
pub mod server_payment_request;
pub mod server_payment_response;
pub mod signed;
pub mod traits;

pub use codes::{Currency, PkiAlgorithm, ServerResponseStatus, WireCode};
pub use crypto::{derive_public_key, sha256, KeyPair, KeyProvider, Secp256k1Provider};
pub use decoder::{decode, decode_message, Message, MessageKind};
pub use error::{CodeKind, WireError};
pub use init_message_payee::InitMessagePayee;
pub use payment_request::{InputAmount, PaymentRequest};
pub use payment_response::PaymentResponse;
pub use server_payment_request::ServerPaymentRequest;
pub use server_payment_response::{ServerPaymentResponse, MAX_RESPONSE_SIGNATURE_LEN};
pub use signed::Signed;
pub use traits::{SerializableObject, SignedPayload, CURRENT_VERSION};
