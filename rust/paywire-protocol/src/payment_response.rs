//! Server's answer to a payment request.
//!
//! ```text
//! version(1) · pkiAlgorithm(1) · keyNumber(1) · status(1) · [len(1)+errorMessage]
//! · len(1)+payer · len(1)+payee · currency(1) · amount(8) · timestamp(8)
//! ```
//!
//! The error message is on the wire exactly when the status is not SUCCESS.

use crate::codes::{Currency, PkiAlgorithm, ServerResponseStatus};
use crate::cursor::{put_code, put_i64, put_str8, Reader, MAX_STR8_LEN};
use crate::error::WireError;
use crate::traits::{
    check_distinct_users, check_key_number, check_positive, check_username, check_version,
    SignedPayload, CURRENT_VERSION,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentResponse {
    version: u8,
    pki_algorithm: PkiAlgorithm,
    key_number: u8,
    status: ServerResponseStatus,
    error_message: Option<String>,
    username_payer: String,
    username_payee: String,
    currency: Currency,
    amount: i64,
    timestamp: i64,
    payload: Vec<u8>,
}

impl PaymentResponse {
    /// A SUCCESS response.
    pub fn new(
        pki_algorithm: PkiAlgorithm,
        key_number: u8,
        username_payer: impl Into<String>,
        username_payee: impl Into<String>,
        currency: Currency,
        amount: i64,
        timestamp: i64,
    ) -> Result<Self, WireError> {
        Self::build(
            CURRENT_VERSION,
            pki_algorithm,
            key_number,
            ServerResponseStatus::Success,
            None,
            username_payer.into(),
            username_payee.into(),
            currency,
            amount,
            timestamp,
        )
    }

    /// A FAILURE or DUPLICATE_REQUEST response explaining what went wrong.
    #[allow(clippy::too_many_arguments)]
    pub fn with_error(
        pki_algorithm: PkiAlgorithm,
        key_number: u8,
        status: ServerResponseStatus,
        error_message: impl Into<String>,
        username_payer: impl Into<String>,
        username_payee: impl Into<String>,
        currency: Currency,
        amount: i64,
        timestamp: i64,
    ) -> Result<Self, WireError> {
        Self::build(
            CURRENT_VERSION,
            pki_algorithm,
            key_number,
            status,
            Some(error_message.into()),
            username_payer.into(),
            username_payee.into(),
            currency,
            amount,
            timestamp,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        version: u8,
        pki_algorithm: PkiAlgorithm,
        key_number: u8,
        status: ServerResponseStatus,
        error_message: Option<String>,
        username_payer: String,
        username_payee: String,
        currency: Currency,
        amount: i64,
        timestamp: i64,
    ) -> Result<Self, WireError> {
        check_version(version)?;
        check_key_number(key_number)?;
        match (status, &error_message) {
            (ServerResponseStatus::Success, None) => {}
            (ServerResponseStatus::Success, Some(_)) => {
                return Err(WireError::invalid(
                    "a successful response cannot carry an error message",
                ))
            }
            (_, Some(msg)) if !msg.is_empty() && msg.len() <= MAX_STR8_LEN => {}
            (_, _) => {
                return Err(WireError::invalid(format!(
                    "a {:?} response needs an error message of 1 to {} bytes",
                    status, MAX_STR8_LEN
                )))
            }
        }
        check_username("payer", &username_payer)?;
        check_username("payee", &username_payee)?;
        check_distinct_users(&username_payer, &username_payee)?;
        check_positive("amount", amount)?;
        check_positive("timestamp", timestamp)?;

        let mut response = Self {
            version,
            pki_algorithm,
            key_number,
            status,
            error_message,
            username_payer,
            username_payee,
            currency,
            amount,
            timestamp,
            payload: Vec::new(),
        };
        response.payload = response.build_payload();
        Ok(response)
    }

    fn build_payload(&self) -> Vec<u8> {
        let error_len = self.error_message.as_ref().map_or(0, |m| 1 + m.len());
        let mut out = Vec::with_capacity(
            4 + error_len + 1 + self.username_payer.len() + 1 + self.username_payee.len() + 1 + 16,
        );
        out.push(self.version);
        put_code(&mut out, self.pki_algorithm);
        out.push(self.key_number);
        put_code(&mut out, self.status);
        if let Some(msg) = &self.error_message {
            put_str8(&mut out, msg);
        }
        put_str8(&mut out, &self.username_payer);
        put_str8(&mut out, &self.username_payee);
        put_code(&mut out, self.currency);
        put_i64(&mut out, self.amount);
        put_i64(&mut out, self.timestamp);
        out
    }

    pub fn status(&self) -> ServerResponseStatus {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn username_payer(&self) -> &str {
        &self.username_payer
    }

    pub fn username_payee(&self) -> &str {
        &self.username_payee
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl SignedPayload for PaymentResponse {
    fn version(&self) -> u8 {
        self.version
    }

    fn pki_algorithm(&self) -> PkiAlgorithm {
        self.pki_algorithm
    }

    fn key_number(&self) -> u8 {
        self.key_number
    }

    fn payload(&self) -> &[u8] {
        &self.payload
    }

    fn decode_payload(reader: &mut Reader<'_>) -> Result<Self, WireError> {
        let version = reader.read_u8("version")?;
        let pki_algorithm = reader.read_code("pki algorithm")?;
        let key_number = reader.read_u8("key number")?;
        let status = reader.read_code("status")?;
        let error_message = match status {
            ServerResponseStatus::Success => None,
            _ => Some(reader.read_str8("error message")?),
        };
        let username_payer = reader.read_str8("payer username")?;
        let username_payee = reader.read_str8("payee username")?;
        let currency = reader.read_code("currency")?;
        let amount = reader.read_i64("amount")?;
        let timestamp = reader.read_i64("timestamp")?;

        Self::build(
            version,
            pki_algorithm,
            key_number,
            status,
            error_message,
            username_payer,
            username_payee,
            currency,
            amount,
            timestamp,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{KeyProvider, Secp256k1Provider};
    use crate::error::CodeKind;
    use crate::signed::Signed;
    use crate::traits::SerializableObject;

    const TS: i64 = 1_705_320_000_000;

    fn success() -> PaymentResponse {
        PaymentResponse::new(PkiAlgorithm::Default, 1, "buyer", "seller", Currency::Btc, 12, TS)
            .expect("valid response")
    }

    fn failure() -> PaymentResponse {
        PaymentResponse::with_error(
            PkiAlgorithm::Default,
            1,
            ServerResponseStatus::Failure,
            "insufficient funds",
            "buyer",
            "seller",
            Currency::Btc,
            12,
            TS,
        )
        .expect("valid response")
    }

    fn sign(response: PaymentResponse) -> (Signed<PaymentResponse>, Vec<u8>) {
        let provider = Secp256k1Provider;
        let pair = provider.generate_key_pair(PkiAlgorithm::Default).unwrap();
        let signed = response.sign(&provider, &pair.private_key).unwrap();
        (signed, pair.public_key)
    }

    #[test]
    fn success_layout() {
        let payload = success().payload().to_vec();
        assert_eq!(payload.len(), 4 + 1 + 5 + 1 + 6 + 1 + 8 + 8);
        assert_eq!(&payload[..5], &[0x01, 0x01, 0x01, 0x01, 5]);
        assert_eq!(&payload[5..10], b"buyer");
    }

    #[test]
    fn failure_layout_carries_message() {
        let payload = failure().payload().to_vec();
        let msg = "insufficient funds";
        assert_eq!(payload.len(), 4 + 1 + msg.len() + 1 + 5 + 1 + 6 + 1 + 8 + 8);
        assert_eq!(payload[3], 0x02);
        assert_eq!(payload[4] as usize, msg.len());
        assert_eq!(&payload[5..5 + msg.len()], msg.as_bytes());
    }

    #[test]
    fn error_message_rules() {
        let algo = PkiAlgorithm::Default;
        let with = |status, msg: &str| {
            PaymentResponse::with_error(
                algo, 1, status, msg, "buyer", "seller", Currency::Chf, 3, TS,
            )
        };
        assert!(with(ServerResponseStatus::Success, "oops")
            .unwrap_err()
            .is_invalid_argument());
        assert!(with(ServerResponseStatus::Failure, "")
            .unwrap_err()
            .is_invalid_argument());
        assert!(with(ServerResponseStatus::Failure, "e".repeat(256).as_str())
            .unwrap_err()
            .is_invalid_argument());
        assert!(with(ServerResponseStatus::DuplicateRequest, "seen before").is_ok());
    }

    #[test]
    fn constructor_rejects_bad_terms() {
        let algo = PkiAlgorithm::Default;
        let cases = [
            PaymentResponse::new(algo, 0, "buyer", "seller", Currency::Btc, 12, TS),
            PaymentResponse::new(algo, 1, "buyer", "BUYER", Currency::Btc, 12, TS),
            PaymentResponse::new(algo, 1, "buyer", "seller", Currency::Btc, 0, TS),
            PaymentResponse::new(algo, 1, "buyer", "seller", Currency::Btc, 12, -1),
            PaymentResponse::new(algo, 1, "", "seller", Currency::Btc, 12, TS),
        ];
        for case in cases {
            assert!(case.unwrap_err().is_invalid_argument());
        }
    }

    #[test]
    fn roundtrip_both_variants() {
        let provider = Secp256k1Provider;
        for response in [success(), failure()] {
            let (signed, public_key) = sign(response);
            let decoded = Signed::<PaymentResponse>::decode(&signed.encode().unwrap()).unwrap();
            assert_eq!(decoded, signed);
            assert!(decoded.verify(&provider, &public_key).unwrap());
        }
    }

    #[test]
    fn decoded_failure_exposes_message() {
        let (signed, _) = sign(failure());
        let decoded = Signed::<PaymentResponse>::decode(&signed.encode().unwrap()).unwrap();
        assert_eq!(decoded.message().status(), ServerResponseStatus::Failure);
        assert_eq!(decoded.message().error_message(), Some("insufficient funds"));
    }

    #[test]
    fn unknown_status_rejected() {
        let (signed, _) = sign(success());
        let mut bytes = signed.encode().unwrap();
        bytes[3] = 0x07;
        assert_eq!(
            Signed::<PaymentResponse>::decode(&bytes).unwrap_err(),
            WireError::UnknownCode {
                kind: CodeKind::ServerResponseStatus,
                code: 0x07
            }
        );
    }

    #[test]
    fn truncation_and_missing_signature() {
        let (signed, _) = sign(failure());
        let bytes = signed.encode().unwrap();
        let payload_len = signed.payload().len();
        for len in 1..payload_len {
            assert!(Signed::<PaymentResponse>::decode(&bytes[..len])
                .unwrap_err()
                .is_malformed_input());
        }
        assert!(Signed::<PaymentResponse>::decode(&bytes[..payload_len])
            .unwrap_err()
            .is_not_signed());
    }
}
