//! Payment request negotiated between payer and payee.
//!
//! ```text
//! version(1) · pkiAlgorithm(1) · keyNumber(1) · len(1)+payer · len(1)+payee
//! · nofCurrencies(1) · currency(1) · amount(8) · [inputCurrency(1) · inputAmount(8)]
//! · timestamp(8)
//! ```

use crate::codes::{Currency, PkiAlgorithm};
use crate::cursor::{put_code, put_i64, put_str8, Reader};
use crate::error::WireError;
use crate::traits::{
    check_distinct_users, check_key_number, check_positive, check_username, check_version,
    SignedPayload, CURRENT_VERSION,
};

const NOF_CURRENCIES_SINGLE: u8 = 1;
const NOF_CURRENCIES_WITH_INPUT: u8 = 2;

/// The amount the user originally typed, in the currency they typed it in.
///
/// Display convenience only; it is not part of the negotiated terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputAmount {
    pub currency: Currency,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    version: u8,
    pki_algorithm: PkiAlgorithm,
    key_number: u8,
    username_payer: String,
    username_payee: String,
    currency: Currency,
    amount: i64,
    input: Option<InputAmount>,
    timestamp: i64,
    payload: Vec<u8>,
}

impl PaymentRequest {
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
            username_payer.into(),
            username_payee.into(),
            currency,
            amount,
            None,
            timestamp,
        )
    }

    /// Same as [`new`](Self::new), additionally carrying the amount in the
    /// currency the user entered it.
    #[allow(clippy::too_many_arguments)]
    pub fn with_input_currency(
        pki_algorithm: PkiAlgorithm,
        key_number: u8,
        username_payer: impl Into<String>,
        username_payee: impl Into<String>,
        currency: Currency,
        amount: i64,
        input_currency: Currency,
        input_amount: i64,
        timestamp: i64,
    ) -> Result<Self, WireError> {
        Self::build(
            CURRENT_VERSION,
            pki_algorithm,
            key_number,
            username_payer.into(),
            username_payee.into(),
            currency,
            amount,
            Some(InputAmount {
                currency: input_currency,
                amount: input_amount,
            }),
            timestamp,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        version: u8,
        pki_algorithm: PkiAlgorithm,
        key_number: u8,
        username_payer: String,
        username_payee: String,
        currency: Currency,
        amount: i64,
        input: Option<InputAmount>,
        timestamp: i64,
    ) -> Result<Self, WireError> {
        check_version(version)?;
        check_key_number(key_number)?;
        check_username("payer", &username_payer)?;
        check_username("payee", &username_payee)?;
        check_distinct_users(&username_payer, &username_payee)?;
        check_positive("amount", amount)?;
        if let Some(input) = &input {
            check_positive("input amount", input.amount)?;
        }
        check_positive("timestamp", timestamp)?;

        let mut request = Self {
            version,
            pki_algorithm,
            key_number,
            username_payer,
            username_payee,
            currency,
            amount,
            input,
            timestamp,
            payload: Vec::new(),
        };
        request.payload = request.build_payload();
        Ok(request)
    }

    fn build_payload(&self) -> Vec<u8> {
        let input_len = if self.input.is_some() { 1 + 8 } else { 0 };
        let mut out = Vec::with_capacity(
            3 + 1 + self.username_payer.len() + 1 + self.username_payee.len() + 1 + 1 + 8
                + input_len
                + 8,
        );
        out.push(self.version);
        put_code(&mut out, self.pki_algorithm);
        out.push(self.key_number);
        put_str8(&mut out, &self.username_payer);
        put_str8(&mut out, &self.username_payee);
        match &self.input {
            None => {
                out.push(NOF_CURRENCIES_SINGLE);
                put_code(&mut out, self.currency);
                put_i64(&mut out, self.amount);
            }
            Some(input) => {
                out.push(NOF_CURRENCIES_WITH_INPUT);
                put_code(&mut out, self.currency);
                put_i64(&mut out, self.amount);
                put_code(&mut out, input.currency);
                put_i64(&mut out, input.amount);
            }
        }
        put_i64(&mut out, self.timestamp);
        out
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

    pub fn input(&self) -> Option<InputAmount> {
        self.input
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// True when both requests describe the same transaction: payer, payee,
    /// currency, amount and timestamp. The input currency is ignored.
    pub fn requests_identic(&self, other: &PaymentRequest) -> bool {
        self.username_payer == other.username_payer
            && self.username_payee == other.username_payee
            && self.currency == other.currency
            && self.amount == other.amount
            && self.timestamp == other.timestamp
    }
}

impl SignedPayload for PaymentRequest {
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
        let username_payer = reader.read_str8("payer username")?;
        let username_payee = reader.read_str8("payee username")?;
        let nof_currencies = reader.read_u8("number of currencies")?;
        let currency = reader.read_code("currency")?;
        let amount = reader.read_i64("amount")?;
        let input = match nof_currencies {
            NOF_CURRENCIES_SINGLE => None,
            NOF_CURRENCIES_WITH_INPUT => Some(InputAmount {
                currency: reader.read_code("input currency")?,
                amount: reader.read_i64("input amount")?,
            }),
            other => {
                return Err(WireError::malformed(format!(
                    "number of currencies must be 1 or 2, got {}",
                    other
                )))
            }
        };
        let timestamp = reader.read_i64("timestamp")?;

        Self::build(
            version,
            pki_algorithm,
            key_number,
            username_payer,
            username_payee,
            currency,
            amount,
            input,
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

    fn request() -> PaymentRequest {
        PaymentRequest::new(PkiAlgorithm::Default, 1, "buyer", "seller", Currency::Btc, 12, TS)
            .expect("valid request")
    }

    fn signed(request: PaymentRequest) -> Signed<PaymentRequest> {
        let provider = Secp256k1Provider;
        let pair = provider.generate_key_pair(PkiAlgorithm::Default).unwrap();
        request.sign(&provider, &pair.private_key).expect("sign")
    }

    #[test]
    fn constructor_rejects_bad_arguments() {
        let algo = PkiAlgorithm::Default;
        let cases = [
            PaymentRequest::new(algo, 0, "buyer", "seller", Currency::Btc, 12, TS),
            PaymentRequest::new(algo, 1, "", "seller", Currency::Btc, 12, TS),
            PaymentRequest::new(algo, 1, "buyer", "", Currency::Btc, 12, TS),
            PaymentRequest::new(algo, 1, "x".repeat(256), "seller", Currency::Btc, 12, TS),
            PaymentRequest::new(algo, 1, "buyer", "BuyeR", Currency::Btc, 12, TS),
            PaymentRequest::new(algo, 1, "buyer", "seller", Currency::Btc, 0, TS),
            PaymentRequest::new(algo, 1, "buyer", "seller", Currency::Btc, -5, TS),
            PaymentRequest::new(algo, 1, "buyer", "seller", Currency::Btc, 12, 0),
            PaymentRequest::with_input_currency(
                algo, 1, "buyer", "seller", Currency::Btc, 12, Currency::Chf, 0, TS,
            ),
        ];
        for case in cases {
            assert!(case.unwrap_err().is_invalid_argument());
        }
    }

    #[test]
    fn username_limit_counts_bytes() {
        // 128 two-byte characters exceed the one-byte length prefix
        let long = "ü".repeat(128);
        assert!(PaymentRequest::new(PkiAlgorithm::Default, 1, long, "seller", Currency::Btc, 1, TS)
            .is_err());
        let fits = "x".repeat(255);
        assert!(PaymentRequest::new(PkiAlgorithm::Default, 1, fits, "seller", Currency::Btc, 1, TS)
            .is_ok());
    }

    #[test]
    fn payload_layout() {
        let pr = request();
        let payload = pr.payload();
        assert_eq!(payload.len(), 3 + 1 + 5 + 1 + 6 + 1 + 1 + 8 + 8);

        let mut expected = vec![0x01, 0x01, 0x01, 5];
        expected.extend_from_slice(b"buyer");
        expected.push(6);
        expected.extend_from_slice(b"seller");
        expected.extend_from_slice(&[1, 0x01]);
        expected.extend_from_slice(&12i64.to_be_bytes());
        expected.extend_from_slice(&TS.to_be_bytes());
        assert_eq!(payload, expected.as_slice());
    }

    #[test]
    fn payload_layout_with_input_currency() {
        let pr = PaymentRequest::with_input_currency(
            PkiAlgorithm::Default,
            3,
            "buyer",
            "seller",
            Currency::Btc,
            12,
            Currency::Chf,
            500,
            TS,
        )
        .unwrap();
        let payload = pr.payload();
        assert_eq!(payload.len(), 3 + 1 + 5 + 1 + 6 + 1 + 1 + 8 + 1 + 8 + 8);
        assert_eq!(payload[2], 3);
        let nof = 3 + 1 + 5 + 1 + 6;
        assert_eq!(payload[nof], 2);
        assert_eq!(payload[nof + 10], 0x02);
        assert_eq!(&payload[nof + 11..nof + 19], &500i64.to_be_bytes());
    }

    #[test]
    fn sign_encode_decode_verify() {
        let provider = Secp256k1Provider;
        let pair = provider.generate_key_pair(PkiAlgorithm::Default).unwrap();
        let other = provider.generate_key_pair(PkiAlgorithm::Default).unwrap();

        let pr = request().sign(&provider, &pair.private_key).unwrap();
        let encoded = pr.encode().unwrap();
        assert_eq!(encoded.len(), pr.payload().len() + pr.signature().len());
        assert_eq!(&encoded[..pr.payload().len()], pr.payload());

        let decoded = Signed::<PaymentRequest>::decode(&encoded).unwrap();
        assert_eq!(decoded, pr);
        assert!(decoded.verify(&provider, &pair.public_key).unwrap());
        assert!(!decoded.verify(&provider, &other.public_key).unwrap());
    }

    #[test]
    fn decode_with_input_currency() {
        let pr = PaymentRequest::with_input_currency(
            PkiAlgorithm::Default,
            1,
            "buyer",
            "seller",
            Currency::Btc,
            12,
            Currency::Chf,
            7,
            TS,
        )
        .unwrap();
        let pr = signed(pr);
        let decoded = Signed::<PaymentRequest>::decode(&pr.encode().unwrap()).unwrap();
        assert_eq!(
            decoded.message().input(),
            Some(InputAmount {
                currency: Currency::Chf,
                amount: 7
            })
        );
        assert_eq!(decoded, pr);
    }

    #[test]
    fn payload_only_is_not_signed() {
        let pr = request();
        let err = Signed::<PaymentRequest>::decode(pr.payload()).unwrap_err();
        assert_eq!(err, WireError::NotSigned);
    }

    #[test]
    fn truncated_input_is_malformed() {
        let encoded = signed(request()).encode().unwrap();
        let payload_len = request().payload().len();
        for len in 1..payload_len {
            let err = Signed::<PaymentRequest>::decode(&encoded[..len]).unwrap_err();
            assert!(err.is_malformed_input(), "len {}: {:?}", len, err);
        }
        assert!(Signed::<PaymentRequest>::decode(&[])
            .unwrap_err()
            .is_malformed_input());
    }

    #[test]
    fn unknown_currency_rejected() {
        let mut encoded = signed(request()).encode().unwrap();
        let currency_at = 3 + 1 + 5 + 1 + 6 + 1;
        encoded[currency_at] = 0x09;
        assert_eq!(
            Signed::<PaymentRequest>::decode(&encoded).unwrap_err(),
            WireError::UnknownCode {
                kind: CodeKind::Currency,
                code: 0x09
            }
        );
    }

    #[test]
    fn bad_nof_currencies_rejected() {
        let mut encoded = signed(request()).encode().unwrap();
        encoded[3 + 1 + 5 + 1 + 6] = 3;
        assert!(Signed::<PaymentRequest>::decode(&encoded)
            .unwrap_err()
            .is_malformed_input());
    }

    #[test]
    fn decode_revalidates_business_rules() {
        // structurally valid bytes whose amount is zero
        let mut bytes = request().payload().to_vec();
        let amount_at = 3 + 1 + 5 + 1 + 6 + 2;
        bytes[amount_at..amount_at + 8].copy_from_slice(&0i64.to_be_bytes());
        bytes.extend_from_slice(b"signature");
        assert!(Signed::<PaymentRequest>::decode(&bytes)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn requests_identic_ignores_input_currency_and_key() {
        let a = request();
        let b = PaymentRequest::with_input_currency(
            PkiAlgorithm::Default,
            2,
            "buyer",
            "seller",
            Currency::Btc,
            12,
            Currency::Chf,
            99,
            TS,
        )
        .unwrap();
        assert!(a.requests_identic(&b));
        assert!(b.requests_identic(&a));

        let other_payee =
            PaymentRequest::new(PkiAlgorithm::Default, 1, "buyer", "shop", Currency::Btc, 12, TS)
                .unwrap();
        assert!(!a.requests_identic(&other_payee));
        let other_ts = PaymentRequest::new(
            PkiAlgorithm::Default,
            1,
            "buyer",
            "seller",
            Currency::Btc,
            12,
            TS + 1,
        )
        .unwrap();
        assert!(!a.requests_identic(&other_ts));
    }
}
