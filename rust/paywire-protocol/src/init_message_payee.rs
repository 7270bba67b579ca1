//! First message of a payee-initiated payment, sent by the payee over NFC.
//!
//! Not signed: it only proposes terms, which the payer then signs into a
//! [`PaymentRequest`](crate::PaymentRequest).
//!
//! ```text
//! version(1) · len(1)+payee · currency(1) · amount(8)
//! ```

use crate::codes::Currency;
use crate::cursor::{put_code, put_i64, put_str8, Reader};
use crate::error::WireError;
use crate::traits::{
    check_positive, check_username, check_version, require_input, SerializableObject,
    CURRENT_VERSION,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitMessagePayee {
    version: u8,
    username: String,
    currency: Currency,
    amount: i64,
}

impl InitMessagePayee {
    pub fn new(
        username: impl Into<String>,
        currency: Currency,
        amount: i64,
    ) -> Result<Self, WireError> {
        Self::build(CURRENT_VERSION, username.into(), currency, amount)
    }

    fn build(
        version: u8,
        username: String,
        currency: Currency,
        amount: i64,
    ) -> Result<Self, WireError> {
        check_version(version)?;
        check_username("payee", &username)?;
        check_positive("amount", amount)?;
        Ok(Self {
            version,
            username,
            currency,
            amount,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }
}

impl SerializableObject for InitMessagePayee {
    fn version(&self) -> u8 {
        self.version
    }

    fn encode(&self) -> Result<Vec<u8>, WireError> {
        let mut out = Vec::with_capacity(1 + 1 + self.username.len() + 1 + 8);
        out.push(self.version);
        put_str8(&mut out, &self.username);
        put_code(&mut out, self.currency);
        put_i64(&mut out, self.amount);
        Ok(out)
    }

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        require_input(bytes)?;
        let mut reader = Reader::new(bytes);
        let version = reader.read_u8("version")?;
        let username = reader.read_str8("payee username")?;
        let currency = reader.read_code("currency")?;
        let amount = reader.read_i64("amount")?;
        if reader.remaining() > 0 {
            return Err(WireError::malformed(format!(
                "{} unexpected bytes after the amount at offset {}",
                reader.remaining(),
                reader.position()
            )));
        }
        Self::build(version, username, currency, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_and_roundtrip() {
        let init = InitMessagePayee::new("seller", Currency::Chf, 1_000).unwrap();
        let bytes = init.encode().unwrap();

        let mut expected = vec![0x01, 6];
        expected.extend_from_slice(b"seller");
        expected.push(0x02);
        expected.extend_from_slice(&1_000i64.to_be_bytes());
        assert_eq!(bytes, expected);

        assert_eq!(InitMessagePayee::decode(&bytes).unwrap(), init);
    }

    #[test]
    fn validation() {
        assert!(InitMessagePayee::new("", Currency::Btc, 1)
            .unwrap_err()
            .is_invalid_argument());
        assert!(InitMessagePayee::new("seller", Currency::Btc, 0)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn truncated_or_padded_input() {
        let bytes = InitMessagePayee::new("seller", Currency::Btc, 5)
            .unwrap()
            .encode()
            .unwrap();
        for len in 0..bytes.len() {
            assert!(InitMessagePayee::decode(&bytes[..len])
                .unwrap_err()
                .is_malformed_input());
        }
        let mut padded = bytes;
        padded.push(0xff);
        assert!(InitMessagePayee::decode(&padded)
            .unwrap_err()
            .is_malformed_input());
    }
}
