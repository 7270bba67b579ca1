//! Payment request as submitted to the server.
//!
//! Carries the payer's signed request alone (payer-initiated) or together
//! with the payee's countersigned copy (payee-initiated).
//!
//! ```text
//! version(1) · nofSignatures(1) · { len(2) · signed PaymentRequest } × nofSignatures
//! ```

use crate::cursor::{put_block16, Reader, MAX_BLOCK16_LEN};
use crate::error::WireError;
use crate::payment_request::PaymentRequest;
use crate::signed::Signed;
use crate::traits::{check_version, require_input, SerializableObject, CURRENT_VERSION};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerPaymentRequest {
    version: u8,
    payer: Signed<PaymentRequest>,
    payee: Option<Signed<PaymentRequest>>,
}

impl ServerPaymentRequest {
    pub fn new(payer: Signed<PaymentRequest>) -> Result<Self, WireError> {
        Self::build(CURRENT_VERSION, payer, None)
    }

    /// Both parties signed the same terms. The two requests must agree on
    /// payer, payee, currency, amount and timestamp.
    pub fn with_payee(
        payer: Signed<PaymentRequest>,
        payee: Signed<PaymentRequest>,
    ) -> Result<Self, WireError> {
        Self::build(CURRENT_VERSION, payer, Some(payee))
    }

    fn build(
        version: u8,
        payer: Signed<PaymentRequest>,
        payee: Option<Signed<PaymentRequest>>,
    ) -> Result<Self, WireError> {
        check_version(version)?;
        check_sub_request("payer", &payer)?;
        if let Some(payee) = &payee {
            check_sub_request("payee", payee)?;
            if !payer.message().requests_identic(payee.message()) {
                return Err(WireError::invalid(
                    "the payer's and the payee's payment requests are not identic",
                ));
            }
        }
        Ok(Self {
            version,
            payer,
            payee,
        })
    }

    pub fn payer_request(&self) -> &Signed<PaymentRequest> {
        &self.payer
    }

    pub fn payee_request(&self) -> Option<&Signed<PaymentRequest>> {
        self.payee.as_ref()
    }

    pub fn nof_signatures(&self) -> u8 {
        if self.payee.is_some() {
            2
        } else {
            1
        }
    }
}

fn check_sub_request(role: &str, request: &Signed<PaymentRequest>) -> Result<(), WireError> {
    if request.encoded_len() > MAX_BLOCK16_LEN {
        return Err(WireError::invalid(format!(
            "the {}'s signed request is {} bytes, at most {} fit",
            role,
            request.encoded_len(),
            MAX_BLOCK16_LEN
        )));
    }
    Ok(())
}

impl SerializableObject for ServerPaymentRequest {
    fn version(&self) -> u8 {
        self.version
    }

    fn encode(&self) -> Result<Vec<u8>, WireError> {
        let payer = self.payer.encode()?;
        let payee = self.payee.as_ref().map(|p| p.encode()).transpose()?;

        let mut out = Vec::with_capacity(
            2 + 2 + payer.len() + payee.as_ref().map_or(0, |p| 2 + p.len()),
        );
        out.push(self.version);
        out.push(self.nof_signatures());
        put_block16(&mut out, &payer);
        if let Some(payee) = &payee {
            put_block16(&mut out, payee);
        }
        Ok(out)
    }

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        require_input(bytes)?;
        let mut reader = Reader::new(bytes);
        let version = reader.read_u8("version")?;
        let nof_signatures = reader.read_u8("number of signatures")?;
        if !(1..=2).contains(&nof_signatures) {
            return Err(WireError::malformed(format!(
                "number of signatures must be 1 or 2, got {}",
                nof_signatures
            )));
        }

        let payer_bytes = reader.read_block16("payer request")?;
        log::trace!("payer request: {} bytes", payer_bytes.len());
        let payer = Signed::<PaymentRequest>::decode(payer_bytes)?;

        let payee = if nof_signatures == 2 {
            let payee_bytes = reader.read_block16("payee request")?;
            log::trace!("payee request: {} bytes", payee_bytes.len());
            Some(Signed::<PaymentRequest>::decode(payee_bytes)?)
        } else {
            None
        };

        if reader.remaining() > 0 {
            return Err(WireError::malformed(format!(
                "{} unexpected bytes after the last request at offset {}",
                reader.remaining(),
                reader.position()
            )));
        }

        Self::build(version, payer, payee)
    }
}
