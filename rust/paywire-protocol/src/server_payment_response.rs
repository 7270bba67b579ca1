//! Server's verdict, as handed back to the clients.
//!
//! One response when payer and payee share a server, two when each party's
//! server issued its own.
//!
//! ```text
//! version(1) · nofPaymentResponses(1) · { len(2) · signed PaymentResponse } × nofPaymentResponses
//! ```

use crate::cursor::{put_block16, Reader, MAX_BLOCK16_LEN, MAX_STR8_LEN};
use crate::error::WireError;
use crate::payment_response::PaymentResponse;
use crate::signed::Signed;
use crate::traits::{check_version, require_input, SerializableObject, CURRENT_VERSION};

/// Longest signature a response may carry.
pub const MAX_RESPONSE_SIGNATURE_LEN: usize = MAX_STR8_LEN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerPaymentResponse {
    version: u8,
    payer: Signed<PaymentResponse>,
    payee: Option<Signed<PaymentResponse>>,
}

impl ServerPaymentResponse {
    pub fn new(payer: Signed<PaymentResponse>) -> Result<Self, WireError> {
        Self::build(CURRENT_VERSION, payer, None)
    }

    pub fn with_payee(
        payer: Signed<PaymentResponse>,
        payee: Signed<PaymentResponse>,
    ) -> Result<Self, WireError> {
        Self::build(CURRENT_VERSION, payer, Some(payee))
    }

    fn build(
        version: u8,
        payer: Signed<PaymentResponse>,
        payee: Option<Signed<PaymentResponse>>,
    ) -> Result<Self, WireError> {
        check_version(version)?;
        check_sub_response("payer", &payer)?;
        if let Some(payee) = &payee {
            check_sub_response("payee", payee)?;
        }
        Ok(Self {
            version,
            payer,
            payee,
        })
    }

    pub fn payer_response(&self) -> &Signed<PaymentResponse> {
        &self.payer
    }

    pub fn payee_response(&self) -> Option<&Signed<PaymentResponse>> {
        self.payee.as_ref()
    }

    pub fn nof_payment_responses(&self) -> u8 {
        if self.payee.is_some() {
            2
        } else {
            1
        }
    }
}

fn check_sub_response(role: &str, response: &Signed<PaymentResponse>) -> Result<(), WireError> {
    if response.encoded_len() > MAX_BLOCK16_LEN {
        return Err(WireError::invalid(format!(
            "the {}'s signed response is {} bytes, at most {} fit",
            role,
            response.encoded_len(),
            MAX_BLOCK16_LEN
        )));
    }
    if response.signature().len() > MAX_RESPONSE_SIGNATURE_LEN {
        return Err(WireError::invalid(format!(
            "the {}'s response signature is {} bytes, at most {} allowed",
            role,
            response.signature().len(),
            MAX_RESPONSE_SIGNATURE_LEN
        )));
    }
    Ok(())
}

impl SerializableObject for ServerPaymentResponse {
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
        out.push(self.nof_payment_responses());
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
        let nof_responses = reader.read_u8("number of payment responses")?;
        if !(1..=2).contains(&nof_responses) {
            return Err(WireError::malformed(format!(
                "number of payment responses must be 1 or 2, got {}",
                nof_responses
            )));
        }

        let payer_bytes = reader.read_block16("payer response")?;
        log::trace!("payer response: {} bytes", payer_bytes.len());
        let payer = Signed::<PaymentResponse>::decode(payer_bytes)?;

        let payee = if nof_responses == 2 {
            let payee_bytes = reader.read_block16("payee response")?;
            log::trace!("payee response: {} bytes", payee_bytes.len());
            Some(Signed::<PaymentResponse>::decode(payee_bytes)?)
        } else {
            None
        };

        if reader.remaining() > 0 {
            return Err(WireError::malformed(format!(
                "{} unexpected bytes after the last response at offset {}",
                reader.remaining(),
                reader.position()
            )));
        }

        Self::build(version, payer, payee)
    }
}
