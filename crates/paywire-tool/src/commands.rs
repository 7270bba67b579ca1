//! Command implementations behind the `paywire` binary.
//!
//! Every command returns one JSON event describing what it produced. Encoded
//! messages travel as hex strings.

use std::time::{SystemTime, UNIX_EPOCH};

use paywire_protocol::{
    decode_message, Currency, InitMessagePayee, KeyProvider, Message, MessageKind,
    PaymentRequest, PaymentResponse, SerializableObject, ServerPaymentRequest,
    ServerPaymentResponse, ServerResponseStatus, Signed, SignedPayload,
};
use serde_json::{json, Value};

use crate::config::ToolConfig;
use crate::error::ToolError;
use crate::keys::{decode_hex, read_key_file, write_key_file};

/// Milliseconds since the epoch, the timestamp unit carried in messages.
pub fn unix_ts_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

pub fn keygen<P: KeyProvider>(
    provider: &P,
    config: &ToolConfig,
    private_out: &str,
    public_out: &str,
) -> Result<Value, ToolError> {
    let algorithm = config.pki_algorithm()?;
    let pair = provider.generate_key_pair(algorithm)?;
    write_key_file(private_out, &pair.private_key)?;
    write_key_file(public_out, &pair.public_key)?;
    Ok(json!({
        "event": "key_pair_generated",
        "algorithm": algorithm.key_pair_algorithm(),
        "curve": algorithm.key_pair_specification(),
        "public_key": hex::encode(&pair.public_key),
        "private_key_path": private_out,
        "public_key_path": public_out,
    }))
}

/// Terms shared by requests and responses. `None` fields fall back to the
/// config or the current time.
#[derive(Debug, Clone, Default)]
pub struct Terms {
    pub payer: String,
    pub payee: String,
    pub currency: Option<Currency>,
    pub amount: i64,
    pub timestamp: Option<i64>,
}

impl Terms {
    fn currency(&self, config: &ToolConfig) -> Result<Currency, ToolError> {
        match self.currency {
            Some(currency) => Ok(currency),
            None => config.default_currency(),
        }
    }

    fn timestamp(&self) -> i64 {
        self.timestamp.unwrap_or_else(unix_ts_millis)
    }
}

pub fn request<P: KeyProvider>(
    provider: &P,
    config: &ToolConfig,
    terms: &Terms,
    input: Option<(Currency, i64)>,
) -> Result<Value, ToolError> {
    let algorithm = config.pki_algorithm()?;
    let currency = terms.currency(config)?;
    let request = match input {
        None => PaymentRequest::new(
            algorithm,
            config.key_number,
            terms.payer.as_str(),
            terms.payee.as_str(),
            currency,
            terms.amount,
            terms.timestamp(),
        )?,
        Some((input_currency, input_amount)) => PaymentRequest::with_input_currency(
            algorithm,
            config.key_number,
            terms.payer.as_str(),
            terms.payee.as_str(),
            currency,
            terms.amount,
            input_currency,
            input_amount,
            terms.timestamp(),
        )?,
    };
    let private_key = read_key_file(config.private_key_path()?)?;
    let signed = request.sign(provider, &private_key)?;
    Ok(encoded_event(
        MessageKind::PaymentRequest,
        &signed.encode()?,
    ))
}

pub fn response<P: KeyProvider>(
    provider: &P,
    config: &ToolConfig,
    terms: &Terms,
    status: ServerResponseStatus,
    error_message: Option<&str>,
) -> Result<Value, ToolError> {
    let algorithm = config.pki_algorithm()?;
    let currency = terms.currency(config)?;
    let response = match (status, error_message) {
        (ServerResponseStatus::Success, None) => PaymentResponse::new(
            algorithm,
            config.key_number,
            terms.payer.as_str(),
            terms.payee.as_str(),
            currency,
            terms.amount,
            terms.timestamp(),
        )?,
        (status, message) => PaymentResponse::with_error(
            algorithm,
            config.key_number,
            status,
            message.unwrap_or_default(),
            terms.payer.as_str(),
            terms.payee.as_str(),
            currency,
            terms.amount,
            terms.timestamp(),
        )?,
    };
    let private_key = read_key_file(config.private_key_path()?)?;
    let signed = response.sign(provider, &private_key)?;
    Ok(encoded_event(
        MessageKind::PaymentResponse,
        &signed.encode()?,
    ))
}

pub fn wrap_request(payer_hex: &str, payee_hex: Option<&str>) -> Result<Value, ToolError> {
    let payer: Signed<PaymentRequest> = paywire_protocol::decode(&decode_hex(payer_hex)?)?;
    let wrapper = match payee_hex {
        None => ServerPaymentRequest::new(payer)?,
        Some(payee_hex) => {
            let payee = paywire_protocol::decode(&decode_hex(payee_hex)?)?;
            ServerPaymentRequest::with_payee(payer, payee)?
        }
    };
    Ok(encoded_event(
        MessageKind::ServerPaymentRequest,
        &wrapper.encode()?,
    ))
}

pub fn wrap_response(payer_hex: &str, payee_hex: Option<&str>) -> Result<Value, ToolError> {
    let payer: Signed<PaymentResponse> = paywire_protocol::decode(&decode_hex(payer_hex)?)?;
    let wrapper = match payee_hex {
        None => ServerPaymentResponse::new(payer)?,
        Some(payee_hex) => {
            let payee = paywire_protocol::decode(&decode_hex(payee_hex)?)?;
            ServerPaymentResponse::with_payee(payer, payee)?
        }
    };
    Ok(encoded_event(
        MessageKind::ServerPaymentResponse,
        &wrapper.encode()?,
    ))
}

pub fn init_payee(
    config: &ToolConfig,
    payee: &str,
    currency: Option<Currency>,
    amount: i64,
) -> Result<Value, ToolError> {
    let currency = match currency {
        Some(currency) => currency,
        None => config.default_currency()?,
    };
    let init = InitMessagePayee::new(payee, currency, amount)?;
    Ok(encoded_event(MessageKind::InitMessagePayee, &init.encode()?))
}

/// Public keys to check signatures against. In wrappers `payer` applies to
/// the first sub-message and `payee` to the second; a single leaf uses `payer`.
#[derive(Debug, Clone, Default)]
pub struct VerifyKeys {
    pub payer: Option<Vec<u8>>,
    pub payee: Option<Vec<u8>>,
}

pub fn decode<P: KeyProvider>(
    provider: &P,
    kind: MessageKind,
    input_hex: &str,
    keys: &VerifyKeys,
) -> Result<Value, ToolError> {
    let bytes = decode_hex(input_hex)?;
    let message = decode_message(kind, &bytes)?;
    let mut event = match &message {
        Message::PaymentRequest(m) => describe_request(provider, m, keys.payer.as_deref())?,
        Message::PaymentResponse(m) => describe_response(provider, m, keys.payer.as_deref())?,
        Message::ServerPaymentRequest(m) => json!({
            "version": m.version(),
            "nof_signatures": m.nof_signatures(),
            "payer_request": describe_request(provider, m.payer_request(), keys.payer.as_deref())?,
            "payee_request": m
                .payee_request()
                .map(|r| describe_request(provider, r, keys.payee.as_deref()))
                .transpose()?,
        }),
        Message::ServerPaymentResponse(m) => json!({
            "version": m.version(),
            "nof_payment_responses": m.nof_payment_responses(),
            "payer_response": describe_response(provider, m.payer_response(), keys.payer.as_deref())?,
            "payee_response": m
                .payee_response()
                .map(|r| describe_response(provider, r, keys.payee.as_deref()))
                .transpose()?,
        }),
        Message::InitMessagePayee(m) => json!({
            "version": m.version(),
            "payee": m.username(),
            "currency": m.currency(),
            "amount": m.amount(),
        }),
    };
    event["event"] = json!("message_decoded");
    event["kind"] = json!(kind);
    event["bytes"] = json!(bytes.len());
    Ok(event)
}

fn encoded_event(kind: MessageKind, bytes: &[u8]) -> Value {
    json!({
        "event": "message_encoded",
        "kind": kind,
        "bytes": bytes.len(),
        "hex": hex::encode(bytes),
    })
}

fn verified<P: KeyProvider, T: SignedPayload>(
    provider: &P,
    signed: &Signed<T>,
    public_key: Option<&[u8]>,
) -> Result<Option<bool>, ToolError> {
    match public_key {
        Some(key) => Ok(Some(signed.verify(provider, key)?)),
        None => Ok(None),
    }
}

fn describe_request<P: KeyProvider>(
    provider: &P,
    signed: &Signed<PaymentRequest>,
    public_key: Option<&[u8]>,
) -> Result<Value, ToolError> {
    let m = signed.message();
    let mut value = json!({
        "version": m.version(),
        "pki_algorithm": m.pki_algorithm(),
        "key_number": m.key_number(),
        "payer": m.username_payer(),
        "payee": m.username_payee(),
        "currency": m.currency(),
        "amount": m.amount(),
        "timestamp": m.timestamp(),
        "signature": hex::encode(signed.signature()),
        "verified": verified(provider, signed, public_key)?,
    });
    if let Some(input) = m.input() {
        value["input_currency"] = json!(input.currency);
        value["input_amount"] = json!(input.amount);
    }
    Ok(value)
}

fn describe_response<P: KeyProvider>(
    provider: &P,
    signed: &Signed<PaymentResponse>,
    public_key: Option<&[u8]>,
) -> Result<Value, ToolError> {
    let m = signed.message();
    Ok(json!({
        "version": m.version(),
        "pki_algorithm": m.pki_algorithm(),
        "key_number": m.key_number(),
        "status": m.status(),
        "error_message": m.error_message(),
        "payer": m.username_payer(),
        "payee": m.username_payee(),
        "currency": m.currency(),
        "amount": m.amount(),
        "timestamp": m.timestamp(),
        "signature": hex::encode(signed.signature()),
        "verified": verified(provider, signed, public_key)?,
    }))
}
