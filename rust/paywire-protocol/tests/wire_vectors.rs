//! Fixed byte layouts
//!
//! Signatures here are fixed placeholder bytes attached with
//! `Signed::from_parts`, so the expected encodings are fully deterministic.

use paywire_protocol::*;

const TS: i64 = 1_705_320_000_000;
const SIG: [u8; 4] = [0x30, 0x02, 0x01, 0x00];

fn request_without_input() -> Signed<PaymentRequest> {
    let request = PaymentRequest::new(
        PkiAlgorithm::Default,
        1,
        "buyer",
        "seller",
        Currency::Btc,
        12,
        TS,
    )
    .unwrap();
    Signed::from_parts(request, SIG.to_vec()).unwrap()
}

fn request_with_input() -> Signed<PaymentRequest> {
    let request = PaymentRequest::with_input_currency(
        PkiAlgorithm::Default,
        1,
        "buyer",
        "seller",
        Currency::Btc,
        12,
        Currency::Chf,
        1_500,
        TS,
    )
    .unwrap();
    Signed::from_parts(request, SIG.to_vec()).unwrap()
}

fn failure_response() -> Signed<PaymentResponse> {
    let response = PaymentResponse::with_error(
        PkiAlgorithm::Default,
        7,
        ServerResponseStatus::Failure,
        "no",
        "buyer",
        "seller",
        Currency::Chf,
        12,
        TS,
    )
    .unwrap();
    Signed::from_parts(response, SIG.to_vec()).unwrap()
}

#[test]
fn test_payment_request_bytes() {
    let bytes = request_without_input().encode().unwrap();
    assert_eq!(
        hex::encode(&bytes),
        concat!(
            "010101",             // version, pki algorithm, key number
            "05", "6275796572",   // "buyer"
            "06", "73656c6c6572", // "seller"
            "01",                 // one currency
            "01", "000000000000000c",
            "0000018d0cfe2a00",   // timestamp
            "30020100",           // signature
        )
    );
    // 3 + 6 + 7 + 1 + 9 + 8 payload bytes, then the signature
    assert_eq!(bytes.len(), 34 + SIG.len());
}

#[test]
fn test_payment_request_bytes_with_input_currency() {
    let bytes = request_with_input().encode().unwrap();
    assert_eq!(
        hex::encode(&bytes),
        concat!(
            "010101",
            "05", "6275796572",
            "06", "73656c6c6572",
            "02",                 // two currencies
            "01", "000000000000000c",
            "02", "00000000000005dc",
            "0000018d0cfe2a00",
            "30020100",
        )
    );
    assert_eq!(bytes.len(), 34 + 9 + SIG.len());
}

#[test]
fn test_payment_response_bytes() {
    let bytes = failure_response().encode().unwrap();
    assert_eq!(
        hex::encode(&bytes),
        concat!(
            "01010702",           // version, pki algorithm, key number, FAILURE
            "02", "6e6f",         // "no"
            "05", "6275796572",
            "06", "73656c6c6572",
            "02", "000000000000000c",
            "0000018d0cfe2a00",
            "30020100",
        )
    );
}

#[test]
fn test_server_payment_request_bytes() {
    let inner = request_without_input().encode().unwrap();
    let spr = ServerPaymentRequest::with_payee(request_without_input(), request_with_input())
        .unwrap();
    let bytes = spr.encode().unwrap();
    let inner_with_input = request_with_input().encode().unwrap();

    assert_eq!(&bytes[..2], &[0x01, 0x02]);
    assert_eq!(&bytes[2..4], &[0x00, 38]);
    assert_eq!(&bytes[4..4 + inner.len()], inner.as_slice());
    let second = 4 + inner.len();
    assert_eq!(&bytes[second..second + 2], &[0x00, 47]);
    assert_eq!(&bytes[second + 2..], inner_with_input.as_slice());
    assert_eq!(bytes.len(), 2 + 2 + 38 + 2 + 47);
}

#[test]
fn test_server_payment_response_bytes() {
    let spr = ServerPaymentResponse::new(failure_response()).unwrap();
    let bytes = spr.encode().unwrap();
    let inner = failure_response().encode().unwrap();
    assert_eq!(&bytes[..4], &[0x01, 0x01, 0x00, inner.len() as u8]);
    assert_eq!(&bytes[4..], inner.as_slice());
}

#[test]
fn test_every_truncation_is_malformed() {
    let leaf = request_with_input();
    let payload_len = leaf.payload().len();
    let bytes = leaf.encode().unwrap();
    for len in 0..payload_len {
        let err = decode::<Signed<PaymentRequest>>(&bytes[..len]).unwrap_err();
        assert!(err.is_malformed_input(), "request cut at {}: {}", len, err);
    }
    assert_eq!(
        decode::<Signed<PaymentRequest>>(&bytes[..payload_len]).unwrap_err(),
        WireError::NotSigned
    );

    let wrapper = ServerPaymentRequest::new(leaf).unwrap().encode().unwrap();
    for len in 0..wrapper.len() {
        let err = decode::<ServerPaymentRequest>(&wrapper[..len]).unwrap_err();
        assert!(err.is_malformed_input(), "wrapper cut at {}: {}", len, err);
    }
}

#[test]
fn test_unknown_currency_code() {
    let mut bytes = request_without_input().encode().unwrap();
    // version, pki, key, "buyer", "seller", nofCurrencies
    bytes[3 + 6 + 7 + 1] = 0x09;
    assert_eq!(
        decode::<Signed<PaymentRequest>>(&bytes).unwrap_err(),
        WireError::UnknownCode {
            kind: CodeKind::Currency,
            code: 0x09
        }
    );

    // the same error surfaces unchanged through a wrapper
    let mut wrapped = ServerPaymentRequest::new(request_without_input())
        .unwrap()
        .encode()
        .unwrap();
    wrapped[4 + 3 + 6 + 7 + 1] = 0x09;
    assert_eq!(
        decode::<ServerPaymentRequest>(&wrapped).unwrap_err(),
        WireError::UnknownCode {
            kind: CodeKind::Currency,
            code: 0x09
        }
    );
}

#[test]
fn test_unknown_pki_algorithm_code() {
    let mut bytes = failure_response().encode().unwrap();
    bytes[1] = 0x02;
    assert_eq!(
        decode::<Signed<PaymentResponse>>(&bytes).unwrap_err(),
        WireError::UnknownCode {
            kind: CodeKind::PkiAlgorithm,
            code: 0x02
        }
    );
}
