// Path: crates/test_utils/src/fixtures/mod.rs
//! Envelope and address fixtures.

use prost::Message;
use vigil_types::app::{
    AccountAddress, Envelope, HeartBeatRequest, ProtoAny, RefundMsgRequest,
    HEARTBEAT_REQUEST_TYPE_URL, REFUND_MSG_TYPE_URL,
};

/// A 20-byte address filled with `byte`.
pub fn address(byte: u8) -> AccountAddress {
    AccountAddress::from_bytes(vec![byte; 20])
}

/// The bech32 rendering of `address(byte)` under `hrp`.
pub fn bech32(byte: u8, hrp: &str) -> String {
    address(byte)
        .to_bech32(hrp)
        .unwrap_or_else(|e| panic!("fixture hrp {hrp} is invalid: {e}"))
}

/// A refund wrapper from `sender` carrying an inner message tagged `inner_type_url`.
pub fn refund_message(sender: &AccountAddress, inner_type_url: &str) -> ProtoAny {
    let inner = HeartBeatRequest {
        sender: sender.as_bytes().to_vec(),
        key_ids: vec!["key-1".to_string()],
    };
    let refund = RefundMsgRequest {
        sender: sender.as_bytes().to_vec(),
        inner_message: Some(ProtoAny::new(inner_type_url, inner.encode_to_vec())),
    };
    ProtoAny::new(REFUND_MSG_TYPE_URL, refund.encode_to_vec())
}

/// A transaction holding one correctly nested heartbeat from `sender`.
pub fn heartbeat_envelope(sender: &AccountAddress) -> Envelope {
    Envelope {
        messages: vec![refund_message(sender, HEARTBEAT_REQUEST_TYPE_URL)],
    }
}

/// A refund-wrapped transaction whose inner message is not a heartbeat.
pub fn refund_envelope_with_inner(sender: &AccountAddress, inner_type_url: &str) -> Envelope {
    Envelope {
        messages: vec![refund_message(sender, inner_type_url)],
    }
}

/// A message that is not a refund wrapper.
pub fn unrelated_message() -> ProtoAny {
    ProtoAny::new("/cosmos.bank.v1beta1.MsgSend", vec![0x0a, 0x01, 0x41])
}

/// A transaction with only unrelated messages.
pub fn unrelated_envelope() -> Envelope {
    Envelope {
        messages: vec![unrelated_message()],
    }
}

/// A refund-tagged message whose payload is truncated protobuf.
pub fn malformed_refund_message() -> ProtoAny {
    // Field 1, length-delimited, claims 5 bytes but carries one.
    ProtoAny::new(REFUND_MSG_TYPE_URL, vec![0x0a, 0x05, 0x01])
}
