// Path: crates/types/src/app/envelope.rs
//! Transaction envelopes and the protobuf messages a heartbeat is nested in.
//!
//! A heartbeat is not a top-level message. The broadcaster submits a
//! `RefundMsgRequest` whose `inner_message` carries the `HeartBeatRequest`,
//! so recognising one takes two tag checks with a decode in between.

/// Type URL of the refund-style wrapper every heartbeat is submitted inside.
pub const REFUND_MSG_TYPE_URL: &str = "/axelar.reward.v1beta1.RefundMsgRequest";
/// Type URL of the heartbeat request carried as the wrapper's inner message.
pub const HEARTBEAT_REQUEST_TYPE_URL: &str = "/axelar.tss.v1beta1.HeartBeatRequest";

/// A protobuf `google.protobuf.Any`: a type tag plus opaque payload bytes.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoAny {
    /// The message type tag.
    #[prost(string, tag = "1")]
    pub type_url: ::prost::alloc::string::String,
    /// The encoded message.
    #[prost(bytes = "vec", tag = "2")]
    pub value: ::prost::alloc::vec::Vec<u8>,
}

impl ProtoAny {
    /// Builds an `Any` from a tag and an already-encoded payload.
    pub fn new(type_url: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }
}

/// The signed wire form of a Cosmos SDK transaction.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TxRaw {
    /// Encoded `TxBody`.
    #[prost(bytes = "vec", tag = "1")]
    pub body_bytes: ::prost::alloc::vec::Vec<u8>,
    /// Encoded `AuthInfo`; never inspected here.
    #[prost(bytes = "vec", tag = "2")]
    pub auth_info_bytes: ::prost::alloc::vec::Vec<u8>,
    /// Signatures over the body and auth info.
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub signatures: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
}

/// The body of a Cosmos SDK transaction.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TxBody {
    /// The ordered message list.
    #[prost(message, repeated, tag = "1")]
    pub messages: ::prost::alloc::vec::Vec<ProtoAny>,
    /// Free-form memo.
    #[prost(string, tag = "2")]
    pub memo: ::prost::alloc::string::String,
    /// Block height after which the transaction is invalid.
    #[prost(uint64, tag = "3")]
    pub timeout_height: u64,
}

/// `axelar.reward.v1beta1.RefundMsgRequest`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RefundMsgRequest {
    /// The account that submitted the wrapper.
    #[prost(bytes = "vec", tag = "1")]
    pub sender: ::prost::alloc::vec::Vec<u8>,
    /// The wrapped message.
    #[prost(message, optional, tag = "2")]
    pub inner_message: ::core::option::Option<ProtoAny>,
}

/// `axelar.tss.v1beta1.HeartBeatRequest`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HeartBeatRequest {
    /// The account that produced the heartbeat.
    #[prost(bytes = "vec", tag = "1")]
    pub sender: ::prost::alloc::vec::Vec<u8>,
    /// Key ids the validator attests to holding.
    #[prost(string, repeated, tag = "2")]
    pub key_ids: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

/// One transaction's ordered message list, as returned by a block scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    /// The transaction's messages in submission order.
    pub messages: Vec<ProtoAny>,
}

impl From<TxBody> for Envelope {
    fn from(body: TxBody) -> Self {
        Self {
            messages: body.messages,
        }
    }
}
