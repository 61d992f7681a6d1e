// Path: crates/monitor/src/heartbeat/matcher.rs
//! Recognises a heartbeat inside a transaction envelope.
//!
//! Heartbeats are nested: the outer message must be a refund wrapper, its
//! payload must decode, its sender must be the broadcaster (or an allow-listed
//! fallback), and its inner message must carry the heartbeat tag. Tag and
//! sender mismatches are ordinary misses; a payload that carries the wrapper
//! tag but does not decode is a protocol mismatch and fails the scan.

use prost::Message;
use vigil_types::app::{
    AccountAddress, Envelope, ProtoAny, RefundMsgRequest, HEARTBEAT_REQUEST_TYPE_URL,
    REFUND_MSG_TYPE_URL,
};
use vigil_types::error::CheckError;

/// How a single message relates to the heartbeat shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageMatch {
    /// The outer tag is not the refund wrapper.
    NotWrapper,
    /// A wrapper submitted by someone other than the broadcaster.
    ForeignSender,
    /// A broadcaster wrapper whose inner message is not a heartbeat.
    NotHeartbeat,
    /// A valid heartbeat.
    Heartbeat,
}

/// Decides whether envelopes contain a heartbeat from a given broadcaster.
#[derive(Debug, Clone)]
pub struct HeartbeatMatcher {
    broadcaster: AccountAddress,
    fallback_senders: Vec<AccountAddress>,
}

impl HeartbeatMatcher {
    pub fn new(broadcaster: AccountAddress, fallback_senders: Vec<AccountAddress>) -> Self {
        Self {
            broadcaster,
            fallback_senders,
        }
    }

    pub fn broadcaster(&self) -> &AccountAddress {
        &self.broadcaster
    }

    fn is_accepted_sender(&self, sender: &[u8]) -> bool {
        self.broadcaster.as_bytes() == sender
            || self.fallback_senders.iter().any(|f| f.as_bytes() == sender)
    }

    /// Classifies one message. Fails only when a wrapper-tagged payload is malformed.
    pub fn classify(&self, msg: &ProtoAny) -> Result<MessageMatch, CheckError> {
        if msg.type_url != REFUND_MSG_TYPE_URL {
            return Ok(MessageMatch::NotWrapper);
        }
        let refund = RefundMsgRequest::decode(msg.value.as_slice())
            .map_err(|e| CheckError::Decode(format!("{REFUND_MSG_TYPE_URL}: {e}")))?;
        if !self.is_accepted_sender(&refund.sender) {
            return Ok(MessageMatch::ForeignSender);
        }
        match refund.inner_message {
            Some(inner) if inner.type_url == HEARTBEAT_REQUEST_TYPE_URL => Ok(MessageMatch::Heartbeat),
            _ => Ok(MessageMatch::NotHeartbeat),
        }
    }

    /// True iff any message in `envelope` is a heartbeat. Stops at the first hit.
    pub fn matches(&self, envelope: &Envelope) -> Result<bool, CheckError> {
        for msg in &envelope.messages {
            if self.classify(msg)? == MessageMatch::Heartbeat {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
