use rail_core::Chips;
use rail_core::HandNo;
use rail_core::Millis;
use rail_core::Seq;

/// Messages sent from client to server over the duplex session.
///
/// Closed schemas: unknown types fail the enum tag, unknown fields fail
/// `deny_unknown_fields` on the payload structs. Nothing here mutates
/// state until it has been validated against the live hand.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    /// An action intent for the outstanding action request.
    Action(ActionFrame),
    /// The ack for a gated event's animation.
    AnimationDone(AckFrame),
    /// Keep-alive.
    Ping(PingFrame),
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionFrame {
    pub hand_id: HandNo,
    pub action: String,
    #[serde(default)]
    pub amount: Option<Chips>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AckFrame {
    pub hand_id: HandNo,
    pub event_seq: Seq,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PingFrame {
    #[serde(default)]
    pub timestamp: Option<Millis>,
}
