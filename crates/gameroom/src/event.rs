use super::snapshot::GameView;
use rail_core::Chips;
use rail_core::HandNo;
use rail_core::Millis;
use rail_core::Position;
use rail_core::Seq;

/// Typed server events. Each per-hand event is wrapped in an [`Envelope`]
/// carrying `{hand_id, event_seq, timestamp}`; events marked gated block
/// the orchestrator until a client acks the animation (or the gate times
/// out).
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    GameState(GameView),
    ActionRequest {
        seat: Position,
        options: Vec<String>,
        call_amount: Chips,
        min_raise: Chips,
        max_raise: Chips,
        time_limit: Millis,
    },
    PlayerAction {
        seat: Position,
        action: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        amount: Option<Chips>,
        forced: bool,
    },
    RoundBetsFinalized {
        player_bets: Vec<BetView>,
        pot_total: Chips,
    },
    StreetDealt {
        street: String,
        cards: Vec<String>,
    },
    ShowdownTransition {},
    ShowdownHandsRevealed {
        player_hands: Vec<RevealView>,
    },
    PotWinnersDetermined {
        pots: Vec<PotResultView>,
    },
    ChipsDistributed {
        players: Vec<StackView>,
    },
    HandVisuallyConcluded {},
    Error {
        code: String,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    Pong {},
}

/// One seat's swept street bet.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BetView {
    pub seat: Position,
    pub amount: Chips,
}

/// One live seat's revealed hole cards at showdown.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RevealView {
    pub seat: Position,
    pub cards: Vec<String>,
    pub best_five: Vec<String>,
    pub ranking: String,
}

/// One resolved pot layer.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PotResultView {
    pub amount: Chips,
    pub winners: Vec<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking: Option<String>,
}

/// One seat's authoritative post-settlement stack.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StackView {
    pub seat: Position,
    pub chips: Chips,
}

impl Event {
    /// Whether the orchestrator must hold for an animation ack after
    /// emitting this event.
    pub fn gated(&self) -> bool {
        matches!(
            self,
            Event::RoundBetsFinalized { .. }
                | Event::StreetDealt { .. }
                | Event::ShowdownHandsRevealed { .. }
                | Event::PotWinnersDetermined { .. }
                | Event::ChipsDistributed { .. }
        )
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::GameState(_) => write!(f, "game_state"),
            Event::ActionRequest { seat, .. } => write!(f, "action_request P{}", seat),
            Event::PlayerAction { seat, action, .. } => write!(f, "P{}: {}", seat, action),
            Event::RoundBetsFinalized { pot_total, .. } => {
                write!(f, "round_bets_finalized pot={}", pot_total)
            }
            Event::StreetDealt { street, .. } => write!(f, "street_dealt {}", street),
            Event::ShowdownTransition {} => write!(f, "showdown_transition"),
            Event::ShowdownHandsRevealed { player_hands } => {
                write!(f, "showdown_hands_revealed x{}", player_hands.len())
            }
            Event::PotWinnersDetermined { pots } => {
                write!(f, "pot_winners_determined x{}", pots.len())
            }
            Event::ChipsDistributed { .. } => write!(f, "chips_distributed"),
            Event::HandVisuallyConcluded {} => write!(f, "hand_visually_concluded"),
            Event::Error { code, .. } => write!(f, "error {}", code),
            Event::Pong {} => write!(f, "pong"),
        }
    }
}

/// The wire frame around every server event.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Envelope {
    pub hand_id: HandNo,
    pub event_seq: Seq,
    pub timestamp: Millis,
    #[serde(flatten)]
    pub event: Event,
}

impl Envelope {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize envelope")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gating_matches_the_canonical_sequence() {
        assert!(Event::RoundBetsFinalized { player_bets: vec![], pot_total: 0 }.gated());
        assert!(Event::StreetDealt { street: "FLOP".into(), cards: vec![] }.gated());
        assert!(Event::ShowdownHandsRevealed { player_hands: vec![] }.gated());
        assert!(Event::PotWinnersDetermined { pots: vec![] }.gated());
        assert!(Event::ChipsDistributed { players: vec![] }.gated());
        assert!(!Event::ShowdownTransition {}.gated());
        assert!(!Event::HandVisuallyConcluded {}.gated());
        assert!(!Event::Pong {}.gated());
    }

    #[test]
    fn envelope_carries_sequencing_fields() {
        let envelope = Envelope {
            hand_id: 4,
            event_seq: 9,
            timestamp: 1000,
            event: Event::StreetDealt {
                street: "TURN".to_string(),
                cards: vec!["2c".to_string()],
            },
        };
        let json = envelope.to_json();
        assert!(json.contains("\"type\":\"street_dealt\""));
        assert!(json.contains("\"hand_id\":4"));
        assert!(json.contains("\"event_seq\":9"));
        assert!(json.contains("\"timestamp\":1000"));
        assert!(json.contains("\"street\":\"TURN\""));
    }
}
