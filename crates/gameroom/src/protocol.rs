use super::message::ActionFrame;
use super::message::ClientMessage;
use super::ports::Advice;
use rail_gameplay::Action;
use rail_gameplay::HandState;

/// Wire error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidMessage,
    InvalidAction,
    NotYourTurn,
    StaleHandId,
    GameNotFound,
    RateLimited,
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidMessage => "invalid_message",
            Self::InvalidAction => "invalid_action",
            Self::NotYourTurn => "not_your_turn",
            Self::StaleHandId => "stale_hand_id",
            Self::GameNotFound => "game_not_found",
            Self::RateLimited => "rate_limited",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The protocol layer between raw frames and engine actions: strict JSON
/// parsing inbound, canonicalization of action intents against the live
/// hand, and the same defensive funnel for oracle advice.
pub struct Protocol;

impl Protocol {
    /// Parses one inbound text frame. Unknown types and unknown fields are
    /// rejected; nothing about the game is consulted yet.
    pub fn parse(text: &str) -> Result<ClientMessage, ErrorCode> {
        serde_json::from_str(text).map_err(|e| {
            log::debug!("[protocol] rejected frame: {}", e);
            ErrorCode::InvalidMessage
        })
    }

    /// Resolves an action frame into an engine action against the current
    /// hand. Amount-less calls and all-ins take engine-computed amounts;
    /// bets and raises require an explicit amount.
    pub fn resolve(frame: &ActionFrame, hand: &HandState) -> Result<Action, ErrorCode> {
        if frame.hand_id != hand.no() {
            return Err(ErrorCode::StaleHandId);
        }
        let action = match (frame.action.to_uppercase().as_str(), frame.amount) {
            ("FOLD", _) => Action::Fold,
            ("CHECK", _) => Action::Check,
            ("CALL", _) => Action::Call(hand.to_call()),
            ("ALL_IN", _) => Action::Shove(hand.to_shove()),
            ("BET", Some(x)) => Action::Bet(x),
            ("RAISE", Some(x)) => Action::Raise(x),
            _ => return Err(ErrorCode::InvalidAction),
        };
        Ok(action)
    }

    /// Funnels oracle advice into a legal action, or None when the advice
    /// is unusable and the caller should substitute the passive default.
    pub fn advise(advice: &Advice, hand: &HandState) -> Option<Action> {
        let frame = ActionFrame {
            hand_id: hand.no(),
            action: advice.action.clone(),
            amount: advice.amount,
        };
        Self::resolve(&frame, hand)
            .ok()
            .filter(|action| hand.is_allowed(action).is_ok())
    }
}
