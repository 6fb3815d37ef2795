use super::ports::Advice;
use rail_core::Position;
use tokio::sync::mpsc::Sender;

/// Everything that can mutate a game, serialized onto the room's queue:
/// inbound client frames, session lifecycle, oracle completions, and timer
/// fires. The room is the queue's only consumer, so at most one intent
/// advances state at any instant.
#[derive(Debug)]
pub enum Intent {
    /// A raw text frame from the session bound to a seat.
    Frame { seat: Position, text: String },
    /// A session (re)binds its outbound channel to a seat.
    Attach {
        seat: Position,
        sender: Sender<String>,
    },
    /// A session dropped; the seat keeps its state.
    Detach { seat: Position },
    /// An oracle decision task completed (None on timeout or failure).
    Advice {
        tag: u64,
        seat: Position,
        advice: Option<Advice>,
    },
    /// The turn clock for the tagged wait expired.
    TurnTimeout { tag: u64 },
    /// The registry is closing this game.
    Shutdown,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Intent::Frame { seat, .. } => write!(f, "frame from P{}", seat),
            Intent::Attach { seat, .. } => write!(f, "attach P{}", seat),
            Intent::Detach { seat } => write!(f, "detach P{}", seat),
            Intent::Advice { seat, advice, .. } => match advice {
                Some(a) => write!(f, "advice P{}: {}", seat, a.action),
                None => write!(f, "advice P{}: failed", seat),
            },
            Intent::TurnTimeout { tag } => write!(f, "turn timeout #{}", tag),
            Intent::Shutdown => write!(f, "shutdown"),
        }
    }
}
