use rail_core::ID;
use rail_core::Position;
use rail_gameroom::Intent;
use rail_gameroom::Room;
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;

/// Handle to a running game: the sender half of its intent queue and the
/// roster mapping player identities to seats.
#[derive(Debug, Clone)]
pub struct GameHandle {
    pub id: ID<Room>,
    pub intents: UnboundedSender<Intent>,
    pub roster: HashMap<uuid::Uuid, Position>,
}

impl GameHandle {
    pub fn new(id: ID<Room>, intents: UnboundedSender<Intent>) -> Self {
        Self {
            id,
            intents,
            roster: HashMap::new(),
        }
    }
    /// Registers a player identity at a seat, returning the identity.
    pub fn enroll(&mut self, seat: Position) -> uuid::Uuid {
        let player = uuid::Uuid::now_v7();
        self.roster.insert(player, seat);
        player
    }
    /// The seat a player identity is bound to, if any.
    pub fn seat_of(&self, player: &uuid::Uuid) -> Option<Position> {
        self.roster.get(player).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn enroll_and_resolve() {
        let (tx, _rx) = unbounded_channel();
        let mut handle = GameHandle::new(ID::default(), tx);
        let player = handle.enroll(0);
        assert_eq!(handle.seat_of(&player), Some(0));
        assert_eq!(handle.seat_of(&uuid::Uuid::now_v7()), None);
    }
}
