use rail_core::Position;
use rail_core::SESSION_BUFFER;
use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::error::TrySendError;

/// Physical table state: which seats have a connected session, and the
/// outbound channel for each.
///
/// Events travel as pre-serialized JSON frames over bounded channels; a
/// session that stops draining fills its buffer and is disconnected
/// rather than stalling the game loop. A reconnecting session replaces
/// the seat's sender and the stale one closes on drop.
#[derive(Debug)]
pub struct Table {
    sessions: Vec<Option<Sender<String>>>,
}

impl Table {
    pub fn new(n: usize) -> Self {
        Self {
            sessions: vec![None; n],
        }
    }
    /// The buffer capacity sessions are expected to allocate.
    pub const fn buffer() -> usize {
        SESSION_BUFFER
    }
    /// Binds a session to a seat, displacing any prior session.
    pub fn attach(&mut self, pos: Position, sender: Sender<String>) {
        if pos < self.sessions.len() {
            self.sessions[pos] = Some(sender);
        }
    }
    pub fn detach(&mut self, pos: Position) {
        if pos < self.sessions.len() {
            self.sessions[pos] = None;
        }
    }
    pub fn attached(&self, pos: Position) -> bool {
        self.sessions.get(pos).is_some_and(Option::is_some)
    }
    pub fn attached_count(&self) -> usize {
        self.sessions.iter().filter(|s| s.is_some()).count()
    }
    pub fn seats(&self) -> usize {
        self.sessions.len()
    }
    /// Seats with a live session.
    pub fn attached_seats(&self) -> Vec<Position> {
        self.sessions
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| i)
            .collect()
    }
    /// Sends a frame to one seat. A full or dead channel detaches the
    /// seat; the game never waits on a slow client here.
    pub fn unicast(&mut self, pos: Position, frame: &str) {
        match self.sessions.get(pos).and_then(Option::as_ref) {
            Some(inbox) => match inbox.try_send(frame.to_string()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    log::warn!("[table] P{} buffer full, disconnecting", pos);
                    self.detach(pos);
                }
                Err(TrySendError::Closed(_)) => {
                    log::debug!("[table] P{} session gone, detaching", pos);
                    self.detach(pos);
                }
            },
            None => log::trace!("[table] unicast to P{}: no session", pos),
        }
    }
    /// Sends a frame to every attached seat.
    pub fn broadcast(&mut self, frame: &str) {
        for pos in self.attached_seats() {
            self.unicast(pos, frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::channel;

    #[test]
    fn attach_detach_roundtrip() {
        let mut table = Table::new(2);
        assert_eq!(table.attached_count(), 0);
        let (tx, _rx) = channel(8);
        table.attach(0, tx);
        assert!(table.attached(0));
        assert!(!table.attached(1));
        table.detach(0);
        assert_eq!(table.attached_count(), 0);
    }

    #[test]
    fn broadcast_reaches_all_attached() {
        let mut table = Table::new(3);
        let (tx0, mut rx0) = channel(8);
        let (tx2, mut rx2) = channel(8);
        table.attach(0, tx0);
        table.attach(2, tx2);
        table.broadcast("hello");
        assert_eq!(rx0.try_recv().unwrap(), "hello");
        assert_eq!(rx2.try_recv().unwrap(), "hello");
    }

    #[test]
    fn dead_channel_detaches() {
        let mut table = Table::new(1);
        let (tx, rx) = channel(8);
        table.attach(0, tx);
        drop(rx);
        table.unicast(0, "gone");
        assert!(!table.attached(0));
    }

    #[test]
    fn full_buffer_disconnects() {
        let mut table = Table::new(1);
        let (tx, _rx) = channel(1);
        table.attach(0, tx);
        table.unicast(0, "one");
        table.unicast(0, "two");
        assert!(!table.attached(0));
    }

    #[test]
    fn reattach_displaces_old_session() {
        let mut table = Table::new(1);
        let (tx1, mut rx1) = channel(8);
        let (tx2, mut rx2) = channel(8);
        table.attach(0, tx1);
        table.attach(0, tx2);
        table.unicast(0, "fresh");
        assert!(rx1.try_recv().is_err());
        assert_eq!(rx2.try_recv().unwrap(), "fresh");
    }
}
