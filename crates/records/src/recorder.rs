use super::export::HandExport;

/// Append-only log of completed hands for one game.
///
/// In-memory authoritative; durable storage is a consumer's concern via
/// the export accessors.
#[derive(Debug, Default)]
pub struct Recorder {
    hands: Vec<HandExport>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, export: HandExport) {
        log::debug!(
            "[recorder] hand {} recorded ({} actions{})",
            export.hand_id,
            export.actions.len(),
            if export.aborted { ", aborted" } else { "" },
        );
        self.hands.push(export);
    }
    pub fn len(&self) -> usize {
        self.hands.len()
    }
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
    pub fn hands(&self) -> &[HandExport] {
        &self.hands
    }
    /// The full log as a JSON array.
    pub fn export(&self) -> String {
        serde_json::to_string(&self.hands).expect("serialize hand log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export(hand_id: u64) -> HandExport {
        HandExport {
            hand_id,
            started_at: 0,
            seed: 0,
            blinds: (1, 2),
            ante: 0,
            button_seat: 0,
            players: Vec::new(),
            actions: Vec::new(),
            board: Vec::new(),
            pots: Vec::new(),
            aborted: false,
        }
    }

    #[test]
    fn appends_in_order() {
        let mut recorder = Recorder::new();
        recorder.push(export(1));
        recorder.push(export(2));
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.hands()[0].hand_id, 1);
        assert_eq!(recorder.hands()[1].hand_id, 2);
    }

    #[test]
    fn export_is_a_json_array() {
        let mut recorder = Recorder::new();
        recorder.push(export(1));
        let json = recorder.export();
        assert!(json.starts_with('['));
        assert!(json.contains("\"hand_id\":1"));
    }
}
