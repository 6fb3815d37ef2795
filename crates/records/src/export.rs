use rail_core::Chips;
use rail_core::HandNo;
use rail_core::Millis;
use rail_core::Position;

/// The stable export schema of a completed hand.
///
/// Replaying the recorded seed against the recorded action list reproduces
/// the community cards and awards bit for bit.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HandExport {
    pub hand_id: HandNo,
    pub started_at: Millis,
    pub seed: u64,
    pub blinds: (Chips, Chips),
    pub ante: Chips,
    pub button_seat: Position,
    pub players: Vec<PlayerRecord>,
    pub actions: Vec<PlayRecord>,
    pub board: Vec<String>,
    pub pots: Vec<PotRecord>,
    pub aborted: bool,
}

/// One seat's snapshot at hand start. Hole cards appear only for players
/// who showed them.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlayerRecord {
    pub seat: Position,
    pub name: String,
    pub starting_stack: Chips,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole: Option<Vec<String>>,
}

/// One action in hand order, grouped by street. Forced defaults (timeouts,
/// adapter failures) are flagged so clients can render them as such.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlayRecord {
    pub street: String,
    pub seat: Position,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Chips>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub forced: bool,
}

/// One pot layer's resolution.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PotRecord {
    pub amount: Chips,
    pub rake: Chips,
    pub winners: Vec<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking: Option<String>,
}

impl HandExport {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize hand export")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_roundtrips() {
        let export = HandExport {
            hand_id: 7,
            started_at: 1_700_000_000_000,
            seed: 42,
            blinds: (1, 2),
            ante: 0,
            button_seat: 0,
            players: vec![PlayerRecord {
                seat: 0,
                name: "hero".to_string(),
                starting_stack: 200,
                hole: Some(vec!["As".to_string(), "Kd".to_string()]),
            }],
            actions: vec![PlayRecord {
                street: "PREFLOP".to_string(),
                seat: 0,
                action: "RAISE".to_string(),
                amount: Some(6),
                forced: false,
            }],
            board: vec!["2c".to_string(), "7h".to_string(), "Ts".to_string()],
            pots: vec![PotRecord {
                amount: 12,
                rake: 0,
                winners: vec![0],
                ranking: Some("Pair".to_string()),
            }],
            aborted: false,
        };
        let json = export.to_json();
        let back: HandExport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hand_id, 7);
        assert_eq!(back.seed, 42);
        assert_eq!(back.players[0].hole.as_ref().unwrap().len(), 2);
        assert_eq!(back.pots[0].winners, vec![0]);
    }

    #[test]
    fn hidden_holes_are_omitted() {
        let record = PlayerRecord {
            seat: 1,
            name: "villain".to_string(),
            starting_stack: 200,
            hole: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("hole"));
    }
}
