use super::snapshot::GameView;
use rail_core::Chips;
use rail_core::HandNo;
use rail_core::Millis;
use rail_core::Position;
use rail_records::HandExport;

/// What an oracle returns: a proposed action by wire label, an amount when
/// the label needs one, and optional free-text reasoning for study mode.
/// Anything unusable collapses to the engine's passive default.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Advice {
    pub action: String,
    #[serde(default)]
    pub amount: Option<Chips>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// The legality envelope handed to the oracle alongside the state view.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TurnContext {
    pub hand_id: HandNo,
    pub seat: Position,
    pub options: Vec<String>,
    pub call_amount: Chips,
    pub min_raise: Chips,
    pub max_raise: Chips,
}

/// LLM decision port. The engine is indifferent to the concrete provider;
/// it serializes a hole-card-masked view plus archetype identity and
/// treats every failure as a timeout.
#[async_trait::async_trait]
pub trait Oracle: Send + Sync {
    async fn decide(
        &self,
        archetype: &str,
        view: GameView,
        context: TurnContext,
    ) -> anyhow::Result<Advice>;
}

/// A study profile of an opponent, built outside the core.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProfileView {
    pub player: String,
    pub summary: String,
}

/// Opponent memory port. Both operations are optional conveniences;
/// failures are logged and never affect the hand.
#[async_trait::async_trait]
pub trait OpponentMemory: Send + Sync {
    async fn record_hand(&self, hand: &HandExport) -> anyhow::Result<()>;
    async fn profile(&self, player: &str) -> anyhow::Result<Option<ProfileView>>;
}

/// Timestamp source for wire envelopes, injected for deterministic tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Millis;
}

/// Wall clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        rail_core::now_millis()
    }
}

/// A memory sink that drops everything. The default when no memory
/// service is wired in.
#[derive(Debug, Default)]
pub struct NoMemory;

#[async_trait::async_trait]
impl OpponentMemory for NoMemory {
    async fn record_hand(&self, _: &HandExport) -> anyhow::Result<()> {
        Ok(())
    }
    async fn profile(&self, _: &str) -> anyhow::Result<Option<ProfileView>> {
        Ok(None)
    }
}
