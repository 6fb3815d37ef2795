use super::intent::Intent;
use super::ports::Oracle;
use super::ports::TurnContext;
use super::snapshot::GameView;
use super::timer::TimerConfig;
use rail_core::Position;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

/// Dispatches the room's bounded waits as background tasks whose
/// completions post intents back onto the game queue: oracle decisions
/// and turn-clock expiries. Each dispatch carries a monotone tag so the
/// room can discard completions from waits it is no longer in.
pub struct Scheduler {
    intents: UnboundedSender<Intent>,
    oracle: Arc<dyn Oracle>,
    timers: TimerConfig,
    tag: u64,
    inflight: Option<AbortHandle>,
}

impl Scheduler {
    pub fn new(intents: UnboundedSender<Intent>, oracle: Arc<dyn Oracle>, timers: TimerConfig) -> Self {
        Self {
            intents,
            oracle,
            timers,
            tag: 0,
            inflight: None,
        }
    }
    /// A fresh tag for the next bounded wait. Anything posted under an
    /// older tag is stale.
    pub fn next_tag(&mut self) -> u64 {
        self.tag += 1;
        self.tag
    }
    pub fn current_tag(&self) -> u64 {
        self.tag
    }

    /// Spawns an oracle decision task with the configured deadline.
    /// Timeouts and failures post `advice: None`; the room substitutes the
    /// passive default.
    pub fn dispatch(
        &mut self,
        tag: u64,
        seat: Position,
        archetype: String,
        view: GameView,
        context: TurnContext,
    ) {
        let oracle = self.oracle.clone();
        let intents = self.intents.clone();
        let deadline = self.timers.oracle;
        let handle = tokio::spawn(async move {
            let advice = tokio::time::timeout(deadline, oracle.decide(&archetype, view, context))
                .await
                .map_err(|_| log::warn!("[scheduler] oracle deadline for P{}", seat))
                .ok()
                .and_then(|r| {
                    r.map_err(|e| log::warn!("[scheduler] oracle failure for P{}: {}", seat, e))
                        .ok()
                });
            let _ = intents.send(Intent::Advice { tag, seat, advice });
        });
        self.inflight = Some(handle.abort_handle());
    }

    /// Spawns the turn clock for a human wait.
    pub fn clock(&self, tag: u64) {
        let intents = self.intents.clone();
        let turn = self.timers.turn;
        tokio::spawn(async move {
            tokio::time::sleep(turn).await;
            let _ = intents.send(Intent::TurnTimeout { tag });
        });
    }

    /// Cancels any in-flight oracle task; its eventual completion, if any,
    /// is stale by tag anyway. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
    }
}
