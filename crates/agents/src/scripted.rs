use rail_gameroom::Advice;
use rail_gameroom::GameView;
use rail_gameroom::Oracle;
use rail_gameroom::TurnContext;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Deterministic oracle that replays a queue of advice, then goes
/// passive. The workhorse of engine and choreography tests.
#[derive(Debug, Default)]
pub struct Scripted {
    queue: Mutex<VecDeque<Advice>>,
}

impl Scripted {
    pub fn new<I>(advices: I) -> Self
    where
        I: IntoIterator<Item = Advice>,
    {
        Self {
            queue: Mutex::new(advices.into_iter().collect()),
        }
    }
    /// Convenience: a script of bare wire verbs with optional amounts,
    /// e.g. `[("RAISE", Some(6)), ("CALL", None)]`.
    pub fn of(script: &[(&str, Option<rail_core::Chips>)]) -> Self {
        Self::new(script.iter().map(|(action, amount)| Advice {
            action: action.to_string(),
            amount: *amount,
            reasoning: None,
        }))
    }
}

#[async_trait::async_trait]
impl Oracle for Scripted {
    async fn decide(
        &self,
        _: &str,
        _: GameView,
        context: TurnContext,
    ) -> anyhow::Result<Advice> {
        Ok(self
            .queue
            .lock()
            .expect("script queue poisoned")
            .pop_front()
            .unwrap_or(Advice {
                action: if context.call_amount == 0 { "CHECK" } else { "FOLD" }.to_string(),
                amount: None,
                reasoning: None,
            }))
    }
}

/// A calling station: calls any price, checks when free.
#[derive(Debug, Default)]
pub struct Station;

#[async_trait::async_trait]
impl Oracle for Station {
    async fn decide(
        &self,
        _: &str,
        _: GameView,
        context: TurnContext,
    ) -> anyhow::Result<Advice> {
        Ok(Advice {
            action: if context.call_amount == 0 { "CHECK" } else { "CALL" }.to_string(),
            amount: None,
            reasoning: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_gameplay::GameConfig;
    use rail_gameplay::HandState;
    use rail_gameplay::Seat;

    fn turn() -> (GameView, TurnContext) {
        let seats = vec![Seat::new(0, "p0", 200), Seat::new(1, "p1", 200)];
        let mut hand = HandState::new(0, GameConfig::default(), seats, 0, 31).unwrap();
        hand.commence().unwrap();
        let menu = hand.menu();
        let context = TurnContext {
            hand_id: 0,
            seat: 0,
            options: menu.options.iter().map(|o| o.to_string()).collect(),
            call_amount: menu.call,
            min_raise: menu.min_raise,
            max_raise: menu.max_raise,
        };
        (GameView::of(&hand, 0), context)
    }

    #[tokio::test]
    async fn replays_then_goes_passive() {
        let oracle = Scripted::of(&[("RAISE", Some(6))]);
        let (view, context) = turn();
        assert_eq!(oracle.decide("TAG", view, context).await.unwrap().action, "RAISE");
        let (view, context) = turn();
        // Script exhausted, facing the blind: fold.
        assert_eq!(oracle.decide("TAG", view, context).await.unwrap().action, "FOLD");
    }

    #[tokio::test]
    async fn station_always_continues() {
        let (view, context) = turn();
        assert_eq!(Station.decide("STATION", view, context).await.unwrap().action, "CALL");
    }
}
