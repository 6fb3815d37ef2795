use super::archetype::Archetype;
use rail_gameroom::Advice;
use rail_gameroom::GameView;
use rail_gameroom::Oracle;
use rail_gameroom::TurnContext;
use rand::Rng;

/// Built-in archetype-parameterized opponents.
///
/// Stands in for the LLM decision port whenever no external provider is
/// wired in, so the server is playable out of the box. Style is entirely
/// data-driven: looseness gates continuing against a bet, aggression
/// gates betting and raising. The house never looks at its cards, only
/// at the price.
#[derive(Debug, Default)]
pub struct HouseOracle;

#[async_trait::async_trait]
impl Oracle for HouseOracle {
    async fn decide(
        &self,
        archetype: &str,
        _view: GameView,
        context: TurnContext,
    ) -> anyhow::Result<Advice> {
        let style = Archetype::lookup(archetype);
        let ref mut rng = rand::rng();
        let advice = if context.call_amount == 0 {
            if context.options.iter().any(|o| o == "BET") && rng.random::<f32>() < style.aggression
            {
                Advice {
                    action: "BET".to_string(),
                    amount: Some(context.min_raise.max(1)),
                    reasoning: None,
                }
            } else if context.options.iter().any(|o| o == "RAISE")
                && rng.random::<f32>() < style.aggression * style.looseness
            {
                Advice {
                    action: "RAISE".to_string(),
                    amount: Some(context.min_raise),
                    reasoning: None,
                }
            } else {
                Advice {
                    action: "CHECK".to_string(),
                    amount: None,
                    reasoning: None,
                }
            }
        } else if rng.random::<f32>() < style.looseness {
            if context.options.iter().any(|o| o == "RAISE")
                && rng.random::<f32>() < style.aggression
            {
                Advice {
                    action: "RAISE".to_string(),
                    amount: Some(context.min_raise),
                    reasoning: None,
                }
            } else {
                Advice {
                    action: "CALL".to_string(),
                    amount: None,
                    reasoning: None,
                }
            }
        } else {
            Advice {
                action: "FOLD".to_string(),
                amount: None,
                reasoning: None,
            }
        };
        log::trace!("[house {}] advises {}", style.id, advice.action);
        Ok(advice)
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
        let mut hand = HandState::new(0, GameConfig::default(), seats, 0, 21).unwrap();
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
    async fn always_produces_a_known_verb() {
        let oracle = HouseOracle;
        for _ in 0..50 {
            let (view, context) = turn();
            let advice = oracle.decide("LAG", view, context).await.unwrap();
            assert!(
                ["FOLD", "CHECK", "CALL", "BET", "RAISE"].contains(&advice.action.as_str()),
                "unexpected verb {}",
                advice.action
            );
        }
    }

    #[tokio::test]
    async fn station_rarely_folds_getting_odds() {
        // 60% looseness: over 100 trials facing a bet, some continues.
        let oracle = HouseOracle;
        let mut continued = 0;
        for _ in 0..100 {
            let (view, context) = turn();
            let advice = oracle.decide("STATION", view, context).await.unwrap();
            if advice.action != "FOLD" {
                continued += 1;
            }
        }
        assert!(continued > 20);
    }
}
