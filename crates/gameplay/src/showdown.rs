use super::config::GameConfig;
use super::pot;
use super::seat::Seat;
use super::settlement::PotAward;
use super::settlement::Settlement;
use rail_cards::Board;
use rail_cards::Hand;
use rail_cards::Strength;
use rail_core::Chips;
use rail_core::Position;

/// Resolves a terminal hand into pot awards and per-seat settlements.
///
/// Ephemeral: built from the hand's final seats and board, consumed by
/// `settle()`. Handles fold-outs (no comparison needed), multiway
/// showdowns, side pots, chops with indivisible remainders, and rake.
pub struct Showdown<'a> {
    seats: &'a [Seat],
    board: &'a Board,
    dealer: Position,
    config: &'a GameConfig,
}

impl<'a> Showdown<'a> {
    pub fn new(
        seats: &'a [Seat],
        board: &'a Board,
        dealer: Position,
        config: &'a GameConfig,
    ) -> Self {
        Self {
            seats,
            board,
            dealer,
            config,
        }
    }

    /// Splits the pot into layers, withdraws rake, and awards each layer to
    /// its best eligible hand(s). Indivisible chop remainders go one chip at
    /// a time to winners seated first clockwise from the dealer.
    pub fn settle(self) -> (Vec<PotAward>, Vec<Settlement>) {
        let strengths = self.strengths();
        let pots = pot::layers(self.seats);
        let total = pots.iter().map(|p| p.amount).sum::<Chips>();
        let rakes = pot::rake_shares(&pots, self.config.rake(total));
        let mut rewards = vec![0; self.seats.len()];
        let mut awards = Vec::with_capacity(pots.len());
        for (layer, rake) in pots.iter().zip(rakes) {
            let amount = layer.amount - rake;
            let winners = self.winners(&layer.eligible, &strengths);
            for (i, winner) in self.clockwise(&winners).iter().enumerate() {
                let share = amount / winners.len() as Chips;
                let extra = (i as Chips) < (amount % winners.len() as Chips);
                rewards[*winner] += share + extra as Chips;
            }
            awards.push(PotAward {
                amount,
                rake,
                winners: winners.clone(),
                ranking: self.contested(&layer.eligible).then(|| {
                    winners
                        .first()
                        .and_then(|w| strengths[*w])
                        .map(|s| s.ranking().label().to_string())
                        .unwrap_or_default()
                }),
            });
        }
        let settlements = self
            .seats
            .iter()
            .map(|seat| Settlement {
                position: seat.position(),
                risked: seat.spent(),
                reward: rewards[seat.position()],
                status: seat.status(),
                strength: strengths[seat.position()],
            })
            .collect();
        (awards, settlements)
    }

    /// Strengths of live seats only; folded and dealt-out seats never rank.
    fn strengths(&self) -> Vec<Option<Strength>> {
        self.seats
            .iter()
            .map(|seat| {
                seat.status()
                    .is_live()
                    .then(|| {
                        Strength::from(Hand::add(
                            Hand::from(seat.cards()),
                            Hand::from(self.board),
                        ))
                    })
            })
            .collect()
    }
    /// Best eligible seats of a layer; everyone equal-best chops.
    fn winners(&self, eligible: &[Position], strengths: &[Option<Strength>]) -> Vec<Position> {
        let best = eligible.iter().filter_map(|p| strengths[*p]).max();
        eligible
            .iter()
            .filter(|p| strengths[**p] == best && best.is_some())
            .copied()
            .collect()
    }
    /// Winners ordered clockwise starting at the seat after the dealer.
    fn clockwise(&self, winners: &[Position]) -> Vec<Position> {
        let n = self.seats.len();
        let mut ordered = winners.to_vec();
        ordered.sort_by_key(|p| (p + n - self.dealer - 1) % n);
        ordered
    }
    /// Whether a layer's resolution involved comparing hands at all.
    fn contested(&self, eligible: &[Position]) -> bool {
        eligible.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::super::Status;
    use super::*;
    use rail_cards::Hole;

    fn seat(pos: Position, stack: Chips, spent: Chips, hole: &str, folded: bool) -> Seat {
        let mut seat = Seat::new(pos, &format!("p{}", pos), stack + spent);
        seat.deal_in(Hole::try_from(hole).unwrap());
        seat.commit(spent);
        if folded {
            seat.fold();
        }
        seat
    }

    fn board(s: &str) -> Board {
        let mut board = Board::empty();
        board.add(&Hand::try_from(s).unwrap().into_iter().collect::<Vec<_>>());
        board
    }

    #[test]
    fn heads_up_checkdown() {
        // P1's tens beat P0's queen-high on As Kd 7h 2c 9s.
        let seats = vec![
            seat(0, 198, 2, "Qh Jh", false),
            seat(1, 198, 2, "Th Ts", false),
        ];
        let board = board("As Kd 7h 2c 9s");
        let config = GameConfig::default();
        let (awards, settlements) = Showdown::new(&seats, &board, 0, &config).settle();
        assert_eq!(awards.len(), 1);
        assert_eq!(awards[0].amount, 4);
        assert_eq!(awards[0].winners, vec![1]);
        assert_eq!(settlements[1].reward, 4);
        assert_eq!(settlements[0].reward, 0);
    }

    #[test]
    fn three_way_all_in_side_pots() {
        // Layer 1 (150) to P0's kings-up; layer 2 (200) to P1's queens-up.
        let seats = vec![
            seat(0, 0, 50, "Kh Kd", false),
            seat(1, 0, 150, "Qh Qd", false),
            seat(2, 150, 150, "7h 7d", false),
        ];
        let board = board("Ah Ad 2c 3c 4d");
        let config = GameConfig {
            sblind: 5,
            bblind: 10,
            ..GameConfig::default()
        };
        let (awards, settlements) = Showdown::new(&seats, &board, 0, &config).settle();
        assert_eq!(awards.len(), 3);
        assert_eq!(awards[0].amount, 150);
        assert_eq!(awards[0].winners, vec![0]);
        assert_eq!(awards[1].amount, 200);
        assert_eq!(awards[1].winners, vec![1]);
        assert_eq!(awards[2].amount, 0);
        assert_eq!(settlements[0].reward, 150);
        assert_eq!(settlements[1].reward, 200);
        assert_eq!(settlements[2].reward, 0);
    }

    #[test]
    fn chop_remainder_goes_clockwise_from_dealer() {
        // Identical straights chop 5 chips; odd chip lands on the seat
        // first clockwise from the dealer at position 2.
        let seats = vec![
            seat(0, 100, 2, "Ah 2h", false),
            seat(1, 100, 2, "Ad 2d", false),
            seat(2, 100, 1, "9c 2c", true),
        ];
        let board = board("3s 4s 5s Kd Kc");
        let config = GameConfig::default();
        let (awards, settlements) = Showdown::new(&seats, &board, 2, &config).settle();
        assert_eq!(awards[0].winners.len(), 2);
        assert_eq!(settlements[0].reward, 3);
        assert_eq!(settlements[1].reward, 2);
    }

    #[test]
    fn folded_seat_never_wins() {
        let seats = vec![
            seat(0, 100, 10, "Ah Ad", true),
            seat(1, 100, 10, "7h 2d", false),
        ];
        let board = board("As Ac Kd Kc 2s");
        let config = GameConfig::default();
        let (awards, settlements) = Showdown::new(&seats, &board, 0, &config).settle();
        assert!(awards.iter().all(|a| !a.winners.contains(&0)));
        assert_eq!(settlements[1].reward, 20);
    }

    #[test]
    fn awards_conserve_pot_minus_rake() {
        let seats = vec![
            seat(0, 0, 60, "Kh Kd", false),
            seat(1, 100, 120, "Qh Qd", false),
            seat(2, 100, 120, "Jh Jd", false),
        ];
        let board = board("2h 5d 8c Tc 3s");
        let config = GameConfig {
            mode: super::super::Mode::Cash,
            rake: Some(super::super::RakeConfig::default()),
            sblind: 5,
            bblind: 10,
            ..GameConfig::default()
        };
        let (awards, settlements) = Showdown::new(&seats, &board, 0, &config).settle();
        let pot = 300;
        let rake = awards.iter().map(|a| a.rake).sum::<Chips>();
        let paid = settlements.iter().map(|s| s.reward).sum::<Chips>();
        assert_eq!(rake, config.rake(pot));
        assert_eq!(paid + rake, pot);
    }
}
