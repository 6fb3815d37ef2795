use super::seat::Seat;
use rail_core::Chips;
use rail_core::Position;

/// One segment of the hand's pot with its eligibility set.
///
/// Layers are ordered by ascending all-in threshold. Each successive
/// layer's eligible set is a subset of the prior layer's, and a folded
/// player is never eligible anywhere. The final layer may be empty when
/// the last bet went uncalled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotLayer {
    pub amount: Chips,
    pub eligible: Vec<Position>,
}

/// Constructs ordered pot layers from total hand contributions.
///
/// Thresholds are the distinct contribution totals of live all-in players;
/// a final segment up to the maximum contribution is always appended, so N
/// distinct all-in amounts yield exactly N+1 layers. Folded contributions
/// fund layers but never earn eligibility.
pub fn layers(seats: &[Seat]) -> Vec<PotLayer> {
    let mut thresholds = seats
        .iter()
        .filter(|s| s.status() == super::Status::AllIn)
        .map(|s| s.spent())
        .filter(|spent| *spent > 0)
        .collect::<Vec<Chips>>();
    thresholds.sort_unstable();
    thresholds.dedup();
    let ceiling = seats.iter().map(Seat::spent).max().unwrap_or(0);
    thresholds.push(ceiling);
    let mut floor = 0;
    let mut pots = Vec::with_capacity(thresholds.len());
    for threshold in thresholds {
        let amount = seats
            .iter()
            .map(|s| s.spent().min(threshold) - s.spent().min(floor))
            .sum::<Chips>();
        let eligible = seats
            .iter()
            .filter(|s| s.status().is_live())
            .filter(|s| s.spent() >= threshold)
            .map(Seat::position)
            .collect::<Vec<Position>>();
        pots.push(PotLayer { amount, eligible });
        floor = threshold;
    }
    pots
}

/// Splits a total rake across layers proportionally by amount.
///
/// Cumulative-floor allocation: per-layer shares always sum to exactly the
/// requested total, with rounding drift absorbed one chip at a time.
pub fn rake_shares(pots: &[PotLayer], rake: Chips) -> Vec<Chips> {
    let total = pots.iter().map(|p| p.amount).sum::<Chips>();
    if total == 0 || rake == 0 {
        return vec![0; pots.len()];
    }
    let mut shares = Vec::with_capacity(pots.len());
    let mut cumulative = 0;
    let mut taken = 0;
    for pot in pots {
        cumulative += pot.amount;
        let due = (rake as i64 * cumulative as i64 / total as i64) as Chips;
        shares.push(due - taken);
        taken = due;
    }
    shares
}

#[cfg(test)]
mod tests {
    use super::super::Status;
    use super::*;
    use rail_cards::Hole;

    fn seat(pos: Position, stack: Chips, spent: Chips, status: Status) -> Seat {
        let mut seat = Seat::new(pos, &format!("p{}", pos), stack + spent);
        seat.deal_in(Hole::try_from("As Kd").unwrap());
        seat.commit(spent);
        match status {
            Status::Folded => seat.fold(),
            Status::AllIn => assert_eq!(seat.status(), Status::AllIn),
            _ => assert_eq!(seat.status(), Status::Active),
        }
        seat
    }

    #[test]
    fn single_layer_without_all_ins() {
        let seats = vec![
            seat(0, 100, 50, Status::Active),
            seat(1, 100, 50, Status::Active),
            seat(2, 100, 20, Status::Folded),
        ];
        let pots = layers(&seats);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 120);
        assert_eq!(pots[0].eligible, vec![0, 1]);
    }

    #[test]
    fn two_all_ins_make_three_layers() {
        let seats = vec![
            seat(0, 0, 50, Status::AllIn),
            seat(1, 0, 150, Status::AllIn),
            seat(2, 150, 150, Status::Active),
        ];
        let pots = layers(&seats);
        assert_eq!(pots.len(), 3);
        assert_eq!(pots[0].amount, 150);
        assert_eq!(pots[0].eligible, vec![0, 1, 2]);
        assert_eq!(pots[1].amount, 200);
        assert_eq!(pots[1].eligible, vec![1, 2]);
        assert_eq!(pots[2].amount, 0);
        assert_eq!(pots[2].eligible, vec![1, 2]);
    }

    #[test]
    fn eligibility_shrinks_monotonically() {
        let seats = vec![
            seat(0, 0, 25, Status::AllIn),
            seat(1, 0, 75, Status::AllIn),
            seat(2, 0, 200, Status::AllIn),
            seat(3, 100, 200, Status::Active),
        ];
        let pots = layers(&seats);
        assert_eq!(pots.len(), 4);
        for pair in pots.windows(2) {
            assert!(pair[1].eligible.iter().all(|p| pair[0].eligible.contains(p)));
        }
        let staked = seats.iter().map(Seat::spent).sum::<Chips>();
        let pooled = pots.iter().map(|p| p.amount).sum::<Chips>();
        assert_eq!(staked, pooled);
    }

    #[test]
    fn uncalled_bet_forms_sole_eligible_layer() {
        let seats = vec![
            seat(0, 0, 50, Status::AllIn),
            seat(1, 100, 150, Status::Active),
            seat(2, 100, 20, Status::Folded),
        ];
        let pots = layers(&seats);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[1].amount, 100);
        assert_eq!(pots[1].eligible, vec![1]);
    }

    #[test]
    fn folded_contributions_fund_but_never_earn() {
        let seats = vec![
            seat(0, 100, 60, Status::Active),
            seat(1, 100, 60, Status::Folded),
        ];
        let pots = layers(&seats);
        assert!(pots.iter().all(|p| !p.eligible.contains(&1)));
        assert_eq!(pots.iter().map(|p| p.amount).sum::<Chips>(), 120);
    }

    #[test]
    fn rake_shares_sum_exactly() {
        let pots = vec![
            PotLayer { amount: 150, eligible: vec![0, 1, 2] },
            PotLayer { amount: 200, eligible: vec![1, 2] },
            PotLayer { amount: 0, eligible: vec![1, 2] },
        ];
        let shares = rake_shares(&pots, 17);
        assert_eq!(shares.iter().sum::<Chips>(), 17);
        assert_eq!(shares.len(), 3);
        assert_eq!(shares[2], 0);
    }

    #[test]
    fn zero_rake_is_all_zeros() {
        let pots = vec![PotLayer { amount: 100, eligible: vec![0] }];
        assert_eq!(rake_shares(&pots, 0), vec![0]);
    }
}
