use rail_cards::Street;
use rail_core::B_BLIND;
use rail_core::Chips;
use rail_core::RAKE_BPS;
use rail_core::RAKE_CAP_BBS;
use rail_core::RAKE_FLOOR_BBS;
use rail_core::S_BLIND;

/// Cash tables rake; tournament tables pay out of a prize pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Cash,
    Tournament,
}

/// The betting structure constraining bet and raise sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Structure {
    NoLimit,
    PotLimit,
    FixedLimit,
}

impl TryFrom<&str> for Structure {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "nl" | "no_limit" | "no-limit" => Ok(Self::NoLimit),
            "pl" | "pot_limit" | "pot-limit" => Ok(Self::PotLimit),
            "fl" | "fixed_limit" | "fixed-limit" => Ok(Self::FixedLimit),
            s => Err(anyhow::anyhow!("invalid betting structure: {}", s)),
        }
    }
}

/// Rake parameters for cash games.
///
/// `rake = min(pot * bps / 10_000, bb * cap_bbs)`, zero below the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RakeConfig {
    pub bps: Chips,
    pub cap_bbs: Chips,
    pub floor_bbs: Chips,
}

impl Default for RakeConfig {
    fn default() -> Self {
        Self {
            bps: RAKE_BPS,
            cap_bbs: RAKE_CAP_BBS,
            floor_bbs: RAKE_FLOOR_BBS,
        }
    }
}

/// Table-level rules a game is created with. Fixed for the game's lifetime;
/// blinds never change mid-hand.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GameConfig {
    pub mode: Mode,
    pub structure: Structure,
    pub sblind: Chips,
    pub bblind: Chips,
    pub ante: Chips,
    pub rake: Option<RakeConfig>,
    pub seats: usize,
}

impl GameConfig {
    /// The fixed bet size for a street under fixed-limit rules:
    /// small bet preflop and flop, big bet turn and river.
    pub fn fixed_bet(&self, street: Street) -> Chips {
        match street {
            Street::Pref | Street::Flop => self.bblind,
            Street::Turn | Street::Rive => self.bblind * 2,
        }
    }
    /// Rake taken from a settled pot. Cash games only; zero below the floor.
    pub fn rake(&self, pot: Chips) -> Chips {
        match (self.mode, self.rake) {
            (Mode::Cash, Some(rake)) if pot >= rake.floor_bbs * self.bblind => std::cmp::min(
                (pot as i64 * rake.bps as i64 / 10_000) as Chips,
                self.bblind * rake.cap_bbs,
            ),
            _ => 0,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Cash,
            structure: Structure::NoLimit,
            sblind: S_BLIND,
            bblind: B_BLIND,
            ante: 0,
            rake: None,
            seats: rail_core::N,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raked() -> GameConfig {
        GameConfig {
            rake: Some(RakeConfig::default()),
            bblind: 10,
            sblind: 5,
            ..GameConfig::default()
        }
    }

    #[test]
    fn no_rake_below_floor() {
        assert_eq!(raked().rake(99), 0);
    }

    #[test]
    fn rake_is_percentage_above_floor() {
        // 5% of 200 = 10, under the cap of 30.
        assert_eq!(raked().rake(200), 10);
    }

    #[test]
    fn rake_caps_at_multiple_of_blind() {
        // 5% of 1000 = 50, capped at 3bb = 30.
        assert_eq!(raked().rake(1000), 30);
    }

    #[test]
    fn tournaments_never_rake() {
        let config = GameConfig {
            mode: Mode::Tournament,
            ..raked()
        };
        assert_eq!(config.rake(1000), 0);
    }

    #[test]
    fn fixed_bets_double_on_later_streets() {
        let config = raked();
        assert_eq!(config.fixed_bet(Street::Pref), 10);
        assert_eq!(config.fixed_bet(Street::Flop), 10);
        assert_eq!(config.fixed_bet(Street::Turn), 20);
        assert_eq!(config.fixed_bet(Street::Rive), 20);
    }
}
