use rail_core::ACK_TIMEOUT_MS;
use rail_core::ORACLE_DEADLINE_SECS;
use rail_core::TURN_CLOCK_SECS;
use std::time::Duration;

/// Bounded-wait durations for the three suspension points of a game:
/// a human turn, an oracle decision, and an animation ack gate.
#[derive(Debug, Clone, Copy)]
pub struct TimerConfig {
    pub turn: Duration,
    pub oracle: Duration,
    pub ack: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            turn: Duration::from_secs(TURN_CLOCK_SECS),
            oracle: Duration::from_secs(ORACLE_DEADLINE_SECS),
            ack: Duration::from_millis(ACK_TIMEOUT_MS),
        }
    }
}

impl TimerConfig {
    /// Millisecond turn clock for the wire's `time_limit` field.
    pub fn turn_millis(&self) -> u64 {
        self.turn.as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = TimerConfig::default();
        assert_eq!(config.turn, Duration::from_secs(30));
        assert_eq!(config.oracle, Duration::from_secs(15));
        assert_eq!(config.ack, Duration::from_millis(3000));
    }
}
