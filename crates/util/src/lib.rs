//! Core type aliases, identity types, and constants for railbird.
//!
//! This crate provides the foundational types and configuration parameters
//! used throughout the railbird workspace.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Stack sizes, bets, and pot amounts in chips.
pub type Chips = i32;
/// Seat index around the table.
pub type Position = usize;
/// Per-hand event sequence number.
pub type Seq = u64;
/// Monotonic hand counter within a game.
pub type HandNo = u64;
/// Milliseconds since the unix epoch, as stamped on wire events.
pub type Millis = u64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Cast ID<T> to ID<U> while preserving the underlying UUID.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        uuid::Uuid::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// TABLE PARAMETERS
// ============================================================================
/// Default number of seats at a table.
pub const N: usize = 6;
/// Default starting stack size in chips.
pub const STACK: Chips = 200;
/// Default big blind amount.
pub const B_BLIND: Chips = 2;
/// Default small blind amount.
pub const S_BLIND: Chips = 1;

// ============================================================================
// RAKE (cash games only)
// rake = min(pot * RAKE_BPS / 10_000, bb * RAKE_CAP_BBS), zero below floor.
// ============================================================================
/// Rake percentage in basis points (500 = 5%).
pub const RAKE_BPS: Chips = 500;
/// Rake cap as a multiple of the big blind.
pub const RAKE_CAP_BBS: Chips = 3;
/// No rake is taken from pots below this multiple of the big blind.
pub const RAKE_FLOOR_BBS: Chips = 10;

// ============================================================================
// TIMING
// ============================================================================
/// Turn clock for a human decision (seconds).
pub const TURN_CLOCK_SECS: u64 = 30;
/// Deadline for an oracle (LLM) decision (seconds).
pub const ORACLE_DEADLINE_SECS: u64 = 15;
/// Ack-gate timeout for animation-bearing events (milliseconds).
pub const ACK_TIMEOUT_MS: u64 = 3000;
/// Interval between server heartbeat pings (seconds).
pub const HEARTBEAT_SECS: u64 = 30;
/// A session silent for this long is closed (seconds).
pub const SESSION_IDLE_SECS: u64 = 90;
/// A game nobody ever joins is destroyed after this long (seconds).
pub const GAME_IDLE_SECS: u64 = 300;

// ============================================================================
// SESSION LIMITS
// ============================================================================
/// Maximum inbound messages per session per minute.
pub const RATE_LIMIT_PER_MIN: usize = 60;
/// Outbound event buffer per session; overflow disconnects the session.
pub const SESSION_BUFFER: usize = 256;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.unwrap();
        println!();
        log::warn!("interrupt received, exiting immediately");
        std::process::exit(0);
    });
}

/// Milliseconds since the unix epoch.
pub fn now_millis() -> Millis {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as Millis)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn id_roundtrips_through_uuid() {
        let id = ID::<Marker>::default();
        assert_eq!(id, ID::from(uuid::Uuid::from(id)));
    }

    #[test]
    fn id_cast_preserves_inner() {
        struct Other;
        let id = ID::<Marker>::default();
        assert_eq!(id.inner(), id.cast::<Other>().inner());
    }
}
