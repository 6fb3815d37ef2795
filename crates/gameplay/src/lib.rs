//! Poker rules engine with state management, pot layering, and settlement.
//!
//! This crate implements the mechanics of Texas Hold'em for no-limit,
//! pot-limit, and fixed-limit structures, tracking a hand from blinds to
//! settlement.
//!
//! ## State Representation
//!
//! - [`HandState`] — One hand in flight: seats, board, deck, action pointer
//! - [`Seat`] — Per-player stack, street bet, hand bet, hole cards, status
//! - [`Phase`] — Waiting → betting streets → Showdown → Settled
//!
//! ## Actions
//!
//! - [`Action`] — A player decision or forced post
//! - [`Turn`] — Whose move: chance (deal), choice (seat), or terminal
//! - [`Menu`] — Legal options with call amount and raise bounds for the wire
//!
//! ## Resolution
//!
//! - [`PotLayer`] — One side-pot segment with its eligibility set
//! - [`PotAward`] — A layer's winners and amount after rake
//! - [`Settlement`] — Per-seat risked/reward accounting
mod action;
mod config;
mod hand;
mod pot;
mod rules;
mod seat;
mod settlement;
mod showdown;
mod turn;

pub use action::*;
pub use config::*;
pub use hand::*;
pub use pot::*;
pub use rules::*;
pub use seat::*;
pub use settlement::*;
pub use showdown::*;
pub use turn::*;
