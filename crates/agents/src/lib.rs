//! Oracle and memory port implementations.
//!
//! The engine treats opponents as an opaque decision port; this crate
//! supplies the concrete ends of that port that ship with the server:
//!
//! - [`Archetype`] — Flat `(id, config)` description of an opponent style
//! - [`HouseOracle`] — Built-in archetype-parameterized opponents, used
//!   whenever no external LLM provider is wired in
//! - [`Scripted`] — Deterministic advice queue for tests
//! - [`parse_advice`] — Defensive funnel from raw model output to advice
//! - [`JsonlMemory`] — Optional append-only hand-history sink
mod archetype;
mod house;
mod memory;
mod parse;
mod scripted;

pub use archetype::*;
pub use house::*;
pub use memory::*;
pub use parse::*;
pub use scripted::*;
