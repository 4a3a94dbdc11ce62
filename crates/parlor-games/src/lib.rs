//! Turn-based rule engines for Parlor.
//!
//! Three independent, pure modules — [`nim`], [`kniffel`], [`fishing`] —
//! each taking a snapshot plus an action and producing the next snapshot.
//! They run on the *clients*: a player's action is computed locally against
//! the last received snapshot and the result is pushed through the relay,
//! which stores and fans it out without judging legality. The engines are
//! therefore the only place where game rules live.
//!
//! Engine functions never perform I/O. Entropy (dice rolls, shuffles) is
//! injected as `&mut impl Rng`, so every function is deterministic under a
//! seeded generator.
//!
//! Illegal actions return a typed [`GameError`] and leave the input
//! snapshot untouched — an operation either fully applies or does nothing.

pub mod fishing;
pub mod kniffel;
pub mod nim;

mod error;

pub use error::GameError;
