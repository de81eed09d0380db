//! The secret sequence and the verifier that replays it.
//!
//! - [`SequenceStore`]: grows by one secret per round, cleared on reset
//! - [`GuessVerifier`]: checks a listening phase's guesses one at a time

mod store;
mod verifier;

pub use store::SequenceStore;
pub use verifier::{CheckAnswer, GuessVerifier, Verdict};
