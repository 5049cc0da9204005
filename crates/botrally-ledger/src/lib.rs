//! The round ledger: per-round programming record submissions.
//!
//! Each round, every player in a room commits a five-register program.
//! The ledger accumulates those records, answers "what did round R
//! contain", and tells you when a round is complete. It shares the
//! entity store with the session coordinator but owns no lifecycle — the
//! coordinator's cascades clean up records when users exit or rooms die.

mod error;
mod ledger;

pub use error::LedgerError;
pub use ledger::RoundLedger;
