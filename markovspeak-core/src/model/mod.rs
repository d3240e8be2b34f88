//! Word-level Markov chain.
//!
//! - Transition table and start registry (`ChainModel`)
//! - Duplicate-preserving followup lists (`Followups`)

/// Trainer and random-walk sentence generator.
pub mod chain;

/// Per-word followup observations with weighted sampling.
pub mod followups;
