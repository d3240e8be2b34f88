//! Markov chain sentence generation library.
//!
//! This crate provides:
//! - A first-order, word-level Markov chain trained on tokenized sentences
//! - Frequency-weighted random-walk generation with a bounded walk length
//! - A reader turning chat log lines into training sentences
//!
//! The model lives in memory only and grows through training.

/// Chain model and sentence generation.
pub mod model;

/// Chat log parsing (the training corpus).
pub mod corpus;

/// Error types.
pub mod error;

pub use error::{ChainError, CorpusError};
pub use model::chain::{ChainModel, MAX_WALK_STEPS};
