//! Error types for the chain model and the corpus reader.

use thiserror::Error;

/// Errors reported by [`ChainModel`](crate::model::chain::ChainModel).
///
/// Both are recoverable: the model is left unchanged and the caller decides
/// whether to skip, retry or abort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
	/// `train` was given a sentence without tokens
	#[error("cannot train on an empty sentence")]
	EmptyInput,

	/// `generate` was called before any sentence was trained
	#[error("model has no trained sentences")]
	InvalidState,
}

/// Errors reported while reading chat log lines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorpusError {
	/// Line does not carry date, time, nick and at least one message word
	#[error("malformed log line: {0:?}")]
	MalformedLine(String),
}
