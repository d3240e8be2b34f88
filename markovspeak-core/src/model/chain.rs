use std::collections::HashMap;

use log::trace;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::followups::Followups;
use crate::error::ChainError;

/// Upper bound on followup draws in one generated sentence.
///
/// The learned table can hold cycles (`a -> b -> a`), nothing else stops
/// the walk, so a sentence holds at most `MAX_WALK_STEPS + 1` words.
pub const MAX_WALK_STEPS: usize = 64;

/// First-order word-level Markov chain.
///
/// The `ChainModel` records, for every word seen in training, the words that
/// followed it, and which words opened a sentence. Generation is a random
/// walk over those observations.
///
/// # Responsibilities
/// - Normalize tokens to lower case once, when they enter the model
/// - Record every adjacent pair of a sentence as a transition
/// - Record the first word of every sentence, duplicates included
/// - Generate sentences by frequency-weighted random walk, bounded by
///   [`MAX_WALK_STEPS`]
///
/// # Invariants
/// - Every key of `transitions` has at least one followup
/// - Keys and followups are lower case; no two keys differ only by case
/// - Nothing is ever removed. Training grows the model and generation only
///   reads it, so concurrent callers must hold a write lock across training
#[derive(Clone, Debug, Default)]
pub struct ChainModel {
	/// Word -> every word observed right after it
	transitions: HashMap<String, Followups>,

	/// First word of every trained sentence, in training order
	first_words: Vec<String>,
}

impl ChainModel {
	/// Creates an empty model.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds one tokenized sentence to the model.
	///
	/// Every token is lower-cased, the first one is appended to the start
	/// registry, and each token but the last gets its successor appended to
	/// its followups.
	///
	/// # Errors
	/// Returns [`ChainError::EmptyInput`] if `tokens` is empty. The model is
	/// left unchanged.
	pub fn train<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<(), ChainError> {
		if tokens.is_empty() {
			return Err(ChainError::EmptyInput);
		}

		let lowered: Vec<String> = tokens.iter().map(|t| t.as_ref().to_lowercase()).collect();
		self.first_words.push(lowered[0].clone());

		for pair in lowered.windows(2) {
			let (word, followup) = (&pair[0], &pair[1]);
			match self.transitions.get_mut(word) {
				Some(followups) => followups.push(followup.clone()),
				None => {
					self.transitions.insert(word.clone(), Followups::with_first(followup.clone()));
				}
			}
		}

		trace!("trained sentence of {} tokens starting with {:?}", lowered.len(), lowered[0]);
		Ok(())
	}

	/// Generates one sentence using the thread-local RNG.
	///
	/// # Errors
	/// Returns [`ChainError::InvalidState`] if nothing was trained.
	pub fn generate(&self) -> Result<String, ChainError> {
		self.generate_with(&mut rand::rng())
	}

	/// Generates one sentence, words joined by single spaces.
	///
	/// Same walk as [`generate_words_with`](Self::generate_words_with); the
	/// result has no leading or trailing separator.
	pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, ChainError> {
		Ok(self.generate_words_with(rng)?.join(" "))
	}

	/// Walks the chain and returns the visited words.
	///
	/// - The start word is drawn uniformly from the start registry, so a word
	///   opening many sentences is picked proportionally more often.
	/// - Each step draws uniformly from the current word's followups.
	/// - The walk stops when the current word has no followups, is empty, or
	///   after [`MAX_WALK_STEPS`] steps.
	///
	/// The stop condition yields no word: the result never ends with an
	/// empty token.
	///
	/// # Errors
	/// Returns [`ChainError::InvalidState`] if nothing was trained.
	pub fn generate_words_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<String>, ChainError> {
		let start = self.first_words.choose(rng).ok_or(ChainError::InvalidState)?;
		if start.is_empty() {
			return Ok(Vec::new());
		}

		let mut words = vec![start.clone()];
		let mut current = start.as_str();
		for _ in 0..MAX_WALK_STEPS {
			let Some(followups) = self.transitions.get(current) else {
				break;
			};
			current = followups.choose(rng);
			if current.is_empty() {
				break;
			}
			words.push(current.to_owned());
		}

		Ok(words)
	}

	/// Returns the recorded followups of an already lower-cased word.
	///
	/// The lookup is exact; `"Oh"` never matches the key `"oh"`.
	pub fn followups(&self, word: &str) -> Option<&[String]> {
		self.transitions.get(word).map(Followups::as_slice)
	}

	/// First word of every trained sentence, in training order.
	pub fn first_words(&self) -> &[String] {
		&self.first_words
	}

	/// Number of distinct words that have at least one followup.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	/// True when no sentence has been trained.
	pub fn is_empty(&self) -> bool {
		self.first_words.is_empty()
	}

	/// Number of trained sentences.
	pub fn sentence_count(&self) -> usize {
		self.first_words.len()
	}
}
