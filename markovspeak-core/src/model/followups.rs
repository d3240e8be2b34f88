use rand::Rng;
use rand::seq::IndexedRandom;

/// Ordered list of the tokens observed right after one key token.
///
/// The list is not a set: a token recorded `k` times appears `k` times, so a
/// uniform draw by position is a draw weighted by observation count. No
/// separate counter table is kept.
///
/// ## Invariants
/// - Never empty: a `Followups` is only built together with its first token
/// - Entries are already normalized (lower case)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Followups {
	tokens: Vec<String>,
}

impl Followups {
	/// Creates the list with its first observed token.
	pub(crate) fn with_first(token: String) -> Self {
		Self { tokens: vec![token] }
	}

	/// Records one more observation of `token`.
	pub(crate) fn push(&mut self, token: String) {
		self.tokens.push(token);
	}

	/// Draws one recorded observation uniformly by position.
	pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
		// Non-empty by construction, the fallback is unreachable
		self.tokens.choose(rng).map(String::as_str).unwrap_or_default()
	}

	/// All recorded observations in insertion order.
	pub fn as_slice(&self) -> &[String] {
		&self.tokens
	}
}
