use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::{debug, trace};
use serde::Serialize;

use crate::error::CorpusError;
use crate::model::chain::ChainModel;

/// Nick column values the chat client uses for status lines
/// (joins, parts, notices) rather than user messages.
pub const STATUS_MARKERS: [&str; 5] = ["--", "-->", "<--", "▬▬▶", "◀▬▬"];

/// One message written by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserComment {
	pub nick: String,
	pub message: String,
}

impl UserComment {
	/// Message split on whitespace, ready for [`ChainModel::train`].
	pub fn tokens(&self) -> Vec<&str> {
		self.message.split_whitespace().collect()
	}
}

/// Counters reported after feeding log lines to a model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrainStats {
	/// Lines read
	pub lines: usize,
	/// Lines turned into a trained sentence
	pub trained: usize,
	/// Lines ignored (status lines, addressed messages, malformed lines)
	pub skipped: usize,
}

/// Reads a text file and returns all its lines.
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Parses a log line of the form `date time nick message...`.
///
/// Example: `2012-09-08 20:05:58     WeeZeL  very message such wow`
///
/// # Errors
/// Returns [`CorpusError::MalformedLine`] if the line has fewer than four
/// whitespace-separated fields.
pub fn parse_line(line: &str) -> Result<UserComment, CorpusError> {
	let fields: Vec<&str> = line.split_whitespace().collect();
	if fields.len() < 4 {
		return Err(CorpusError::MalformedLine(line.to_owned()));
	}

	Ok(UserComment {
		nick: fields[2].to_owned(),
		message: fields[3..].join(" "),
	})
}

/// Returns the user comment carried by a line, if it is worth training on.
///
/// Skips malformed lines, status lines and messages whose first word is
/// addressed with `@`.
pub fn comment_from_line(line: &str) -> Option<UserComment> {
	let comment = parse_line(line).ok()?;
	if STATUS_MARKERS.contains(&comment.nick.as_str()) {
		return None;
	}
	if comment.message.starts_with('@') {
		return None;
	}
	Some(comment)
}

/// Trains `model` with every usable line, one sentence per line.
pub fn train_from_lines<I, S>(model: &mut ChainModel, lines: I) -> TrainStats
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut stats = TrainStats::default();
	for line in lines {
		let line = line.as_ref();
		stats.lines += 1;

		let trained = comment_from_line(line).is_some_and(|comment| model.train(&comment.tokens()).is_ok());
		if trained {
			stats.trained += 1;
		} else {
			trace!("skipped line {line:?}");
			stats.skipped += 1;
		}
	}

	debug!("read {} lines: {} trained, {} skipped", stats.lines, stats.trained, stats.skipped);
	stats
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_date_time_nick_and_message() {
		let comment = parse_line("2012-09-08 20:05:58     WeeZeL  very message such wow").unwrap();
		assert_eq!(comment.nick, "WeeZeL");
		assert_eq!(comment.message, "very message such wow");
		assert_eq!(comment.tokens(), ["very", "message", "such", "wow"]);
	}

	#[test]
	fn short_line_is_malformed() {
		let line = "2012-09-08 20:05:58 WeeZeL";
		assert_eq!(parse_line(line), Err(CorpusError::MalformedLine(line.to_owned())));
		assert_eq!(comment_from_line(line), None);
		assert_eq!(comment_from_line(""), None);
	}

	#[test]
	fn skips_status_lines() {
		for marker in STATUS_MARKERS {
			let line = format!("2012-09-08 20:05:58 {marker} WeeZeL has joined #channel");
			assert_eq!(comment_from_line(&line), None, "{marker}");
		}
	}

	#[test]
	fn skips_addressed_messages() {
		assert_eq!(comment_from_line("2012-09-08 20:06:01 WeeZeL @bot weather"), None);
		assert!(comment_from_line("2012-09-08 20:06:01 WeeZeL hey @bot").is_some());
	}

	#[test]
	fn trains_one_sentence_per_kept_line() {
		let lines = [
			"2012-09-08 20:05:58 WeeZeL Oh no you again",
			"2012-09-08 20:06:00 -- Someone has quit",
			"2012-09-08 20:06:01 Other @WeeZeL yes me",
			"garbage",
			"2012-09-08 20:06:05 Other oh well",
		];
		let mut model = ChainModel::new();
		let stats = train_from_lines(&mut model, lines);

		assert_eq!(stats, TrainStats { lines: 5, trained: 2, skipped: 3 });
		assert_eq!(model.first_words(), ["oh", "oh"]);
		assert_eq!(model.followups("oh").unwrap(), ["no", "well"]);
	}

	#[test]
	fn reads_lines_from_file() {
		let path = std::env::temp_dir().join(format!("markovspeak-corpus-{}.log", std::process::id()));
		std::fs::write(&path, "first line\r\nsecond line\n").unwrap();
		let lines = read_file(&path).unwrap();
		std::fs::remove_file(&path).unwrap();
		assert_eq!(lines, ["first line", "second line"]);
	}
}
