use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use markovspeak_core::ChainModel;
use markovspeak_core::corpus::{read_file, train_from_lines};

/// Generate random sentences from a chat log.
#[derive(Parser)]
#[command(name = "markovspeak")]
#[command(about = "Babble like the people in a chat log", long_about = None)]
#[command(version)]
struct Cli {
	/// Log file, one `date time nick message` entry per line
	file: PathBuf,

	/// Number of sentences to print
	#[arg(short = 'n', long, default_value_t = 10)]
	count: usize,

	/// Seed for reproducible output
	#[arg(long)]
	seed: Option<u64>,
}

fn main() -> Result<()> {
	env_logger::init();
	let cli = Cli::parse();

	let lines = read_file(&cli.file).with_context(|| format!("failed to read {}", cli.file.display()))?;

	let mut model = ChainModel::new();
	let stats = train_from_lines(&mut model, &lines);
	info!(
		"trained {} sentences from {} lines ({} skipped), {} distinct words with followups",
		stats.trained,
		stats.lines,
		stats.skipped,
		model.len()
	);

	if model.is_empty() {
		bail!("no usable message in {}", cli.file.display());
	}

	let mut rng = match cli.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_rng(&mut rand::rng()),
	};
	for _ in 0..cli.count {
		println!("{}", model.generate_with(&mut rng)?);
	}

	Ok(())
}
