use std::path::PathBuf;
use std::sync::RwLock;

use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};
use clap::Parser;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use markovspeak_core::corpus::{read_file, train_from_lines};
use markovspeak_core::{ChainError, ChainModel};

/// Upper bound for `count` on `/v1/generate`
const MAX_COUNT: usize = 100;

/// Command-line configuration.
#[derive(Parser)]
#[command(name = "markovspeak-server")]
#[command(about = "Serve Markov chain sentences over HTTP", long_about = None)]
struct Config {
	/// Address to bind
	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	/// Port to bind
	#[arg(long, default_value_t = 5000)]
	port: u16,

	/// Log file trained before serving
	#[arg(long)]
	corpus: Option<PathBuf>,
}

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	count: Option<usize>,
}

#[derive(Serialize)]
struct Stats {
	sentences: usize,
	keys: usize,
}

/// Shared model. Training holds the write lock for a whole batch,
/// generation only takes the read lock.
type SharedModel = web::Data<RwLock<ChainModel>>;

/// HTTP GET endpoint `/v1/generate`
///
/// Returns `count` sentences (default 1), one per line.
#[get("/v1/generate")]
async fn get_generated(data: SharedModel, query: web::Query<GenerateParams>) -> impl Responder {
	let count = query.count.unwrap_or(1);
	if count == 0 || count > MAX_COUNT {
		return HttpResponse::BadRequest().body(format!("count must be between 1 and {MAX_COUNT}"));
	}

	let model = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let mut sentences = Vec::with_capacity(count);
	for _ in 0..count {
		match model.generate() {
			Ok(sentence) => sentences.push(sentence),
			Err(e @ ChainError::InvalidState) => return HttpResponse::Conflict().body(e.to_string()),
			Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
		}
	}

	HttpResponse::Ok().body(sentences.join("\n"))
}

/// HTTP PUT endpoint `/v1/train`
///
/// The body holds log lines; every usable line is trained as one sentence.
#[put("/v1/train")]
async fn put_train(data: SharedModel, body: String) -> impl Responder {
	let mut model = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let stats = train_from_lines(&mut model, body.lines());
	info!("trained {} sentences over http ({} skipped)", stats.trained, stats.skipped);
	HttpResponse::Ok().json(stats)
}

#[get("/v1/stats")]
async fn get_stats(data: SharedModel) -> impl Responder {
	let model = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().json(Stats { sentences: model.sentence_count(), keys: model.len() })
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated).service(put_train).service(get_stats);
}

/// Main entry point for the server.
///
/// Trains the optional corpus, wraps the model in a `RwLock` and starts
/// an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();
	let config = Config::parse();

	let mut model = ChainModel::new();
	if let Some(path) = &config.corpus {
		let stats = train_from_lines(&mut model, read_file(path)?);
		info!("trained {} sentences from {}", stats.trained, path.display());
	} else {
		warn!("starting with an empty model, PUT log lines to /v1/train");
	}
	let shared_model = web::Data::new(RwLock::new(model));

	info!("listening on {}:{}", config.host, config.port);
	HttpServer::new(move || App::new().app_data(shared_model.clone()).configure(configure))
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
