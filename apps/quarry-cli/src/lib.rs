use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quarry_config::Config;
use quarry_domain::{SearchMode, scope::Scope};
use quarry_retrieval::{
	HttpQueryEmbedder, PgChunkStore, RetrievalRequest, Retriever, RetrieverConfig,
};
use quarry_storage::db::Db;

#[derive(Debug, Parser)]
#[command(version, rename_all = "kebab")]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Creates the chunk table, indexes and tsvector trigger if absent.
	InitSchema,
	/// Runs a retrieval query and prints the ranked results as JSON.
	Search {
		query: String,
		/// Owner tag identifying the project to search within.
		#[arg(long)]
		tag: Option<String>,
		#[arg(long, default_value = "all")]
		scope: String,
		#[arg(long, default_value = "hybrid")]
		mode: String,
		#[arg(long)]
		limit: Option<u32>,
	},
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = quarry_config::load(&args.config)?;

	init_tracing(&config);

	let db = Db::connect(&config.storage.postgres).await?;

	match args.command {
		Command::InitSchema => {
			db.ensure_schema(
				config.providers.embedding.dimensions,
				&config.storage.postgres.text_search_config,
			)
			.await?;

			tracing::info!("Schema is up to date.");
		},
		Command::Search { query, tag, scope, mode, limit } => {
			let retriever_cfg = RetrieverConfig::from(&config);
			let store =
				PgChunkStore::new(db, config.storage.postgres.text_search_config.clone());
			let embedder = HttpQueryEmbedder::new(config.providers.embedding.clone());
			let retriever = Retriever::new(retriever_cfg, Arc::new(store), Arc::new(embedder));
			let request = RetrievalRequest {
				query,
				owner_tag: tag,
				scope: scope.parse::<Scope>()?,
				mode: mode.parse::<SearchMode>()?,
				limit,
			};
			let outcome = retriever.retrieve(&request).await?;

			println!("{}", serde_json::to_string_pretty(&outcome)?);
		},
	}

	Ok(())
}

fn init_tracing(config: &Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
