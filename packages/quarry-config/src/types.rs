use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
	/// Name of the Postgres text search configuration used by the tsvector
	/// trigger and both lexical query paths. Deployments with a hunspell
	/// dictionary installed point this at their language configuration.
	#[serde(default = "default_text_search_config")]
	pub text_search_config: String,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// RRF damping constant. Larger values flatten rank differences,
	/// emphasizing presence over exact position.
	#[serde(default = "default_rrf_k")]
	pub rrf_k: u32,
	/// Candidates fetched per mode before fusion.
	#[serde(default = "default_pool_size")]
	pub pool_size: u32,
	#[serde(default = "default_limit")]
	pub default_limit: u32,
	/// Reserved owner tag for the global reference corpus.
	pub system_tag: String,
	/// Per-sub-search timeout.
	#[serde(default = "default_search_timeout_ms")]
	pub search_timeout_ms: u64,
}

fn default_text_search_config() -> String {
	"simple".to_string()
}

fn default_rrf_k() -> u32 {
	60
}

fn default_pool_size() -> u32 {
	50
}

fn default_limit() -> u32 {
	5
}

fn default_search_timeout_ms() -> u64 {
	5_000
}
