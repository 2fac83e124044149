mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, EmbeddingProviderConfig, Postgres, Providers, Search, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.postgres.text_search_config.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.text_search_config must be non-empty.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.embedding.api_key must be non-empty.".to_string(),
		});
	}
	if cfg.search.rrf_k == 0 {
		return Err(Error::Validation {
			message: "search.rrf_k must be greater than zero.".to_string(),
		});
	}
	if cfg.search.default_limit == 0 {
		return Err(Error::Validation {
			message: "search.default_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.pool_size < cfg.search.default_limit {
		return Err(Error::Validation {
			message: "search.pool_size must not be less than search.default_limit.".to_string(),
		});
	}
	if cfg.search.system_tag.trim().is_empty() {
		return Err(Error::Validation {
			message: "search.system_tag must be non-empty.".to_string(),
		});
	}
	if cfg.search.search_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.search_timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let trimmed = cfg.search.system_tag.trim();

	if trimmed.len() != cfg.search.system_tag.len() {
		cfg.search.system_tag = trimmed.to_string();
	}

	let trimmed = cfg.storage.postgres.text_search_config.trim();

	if trimmed.len() != cfg.storage.postgres.text_search_config.len() {
		cfg.storage.postgres.text_search_config = trimmed.to_string();
	}
}
