use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use quarry_config::Config;

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_with<F>(mutate: F) -> String
where
	F: FnOnce(&mut toml::Table),
{
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let root = value.as_table_mut().expect("Template config must be a table.");

	mutate(root);

	toml::to_string(&value).expect("Failed to render template config.")
}

fn section_mut<'a>(root: &'a mut toml::Table, path: &[&str]) -> &'a mut toml::Table {
	let mut table = root;

	for key in path {
		table = table
			.get_mut(*key)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Template config must include [{key}]."));
	}

	table
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("quarry_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_expecting_error(payload: String, needle: &str) {
	let path = write_temp_config(payload);
	let result = quarry_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected a validation error.");
	let message = err.to_string();

	assert!(message.contains(needle), "Unexpected error message: {message}");
}

#[test]
fn sample_config_loads() {
	let path = write_temp_config(SAMPLE_CONFIG_TEMPLATE_TOML.to_string());
	let result = quarry_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Sample config must load.");

	assert_eq!(cfg.search.rrf_k, 60);
	assert_eq!(cfg.search.pool_size, 50);
	assert_eq!(cfg.search.default_limit, 5);
	assert_eq!(cfg.search.system_tag, "SYSTEM");
	assert_eq!(cfg.storage.postgres.text_search_config, "simple");
}

#[test]
fn defaults_fill_optional_search_fields() {
	let payload = sample_with(|root| {
		let search = section_mut(root, &["search"]);

		search.remove("rrf_k");
		search.remove("pool_size");
		search.remove("default_limit");
		search.remove("search_timeout_ms");
	});
	let cfg: Config = toml::from_str(&payload).expect("Config with defaults must parse.");

	assert_eq!(cfg.search.rrf_k, 60);
	assert_eq!(cfg.search.pool_size, 50);
	assert_eq!(cfg.search.default_limit, 5);
	assert_eq!(cfg.search.search_timeout_ms, 5_000);
}

#[test]
fn empty_dsn_is_rejected() {
	let payload = sample_with(|root| {
		section_mut(root, &["storage", "postgres"])
			.insert("dsn".to_string(), Value::String("  ".to_string()));
	});

	load_expecting_error(payload, "storage.postgres.dsn must be non-empty.");
}

#[test]
fn zero_pool_max_conns_is_rejected() {
	let payload = sample_with(|root| {
		section_mut(root, &["storage", "postgres"])
			.insert("pool_max_conns".to_string(), Value::Integer(0));
	});

	load_expecting_error(payload, "storage.postgres.pool_max_conns must be greater than zero.");
}

#[test]
fn zero_embedding_dimensions_is_rejected() {
	let payload = sample_with(|root| {
		section_mut(root, &["providers", "embedding"])
			.insert("dimensions".to_string(), Value::Integer(0));
	});

	load_expecting_error(payload, "providers.embedding.dimensions must be greater than zero.");
}

#[test]
fn zero_rrf_k_is_rejected() {
	let payload = sample_with(|root| {
		section_mut(root, &["search"]).insert("rrf_k".to_string(), Value::Integer(0));
	});

	load_expecting_error(payload, "search.rrf_k must be greater than zero.");
}

#[test]
fn pool_size_below_default_limit_is_rejected() {
	let payload = sample_with(|root| {
		let search = section_mut(root, &["search"]);

		search.insert("pool_size".to_string(), Value::Integer(3));
		search.insert("default_limit".to_string(), Value::Integer(5));
	});

	load_expecting_error(payload, "search.pool_size must not be less than search.default_limit.");
}

#[test]
fn empty_system_tag_is_rejected() {
	let payload = sample_with(|root| {
		section_mut(root, &["search"])
			.insert("system_tag".to_string(), Value::String(String::new()));
	});

	load_expecting_error(payload, "search.system_tag must be non-empty.");
}

#[test]
fn system_tag_is_trimmed() {
	let payload = sample_with(|root| {
		section_mut(root, &["search"])
			.insert("system_tag".to_string(), Value::String("  SYSTEM  ".to_string()));
	});
	let path = write_temp_config(payload);
	let result = quarry_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Config with padded system tag must load.");

	assert_eq!(cfg.search.system_tag, "SYSTEM");
}
