pub fn render_schema(vector_dim: u32, ts_config: &str) -> String {
	let init = include_str!("../../../sql/init.sql");
	let expanded = expand_includes(init);

	expanded
		.replace("<VECTOR_DIM>", &vector_dim.to_string())
		.replace("<TS_CONFIG>", ts_config)
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_extensions.sql" => out.push_str(include_str!("../../../sql/00_extensions.sql")),
				"tables/001_document_chunks.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_document_chunks.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_dimension_and_text_search_config() {
		let sql = render_schema(768, "ukrainian");

		assert!(sql.contains("vector(768)"));
		assert!(sql.contains("to_tsvector('ukrainian'"));
		assert!(!sql.contains("<VECTOR_DIM>"));
		assert!(!sql.contains("<TS_CONFIG>"));
		assert!(!sql.contains("\\ir "));
	}
}
