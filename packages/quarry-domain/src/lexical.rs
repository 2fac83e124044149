use regex::Regex;

/// A lexical query ready for the full-text backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexicalQuery {
	/// A tsquery expression with explicit `&`/`|` operators and quoted
	/// lexemes.
	Expression(String),
	/// The raw query, to be handed to the backend's web-search parser when
	/// token filtering leaves nothing usable.
	WebSearch(String),
}

const STRIPPED_PUNCTUATION: [char; 4] = ['?', '!', '(', ')'];
const MIN_WORD_CHARS: usize = 3;

/// Builds a lexical query expression from free-form query text.
///
/// Numeric tokens (clause numbers, versions) are high-precision signals and
/// are required conjunctively; the surviving word tokens are combined
/// disjunctively for recall. Queries that filter down to nothing fall back
/// to the backend's web-search parser so a lookup is always attempted.
pub fn build_query(raw: &str) -> LexicalQuery {
	let cleaned: String =
		raw.chars().map(|ch| if STRIPPED_PUNCTUATION.contains(&ch) { ' ' } else { ch }).collect();
	let numerics = numeric_tokens(&cleaned);
	let words: Vec<&str> = cleaned
		.split_whitespace()
		.filter(|token| token.chars().count() >= MIN_WORD_CHARS)
		.filter(|token| token.chars().any(char::is_alphanumeric))
		.filter(|token| !is_numeric_token(token))
		.collect();

	if numerics.is_empty() && words.is_empty() {
		return LexicalQuery::WebSearch(raw.to_string());
	}

	let numeric_part = join_lexemes(&numerics, " & ");
	let word_part = join_lexemes(&words, " | ");

	let expression = match (numeric_part, word_part) {
		(Some(numbers), Some(words)) => format!("({numbers}) & ({words})"),
		(Some(numbers), None) => numbers,
		(None, Some(words)) => words,
		// Unreachable given the emptiness check above.
		(None, None) => return LexicalQuery::WebSearch(raw.to_string()),
	};

	LexicalQuery::Expression(expression)
}

/// Scans the cleaned text for integers and decimals. Runs separately from
/// word tokenization so short identifiers like "8.3" survive the length
/// filter.
fn numeric_tokens(cleaned: &str) -> Vec<String> {
	let Ok(re) = Regex::new(r"\d+(?:\.\d+)?") else {
		return Vec::new();
	};
	let mut out = Vec::new();

	for found in re.find_iter(cleaned) {
		let token = found.as_str().to_string();

		if !out.contains(&token) {
			out.push(token);
		}
	}

	out
}

fn is_numeric_token(token: &str) -> bool {
	let mut seen_digit = false;
	let mut seen_dot = false;

	for ch in token.chars() {
		match ch {
			'0'..='9' => seen_digit = true,
			'.' if !seen_dot => seen_dot = true,
			_ => return false,
		}
	}

	seen_digit
}

fn join_lexemes<S>(tokens: &[S], separator: &str) -> Option<String>
where
	S: AsRef<str>,
{
	if tokens.is_empty() {
		return None;
	}

	Some(tokens.iter().map(|token| quote_lexeme(token.as_ref())).collect::<Vec<_>>().join(separator))
}

// tsquery lexemes are single-quoted so decimals and hyphenated identifiers
// survive parsing; embedded quotes are doubled.
fn quote_lexeme(token: &str) -> String {
	format!("'{}'", token.replace('\'', "''"))
}
