use regex::{Captures, Regex};

const PROPERTY_REFERENCE: &str = r"\$\{([^}]+)\}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
	pub value: String,
	/// Referenced names with no value; their `${name}` text is kept verbatim.
	pub unresolved: Vec<String>,
}

/// Expands `${name}` references in `template` using `lookup`.
pub fn expand_properties<F>(template: &str, lookup: F) -> Expansion
where
	F: Fn(&str) -> Option<String>,
{
	let Ok(re) = Regex::new(PROPERTY_REFERENCE) else {
		return Expansion { value: template.to_string(), unresolved: Vec::new() };
	};
	let mut unresolved = Vec::new();
	let value = re
		.replace_all(template, |caps: &Captures| {
			let name = caps[1].trim();

			match lookup(name) {
				Some(value) => value,
				None => {
					unresolved.push(name.to_string());

					caps[0].to_string()
				},
			}
		})
		.into_owned();

	Expansion { value, unresolved }
}

/// Replaces every occurrence of `token` with `host`.
pub fn substitute_host(endpoint: &str, token: &str, host: &str) -> String {
	if token.is_empty() {
		return endpoint.to_string();
	}

	endpoint.replace(token, host)
}
