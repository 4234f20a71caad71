//! Permalink extraction from front matter.

use std::sync::LazyLock;

use regex::Regex;

/// `permalink:` key at the start of a line, value up to the end of that line.
static PERMALINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^permalink:[ \t]*(.+)$").unwrap());

/// Extract the declared permalink from a content file.
///
/// Only the first `permalink:` line counts. Surrounding whitespace and quote
/// characters are stripped; a value that is empty after stripping counts as
/// no permalink.
#[must_use]
pub fn extract_permalink(content: &str) -> Option<String> {
    let captures = PERMALINK_RE.captures(content)?;
    let value = strip_quotes(captures.get(1)?.as_str());
    (!value.is_empty()).then(|| value.to_owned())
}

fn strip_quotes(value: &str) -> &str {
    value.trim_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace())
}
