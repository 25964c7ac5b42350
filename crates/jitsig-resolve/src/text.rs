//! Small string helpers for type names as they appear in logs and sources.

/// Removes the span from the first `<` to the last `>`: `java.util.List<T>[]`
/// becomes `java.util.List[]`.
pub fn strip_generics(name: &str) -> String {
    match (name.find('<'), name.rfind('>')) {
        (Some(open), Some(close)) if open < close => {
            format!("{}{}", &name[..open], &name[close + 1..])
        }
        _ => name.to_string(),
    }
}

/// Number of `[]` pairs in `name`.
pub fn array_bracket_count(name: &str) -> usize {
    name.matches("[]").count()
}

pub fn type_is_varargs(name: &str) -> bool {
    name.ends_with("...")
}

/// `name` up to its first `[]` pair.
pub fn param_type_without_array_brackets(name: &str) -> &str {
    match name.find("[]") {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Rewrites a trailing `...` to `[]`.
pub fn varargs_to_array(name: &str) -> String {
    match name.strip_suffix("...") {
        Some(component) => format!("{component}[]"),
        None => name.to_string(),
    }
}

/// Splits on `separator` outside of angle brackets, trimming each piece and
/// dropping empty ones.
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                pieces.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Converts a log timestamp in seconds (`1.234`, or `1,234` from a comma
/// decimal locale) to whole milliseconds. Unparsable stamps count as zero.
pub fn parse_stamp(stamp: &str) -> u64 {
    let normalized = stamp.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => (seconds * 1000.0).round() as u64,
        _ => {
            tracing::warn!(stamp, "could not parse stamp");
            0
        }
    }
}

/// The package named by the last `package ...;` line, or an empty string.
pub fn package_from_source(source: &str) -> String {
    source
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix("package "))
        .filter_map(|rest| rest.strip_suffix(';'))
        .map(|name| name.trim().to_string())
        .last()
        .unwrap_or_default()
}

/// The simple name of the last class declared in `source`, or an empty string.
pub fn class_from_source(source: &str) -> String {
    source
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            line.strip_prefix("class ")
                .or_else(|| line.find(" class ").map(|idx| &line[idx + " class ".len()..]))
        })
        .filter_map(|rest| {
            let name: String = rest
                .trim_start()
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
                .collect();
            (!name.is_empty()).then_some(name)
        })
        .last()
        .unwrap_or_default()
}
