use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, SignatureError};

/// `class<SPACE>member<SPACE>(params)return`, anchored at the start of the line.
///
/// Class names exclude `;`, `[`, `/`, `<` and `>`; member names may contain
/// angle brackets (`<init>`) but none of `;`, `[`, `/`.
fn log_signature_re() -> &'static Regex {
    static LOG_SIGNATURE_RE: OnceLock<Regex> = OnceLock::new();
    LOG_SIGNATURE_RE.get_or_init(|| {
        Regex::new(r"^([^;\[/<>]+) ([^;\[/]+) (\(.*\))(.*)")
            .expect("log signature regex should compile")
    })
}

/// The four substrings of a compilation log signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSignature {
    pub class_name: String,
    pub member_name: String,
    /// The parenthesised parameter group, parentheses included.
    pub params: String,
    pub return_type: String,
}

/// Log files escape generic signatures; `&lt;`/`&gt;` are the only entities
/// they use.
pub fn unescape_angle_brackets(text: &str) -> Cow<'_, str> {
    if text.contains("&lt;") || text.contains("&gt;") {
        Cow::Owned(text.replace("&lt;", "<").replace("&gt;", ">"))
    } else {
        Cow::Borrowed(text)
    }
}

pub fn split_log_signature(line: &str) -> Result<LogSignature> {
    let unescaped = unescape_angle_brackets(line);
    let Some(caps) = log_signature_re().captures(&unescaped) else {
        return Err(SignatureError::parse(line));
    };

    Ok(LogSignature {
        class_name: caps[1].to_string(),
        member_name: caps[2].to_string(),
        params: caps[3].to_string(),
        return_type: caps[4].to_string(),
    })
}
