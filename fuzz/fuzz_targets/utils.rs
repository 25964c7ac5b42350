use std::str;

pub const MAX_INPUT_SIZE: usize = 64 * 1024;

/// `data` capped at `MAX_INPUT_SIZE` bytes, if that prefix is UTF-8.
///
/// Up to 3 trailing bytes are dropped to recover from a cut codepoint.
#[inline]
pub fn truncate_utf8(data: &[u8]) -> Option<&str> {
    let cap = data.len().min(MAX_INPUT_SIZE);
    (0..=3.min(cap)).find_map(|trim| str::from_utf8(&data[..cap - trim]).ok())
}
