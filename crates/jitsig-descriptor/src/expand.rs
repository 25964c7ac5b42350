use crate::primitive::PrimitiveKind;

/// Expands an encoded type token into its source-level spelling.
///
/// `[C` becomes `char[]`, `[[I` becomes `int[][]` and `[Ljava.lang.Object;`
/// becomes `java.lang.Object[]`. Tokens that are already expanded pass
/// through unchanged, so this never fails.
///
/// A primitive letter only counts as a primitive code when it is the last
/// character of the token; `Integer` or `Foo` are names, not `int`/`float`
/// followed by payload.
pub fn expand_descriptor(token: &str) -> String {
    let mut out = String::with_capacity(token.len() + 8);
    let mut depth = 0usize;

    for (pos, c) in token.char_indices() {
        match c {
            '[' => depth += 1,
            ';' => {}
            'L' if token.len() > pos + 1 && token.ends_with(';') => {
                out.push_str(&token[pos + 1..token.len() - 1]);
                break;
            }
            _ => {
                let rest = &token[pos..];
                match PrimitiveKind::from_code(c) {
                    Some(kind) if rest.len() == 1 => out.push_str(kind.name()),
                    _ => out.push_str(rest),
                }
                break;
            }
        }
    }

    for _ in 0..depth {
        out.push_str("[]");
    }
    out
}
