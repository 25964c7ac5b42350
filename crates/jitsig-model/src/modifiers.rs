//! Access flag bits shared by class files and disassembler output.

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_PROTECTED: u16 = 0x0004;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_FINAL: u16 = 0x0010;
pub const ACC_SYNCHRONIZED: u16 = 0x0020;
pub const ACC_BRIDGE: u16 = 0x0040;
pub const ACC_VARARGS: u16 = 0x0080;
pub const ACC_NATIVE: u16 = 0x0100;
pub const ACC_INTERFACE: u16 = 0x0200;
pub const ACC_ABSTRACT: u16 = 0x0400;
pub const ACC_STRICT: u16 = 0x0800;

/// Bits that can be spelled as a keyword on a method declaration.
///
/// `ACC_BRIDGE` and `ACC_VARARGS` share their values with `volatile` and
/// `transient`, so they are masked out before comparing modifiers.
pub const METHOD_MODIFIERS: u16 = ACC_PUBLIC
    | ACC_PRIVATE
    | ACC_PROTECTED
    | ACC_STATIC
    | ACC_FINAL
    | ACC_SYNCHRONIZED
    | ACC_NATIVE
    | ACC_ABSTRACT
    | ACC_STRICT;

static KEYWORDS: [(&str, u16); 9] = [
    ("public", ACC_PUBLIC),
    ("private", ACC_PRIVATE),
    ("protected", ACC_PROTECTED),
    ("static", ACC_STATIC),
    ("final", ACC_FINAL),
    ("synchronized", ACC_SYNCHRONIZED),
    ("native", ACC_NATIVE),
    ("abstract", ACC_ABSTRACT),
    ("strictfp", ACC_STRICT),
];

pub fn from_keyword(keyword: &str) -> Option<u16> {
    KEYWORDS
        .iter()
        .find(|(kw, _)| *kw == keyword)
        .map(|(_, bit)| *bit)
}

/// Space separated keywords in declaration order (`public static final`).
pub fn to_keywords(modifier: u16) -> String {
    KEYWORDS
        .iter()
        .filter(|(_, bit)| modifier & bit != 0)
        .map(|(kw, _)| *kw)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_round_trip() {
        let modifier = ACC_PUBLIC | ACC_STATIC | ACC_FINAL;
        assert_eq!(to_keywords(modifier), "public static final");
        let parsed = to_keywords(modifier)
            .split(' ')
            .filter_map(from_keyword)
            .fold(0, |acc, bit| acc | bit);
        assert_eq!(parsed, modifier);
    }

    #[test]
    fn varargs_bit_is_not_a_keyword() {
        assert_eq!(ACC_VARARGS & METHOD_MODIFIERS, 0);
        assert_eq!(from_keyword("default"), None);
    }
}
