use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

pub const ATTR_NAME: &str = "name";
pub const ATTR_HOLDER: &str = "holder";
pub const ATTR_RETURN: &str = "return";
pub const ATTR_ARGUMENTS: &str = "arguments";
/// Short spelling of [`ATTR_ARGUMENTS`], read when the long one is absent.
pub const ATTR_ARGS: &str = "args";

/// Which id table of a compilation log an id points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Method,
    Klass,
    Type,
}

/// The raw attributes of one `<method>`, `<klass>` or `<type>` log element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    attributes: BTreeMap<String, String>,
}

impl DictionaryEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

pub trait ParseDictionary: Send + Sync {
    fn entry(&self, kind: EntryKind, id: &str) -> Option<&DictionaryEntry>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDictionary {
    entries: HashMap<(EntryKind, String), DictionaryEntry>,
}

impl MemoryDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: EntryKind, id: &str, entry: DictionaryEntry) {
        self.entries.insert((kind, id.to_string()), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ParseDictionary for MemoryDictionary {
    fn entry(&self, kind: EntryKind, id: &str) -> Option<&DictionaryEntry> {
        self.entries.get(&(kind, id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_keyed_by_kind_and_id() {
        let mut dict = MemoryDictionary::new();
        dict.insert(
            EntryKind::Klass,
            "7",
            DictionaryEntry::new().with(ATTR_NAME, "java/util/ArrayList"),
        );
        dict.insert(EntryKind::Type, "7", DictionaryEntry::new().with(ATTR_NAME, "I"));

        assert_eq!(dict.len(), 2);
        assert_eq!(
            dict.entry(EntryKind::Klass, "7").and_then(|e| e.attr(ATTR_NAME)),
            Some("java/util/ArrayList")
        );
        assert_eq!(
            dict.entry(EntryKind::Type, "7").and_then(|e| e.attr(ATTR_NAME)),
            Some("I")
        );
        assert!(dict.entry(EntryKind::Method, "7").is_none());
    }
}
