//! Metadata collected when a session is set up

use std::collections::BTreeMap;

/// Key/value metadata of the open file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MetadataStore {
    /// No store was requested
    #[default]
    Dummy,
    Populated(BTreeMap<String, String>),
}

impl MetadataStore {
    /// Build a store from reader entries, sanitizing values when `filter` is set
    pub fn from_entries<I>(entries: I, filter: bool) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let map = entries
            .into_iter()
            .filter_map(|(key, value)| {
                if filter {
                    filter_value(&value).map(|v| (key, v))
                } else {
                    Some((key, value))
                }
            })
            .collect();
        Self::Populated(map)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match self {
            Self::Dummy => None,
            Self::Populated(map) => map.get(key).map(String::as_str),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Dummy => 0,
            Self::Populated(map) => map.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    #[must_use]
    pub fn is_dummy(&self) -> bool {
        matches!(self, Self::Dummy)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let map = match self {
            Self::Dummy => None,
            Self::Populated(map) => Some(map),
        };
        map.into_iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Strip control characters and padding, dropping values left empty
fn filter_value(value: &str) -> Option<String> {
    let cleaned: String = value.chars().filter(|c| !c.is_control()).collect();
    let trimmed = cleaned.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<(String, String)> {
        vec![
            ("Modality".to_string(), "MR ".to_string()),
            ("Patient Name".to_string(), "  \0".to_string()),
            ("Rows".to_string(), "512".to_string()),
        ]
    }

    #[test]
    fn test_filtered_store() {
        let store = MetadataStore::from_entries(entries(), true);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("Modality"), Some("MR"));
        assert_eq!(store.get("Patient Name"), None);
        assert_eq!(
            store.iter().collect::<Vec<_>>(),
            vec![("Modality", "MR"), ("Rows", "512")]
        );
    }

    #[test]
    fn test_unfiltered_store_keeps_raw_values() {
        let store = MetadataStore::from_entries(entries(), false);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("Modality"), Some("MR "));
        assert_eq!(store.get("Patient Name"), Some("  \0"));
    }

    #[test]
    fn test_dummy_store() {
        let store = MetadataStore::default();
        assert!(store.is_dummy());
        assert!(store.is_empty());
        assert_eq!(store.get("Rows"), None);
        assert_eq!(store.iter().count(), 0);
    }
}
