//! Session configuration

/// Order planes are numbered in: channel varies fastest, then Z, then T
pub const DIMENSION_ORDER: &str = "XYCZT";

/// Options applied when a session is set up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Sanitize metadata values and drop empty ones
    pub filter_metadata: bool,
    /// Include format specific (original) metadata, not just core fields
    pub original_metadata: bool,
    /// Build a metadata store; without one a dummy store is used
    pub metadata_store: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            filter_metadata: true,
            original_metadata: false,
            metadata_store: false,
        }
    }
}

impl SessionOptions {
    pub fn builder() -> SessionOptionsBuilder {
        SessionOptionsBuilder::default()
    }
}

#[derive(Default)]
pub struct SessionOptionsBuilder {
    filter_metadata: Option<bool>,
    original_metadata: Option<bool>,
    metadata_store: Option<bool>,
}

impl SessionOptionsBuilder {
    pub fn filter_metadata(mut self, filter: bool) -> Self {
        self.filter_metadata = Some(filter);
        self
    }

    pub fn original_metadata(mut self, populate: bool) -> Self {
        self.original_metadata = Some(populate);
        self
    }

    pub fn metadata_store(mut self, enabled: bool) -> Self {
        self.metadata_store = Some(enabled);
        self
    }

    pub fn build(self) -> SessionOptions {
        let defaults = SessionOptions::default();
        SessionOptions {
            filter_metadata: self.filter_metadata.unwrap_or(defaults.filter_metadata),
            original_metadata: self.original_metadata.unwrap_or(defaults.original_metadata),
            metadata_store: self.metadata_store.unwrap_or(defaults.metadata_store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_defaults() {
        let options = SessionOptions::builder().metadata_store(true).build();
        assert!(options.metadata_store);
        assert!(options.filter_metadata);
        assert!(!options.original_metadata);
    }

    #[test]
    fn test_builder_overrides() {
        let options = SessionOptions::builder()
            .filter_metadata(false)
            .original_metadata(true)
            .build();
        assert_eq!(
            options,
            SessionOptions {
                filter_metadata: false,
                original_metadata: true,
                metadata_store: false,
            }
        );
    }
}
