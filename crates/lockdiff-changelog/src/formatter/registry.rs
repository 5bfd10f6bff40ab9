//! Formatter registry

use std::sync::Arc;

use super::{JsonFormatter, MarkdownFormatter, ReleaseFormatter, SummaryFormatter};

/// Registry of available release notes formatters
pub struct FormatterRegistry {
    formatters: Vec<Arc<dyn ReleaseFormatter>>,
}

impl FormatterRegistry {
    /// Create a new registry with all built-in formatters
    pub fn new() -> Self {
        Self {
            formatters: vec![
                Arc::new(MarkdownFormatter::new()),
                Arc::new(SummaryFormatter::new()),
                Arc::new(JsonFormatter::new()),
            ],
        }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            formatters: Vec::new(),
        }
    }

    /// Register a formatter
    pub fn register<F: ReleaseFormatter + 'static>(&mut self, formatter: F) {
        self.formatters.push(Arc::new(formatter));
    }

    /// Get formatter by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn ReleaseFormatter>> {
        self.formatters.iter().find(|f| f.name() == name).cloned()
    }

    /// Get all registered formatters
    pub fn all(&self) -> &[Arc<dyn ReleaseFormatter>] {
        &self.formatters
    }

    /// Names of all registered formatters
    pub fn names(&self) -> Vec<&'static str> {
        self.formatters.iter().map(|f| f.name()).collect()
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = FormatterRegistry::new();
        assert_eq!(registry.all().len(), 3);
    }

    #[test]
    fn test_get_by_name() {
        let registry = FormatterRegistry::new();
        assert!(registry.get("markdown").is_some());
        assert!(registry.get("summary").is_some());
        assert!(registry.get("json").is_some());
        assert!(registry.get("html").is_none());
    }

    #[test]
    fn test_names() {
        let registry = FormatterRegistry::new();
        assert_eq!(registry.names(), vec!["markdown", "summary", "json"]);
    }

    #[test]
    fn test_empty_registry() {
        let mut registry = FormatterRegistry::empty();
        assert!(registry.all().is_empty());
        registry.register(SummaryFormatter::new().with_heading("x"));
        assert!(registry.get("summary").is_some());
    }
}
