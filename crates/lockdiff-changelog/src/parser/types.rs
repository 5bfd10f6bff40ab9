//! Parser configuration types

/// Configuration for the changelog parser
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Whether alpha/beta/rc/dev releases are kept
    pub include_prerelease: bool,
}

impl ParserConfig {
    /// Create a new config that keeps pre-releases
    pub fn all() -> Self {
        Self {
            include_prerelease: true,
        }
    }

    /// Set whether to keep pre-releases
    pub fn with_prerelease(mut self, include: bool) -> Self {
        self.include_prerelease = include;
        self
    }
}
