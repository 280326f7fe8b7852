//! Parser configuration.

/// Whether the statement loop gives up its thread between top-level
/// statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YieldMode {
    /// Run the whole parse without interruption.
    #[default]
    Synchronous,
    /// Call [`std::thread::yield_now`] after every top-level statement, so
    /// very large inputs share the CPU with other work.
    Cooperative,
}

/// Columns a tab advances in parser positions.
pub const DEFAULT_TAB_SIZE: u32 = 4;

/// Nesting limit for blocks and expressions.
pub const DEFAULT_MAX_DEPTH: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    pub tab_size: u32,
    pub yield_mode: YieldMode,
    pub max_depth: u32,
}

impl ParserOptions {
    pub fn with_tab_size(mut self, tab_size: u32) -> Self {
        self.tab_size = tab_size;
        self
    }

    pub fn with_yield_mode(mut self, yield_mode: YieldMode) -> Self {
        self.yield_mode = yield_mode;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
            yield_mode: YieldMode::Synchronous,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParserOptions::default();
        assert_eq!(options.tab_size, 4);
        assert_eq!(options.yield_mode, YieldMode::Synchronous);
        assert_eq!(options.max_depth, 100);
    }

    #[test]
    fn test_builders() {
        let options = ParserOptions::default()
            .with_tab_size(8)
            .with_yield_mode(YieldMode::Cooperative)
            .with_max_depth(16);
        assert_eq!(options.tab_size, 8);
        assert_eq!(options.yield_mode, YieldMode::Cooperative);
        assert_eq!(options.max_depth, 16);
    }
}
