//! Identifier interning.
//!
//! Names in the tree carry a [`Symbol`] next to their text so later passes
//! can compare and hash identifiers as integers.

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// Handle to an interned identifier. Comparing two symbols from the same
/// table is an integer comparison.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Symbol(Spur);

impl Symbol {
    #[inline]
    pub fn as_spur(self) -> Spur {
        self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.0)
    }
}

/// Thread-safe identifier table.
///
/// Cloning is cheap and clones share storage, so one table can be handed to
/// several parsers running on different threads.
#[derive(Clone)]
pub struct SymbolTable {
    rodeo: Arc<ThreadedRodeo>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            rodeo: Arc::new(ThreadedRodeo::new()),
        }
    }

    /// Intern `name`, returning the existing symbol if it was seen before.
    #[inline]
    pub fn intern(&self, name: &str) -> Symbol {
        Symbol(self.rodeo.get_or_intern(name))
    }

    /// Look up `name` without interning it.
    #[inline]
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.rodeo.get(name).map(Symbol)
    }

    #[inline]
    pub fn resolve(&self, symbol: Symbol) -> &str {
        self.rodeo.resolve(&symbol.0)
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTable").field("len", &self.len()).finish()
    }
}
