//! Arena allocation for syntax trees.
//!
//! Every node of a parsed chunk is bump-allocated; dropping the arena frees
//! the whole tree at once. Nodes never own heap memory themselves, so no
//! destructor has to run for them.

use bumpalo::Bump;

/// Owns the bump allocator a parse writes its tree into.
///
/// Parsers borrow the inner [`Bump`] through [`AstArena::bump`]; the tree
/// they return lives as long as that borrow.
pub struct AstArena {
    bump: Bump,
}

impl AstArena {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create an arena with `capacity` bytes reserved up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Size an arena for a source text of `source_len` bytes.
    ///
    /// Trees come out at a few times the size of their source.
    pub fn for_source(source_len: usize) -> Self {
        Self::with_capacity(source_len.saturating_mul(4))
    }

    #[inline]
    pub fn bump(&self) -> &Bump {
        &self.bump
    }

    /// Total bytes handed out by this arena so far.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Free every tree allocated here, keeping the memory for reuse.
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl Default for AstArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Move the elements of `vec` into the arena and return them as a slice.
pub fn alloc_vec_in<T>(arena: &Bump, vec: Vec<T>) -> &[T] {
    if vec.is_empty() {
        return &[];
    }
    arena.alloc_slice_fill_iter(vec)
}
