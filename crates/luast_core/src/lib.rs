//! luast_core: Shared building blocks for the Lua front end.
//!
//! Provides byte ranges over source text, the bump arena the AST lives in,
//! and the symbol table used to intern identifier names.

pub mod arena;
pub mod intern;
pub mod text;

pub use arena::{alloc_vec_in, AstArena};
pub use intern::{Symbol, SymbolTable};
pub use text::TextRange;
