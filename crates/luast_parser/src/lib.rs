//! luast_parser: Recursive descent parser for Lua 5.1.
//!
//! Drives the tokenizer through the grammar and builds an arena-allocated,
//! immutable syntax tree. Parsing stops at the first error.

mod literals;
mod options;
mod parser;
mod precedence;
mod version;

use bumpalo::Bump;
use luast_ast::node::Chunk;
use luast_diagnostics::ParseError;

pub use literals::{decode_number, decode_string, LiteralError};
pub use options::{ParserOptions, YieldMode};
pub use parser::Parser;
pub use precedence::{binding_power, BindingPower};
pub use version::{LuaVersion, UnknownLuaVersion};

/// Parse `source` with default options.
pub fn parse<'a>(arena: &'a Bump, source: &'a str) -> Result<Chunk<'a>, ParseError> {
    Parser::new(arena, source).parse()
}
