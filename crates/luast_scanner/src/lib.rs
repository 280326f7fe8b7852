//! luast_scanner: Tokenizer for Lua source text.
//!
//! Turns source text into a stream of tokens on demand, one token of
//! lookahead at a time, tracking byte offsets and 1-based line/column
//! positions.

mod char_codes;
mod token;
mod tokenizer;

pub use token::{Token, TokenKind};
pub use tokenizer::{Tokenizer, DEFAULT_TAB_SIZE};
