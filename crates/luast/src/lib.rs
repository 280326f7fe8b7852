//! luast: Lua source to syntax tree.
//!
//! Entry points that pick a parser by language version, plus a parallel
//! batch mode for many independent sources. The individual stages live in
//! the `luast_*` crates and are re-exported here.

use bumpalo::Bump;
use log::{debug, info};
use rayon::prelude::*;
use thiserror::Error;

pub use luast_ast as ast;
pub use luast_ast::{Chunk, Expression, Statement, Visitor};
pub use luast_core::{AstArena, Symbol, SymbolTable, TextRange};
pub use luast_diagnostics::{ErrorKind, Near, ParseError};
pub use luast_parser::{parse, LuaVersion, Parser, ParserOptions, UnknownLuaVersion, YieldMode};
pub use luast_scanner::{Token, TokenKind, Tokenizer};

#[derive(Debug, Error)]
pub enum LuastError {
    #[error("unsupported Lua version: {0}")]
    UnsupportedVersion(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<UnknownLuaVersion> for LuastError {
    fn from(err: UnknownLuaVersion) -> Self {
        LuastError::UnsupportedVersion(err.0)
    }
}

/// A parser for `version` over `source`, allocating into `arena`.
///
/// Only PUC-Rio Lua 5.1 has a grammar; other known dialects are rejected.
pub fn create_parser<'a>(version: LuaVersion, arena: &'a Bump, source: &'a str) -> Result<Parser<'a>, LuastError> {
    create_parser_with_options(version, arena, source, ParserOptions::default())
}

pub fn create_parser_with_options<'a>(
    version: LuaVersion,
    arena: &'a Bump,
    source: &'a str,
    options: ParserOptions,
) -> Result<Parser<'a>, LuastError> {
    debug!("creating parser for Lua {version}");
    if !version.is_supported() {
        return Err(LuastError::UnsupportedVersion(version.to_string()));
    }
    Ok(Parser::with_options(arena, source, options))
}

/// Like [`create_parser`], with the version given by name (`"5.1"`).
pub fn create_parser_for<'a>(version: &str, arena: &'a Bump, source: &'a str) -> Result<Parser<'a>, LuastError> {
    create_parser(version.parse()?, arena, source)
}

/// Parse every source in parallel and map each tree through `f`.
///
/// Each source gets its own arena, freed once `f` has run, so `f` must
/// extract whatever it needs from the tree. Names from all sources are
/// interned into one shared table. The outer error is only returned for an
/// unsupported `version`; parse failures are reported per source.
pub fn parse_batch<S, R, F>(version: LuaVersion, sources: &[S], f: F) -> Result<Vec<Result<R, ParseError>>, LuastError>
where
    S: AsRef<str> + Sync,
    R: Send,
    F: Fn(&Chunk<'_>) -> R + Sync,
{
    if !version.is_supported() {
        return Err(LuastError::UnsupportedVersion(version.to_string()));
    }
    info!("parsing a batch of {} sources", sources.len());

    let symbols = SymbolTable::new();
    let results: Vec<_> = sources
        .par_iter()
        .map(|source| {
            let source = source.as_ref();
            let arena = AstArena::for_source(source.len());
            let parser = Parser::new(arena.bump(), source).with_symbols(symbols.clone());
            parser.parse().map(|chunk| f(&chunk))
        })
        .collect();

    let failed = results.iter().filter(|result| result.is_err()).count();
    debug!("batch finished: {} parsed, {} failed", results.len() - failed, failed);
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_version_is_unsupported() {
        let err: LuastError = "5.4".parse::<LuaVersion>().unwrap_err().into();
        assert_eq!(err.to_string(), "unsupported Lua version: 5.4");
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let arena = Bump::new();
        let err: LuastError = parse(&arena, "x =").unwrap_err().into();
        assert_eq!(err.to_string(), "expected expression near EOF");
        assert!(matches!(err, LuastError::Parse(_)));
    }
}
