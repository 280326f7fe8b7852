//! Grammar dialects.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lua dialects known to the front end. Only [`LuaVersion::PucRio51`] has
/// a grammar; the others are recognized so they can be rejected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LuaVersion {
    /// The reference interpreter, version 5.1.
    PucRio51,
    LuaJit,
}

impl LuaVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            LuaVersion::PucRio51 => "5.1",
            LuaVersion::LuaJit => "LuaJIT",
        }
    }

    /// Whether a parser exists for this dialect.
    pub fn is_supported(self) -> bool {
        matches!(self, LuaVersion::PucRio51)
    }
}

impl fmt::Display for LuaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown Lua version: {0}")]
pub struct UnknownLuaVersion(pub String);

impl FromStr for LuaVersion {
    type Err = UnknownLuaVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "5.1" | "PUC-Rio 5.1" => Ok(LuaVersion::PucRio51),
            "LuaJIT" => Ok(LuaVersion::LuaJit),
            other => Err(UnknownLuaVersion(other.to_string())),
        }
    }
}
