//! luast_ast: Syntax tree definitions for Lua 5.1.
//!
//! Each grammar family (statements, expressions, prefix expressions,
//! variables, calls, arguments, table fields) is an enum whose variants hold
//! named fields. Trees are built by the parser into a bump arena and are
//! immutable once returned.

pub mod kinds;
pub mod node;
pub mod operator;
pub mod visitor;

pub use kinds::{ExpressionKind, StatementKind};
pub use node::*;
pub use operator::{is_keyword, BinaryOperator, UnaryOperator, KEYWORDS};
pub use visitor::Visitor;
