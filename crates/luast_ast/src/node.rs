//! Node definitions.
//!
//! Children are arena references (`&'a T`) and arena slices
//! ([`NodeList`]); text is borrowed either from the source or from decoded
//! bytes copied into the arena. Nothing here owns heap memory.

use crate::operator::{BinaryOperator, UnaryOperator};
use luast_core::intern::Symbol;

/// An arena-allocated sequence of child nodes.
pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Shared pieces
// ============================================================================

/// A block of statements. The root of every parse is a `Chunk`.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk<'a> {
    pub statements: NodeList<'a, Statement<'a>>,
}

impl<'a> Chunk<'a> {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// The trailing `return` or `break` of this block, if it has one.
    pub fn last_statement(&self) -> Option<&Statement<'a>> {
        self.statements.last().filter(|s| s.is_last_statement())
    }
}

/// An identifier. Equality compares the text only, so names from parsers
/// with different symbol tables still compare equal.
#[derive(Debug, Clone, Copy)]
pub struct Name<'a> {
    pub text: &'a str,
    pub symbol: Symbol,
}

impl PartialEq for Name<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Name<'_> {}

#[derive(Debug, Clone, PartialEq)]
pub struct NameList<'a> {
    pub names: NodeList<'a, Name<'a>>,
}

impl<'a> NameList<'a> {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Name<'a>> {
        self.names.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionList<'a> {
    pub expressions: NodeList<'a, Expression<'a>>,
}

impl<'a> ExpressionList<'a> {
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expression<'a>> {
        self.expressions.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableList<'a> {
    pub variables: NodeList<'a, Variable<'a>>,
}

impl<'a> VariableList<'a> {
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable<'a>> {
        self.variables.iter()
    }
}

/// Formal parameters: named parameters, then an optional trailing `...`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterList<'a> {
    pub names: NameList<'a>,
    pub has_vararg: bool,
}

/// Parameters and body shared by every function form.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncBody<'a> {
    pub parameters: ParameterList<'a>,
    pub body: Chunk<'a>,
}

/// The name of a `function a.b.c:m() ... end` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncName<'a> {
    pub name: Name<'a>,
    /// Dot-separated names after the base name.
    pub indexers: NodeList<'a, Name<'a>>,
    /// The name after `:`, if any.
    pub method_name: Option<Name<'a>>,
}

impl<'a> FuncName<'a> {
    /// Whether this declares a method, i.e. has an implicit `self`.
    pub fn is_method(&self) -> bool {
        self.method_name.is_some()
    }

    /// Every name in order: base, indexers, then the method name.
    pub fn segments(&self) -> impl Iterator<Item = &Name<'a>> {
        std::iter::once(&self.name)
            .chain(self.indexers.iter())
            .chain(self.method_name.iter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseIfClause<'a> {
    pub condition: Expression<'a>,
    pub body: Chunk<'a>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    Assignment(AssignmentStatement<'a>),
    FunctionCall(FunctionCallStatement<'a>),
    Do(DoStatement<'a>),
    While(WhileStatement<'a>),
    Repeat(RepeatStatement<'a>),
    If(IfStatement<'a>),
    For(ForStatement<'a>),
    ForIn(ForInStatement<'a>),
    FunctionDeclaration(FunctionDeclaration<'a>),
    LocalFunctionDeclaration(LocalFunctionDeclaration<'a>),
    LocalVariableDeclaration(LocalVariableDeclaration<'a>),
    Return(ReturnStatement<'a>),
    Break,
}

/// `a, b.c, d[e] = x, y`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStatement<'a> {
    pub variables: VariableList<'a>,
    pub values: ExpressionList<'a>,
}

/// A call evaluated for its side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallStatement<'a> {
    pub call: FunctionCall<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoStatement<'a> {
    pub body: Chunk<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement<'a> {
    pub condition: Expression<'a>,
    pub body: Chunk<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStatement<'a> {
    pub body: Chunk<'a>,
    pub condition: Expression<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement<'a> {
    pub condition: Expression<'a>,
    pub then_block: Chunk<'a>,
    pub else_ifs: NodeList<'a, ElseIfClause<'a>>,
    pub else_block: Option<Chunk<'a>>,
}

/// Numeric for: `for v = start, end[, step] do ... end`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement<'a> {
    pub variable: Name<'a>,
    pub start: Expression<'a>,
    pub end: Expression<'a>,
    pub step: Option<Expression<'a>>,
    pub body: Chunk<'a>,
}

/// Generic for: `for a, b in explist do ... end`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForInStatement<'a> {
    pub names: NameList<'a>,
    pub expressions: ExpressionList<'a>,
    pub body: Chunk<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration<'a> {
    pub name: FuncName<'a>,
    pub body: FuncBody<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalFunctionDeclaration<'a> {
    pub name: Name<'a>,
    pub body: FuncBody<'a>,
}

/// `local a, b = x, y`. `values` is `None` when there is no `=`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalVariableDeclaration<'a> {
    pub names: NameList<'a>,
    pub values: Option<ExpressionList<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement<'a> {
    pub values: ExpressionList<'a>,
}

impl<'a> Statement<'a> {
    /// `return` and `break` are the only statements that may end a block.
    pub fn is_last_statement(&self) -> bool {
        matches!(self, Statement::Return(_) | Statement::Break)
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expression<'a> {
    Nil,
    False,
    True,
    /// `...`
    Vararg,
    Number(NumberExpression<'a>),
    String(StringExpression<'a>),
    Function(FunctionExpression<'a>),
    Prefix(PrefixExpression<'a>),
    Table(TableConstructor<'a>),
    Binary(BinaryOperation<'a>),
    Unary(UnaryOperation<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpression<'a> {
    /// The literal as written.
    pub raw: &'a str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringExpression<'a> {
    /// The literal as written, delimiters included.
    pub raw: &'a str,
    /// The decoded bytes.
    pub bytes: &'a [u8],
    /// `bytes` read as UTF-8, invalid sequences replaced with U+FFFD.
    pub value: &'a str,
}

/// `function (params) ... end` used as a value.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpression<'a> {
    pub body: FuncBody<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableConstructor<'a> {
    pub fields: NodeList<'a, Field<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperation<'a> {
    pub left: &'a Expression<'a>,
    pub operator: BinaryOperator,
    pub right: &'a Expression<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperation<'a> {
    pub operator: UnaryOperator,
    pub operand: &'a Expression<'a>,
}

impl<'a> Expression<'a> {
    pub fn as_prefix(&self) -> Option<&PrefixExpression<'a>> {
        match self {
            Expression::Prefix(prefix) => Some(prefix),
            _ => None,
        }
    }

    /// The name if this expression is a bare variable reference.
    pub fn as_name(&self) -> Option<&Name<'a>> {
        match self {
            Expression::Prefix(PrefixExpression::Variable(Variable::Name(name))) => Some(name),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expression::Number(number) => Some(number.value),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&StringExpression<'a>> {
        match self {
            Expression::String(string) => Some(string),
            _ => None,
        }
    }

    /// `nil`, `true`, `false`, `...`, numbers and strings.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Expression::Nil
                | Expression::False
                | Expression::True
                | Expression::Vararg
                | Expression::Number(_)
                | Expression::String(_)
        )
    }

    /// A call returning multiple values, or `...`. These expand when they
    /// end an expression list.
    pub fn is_multi_valued(&self) -> bool {
        matches!(
            self,
            Expression::Vararg | Expression::Prefix(PrefixExpression::FunctionCall(_))
        )
    }
}

// ============================================================================
// Prefix expressions
// ============================================================================

/// Expressions that may be followed by index and call suffixes.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefixExpression<'a> {
    Variable(Variable<'a>),
    FunctionCall(FunctionCall<'a>),
    /// `( expr )`. Truncates a multi-valued expression to one value.
    Parenthesized(&'a Expression<'a>),
}

impl<'a> PrefixExpression<'a> {
    pub fn as_variable(&self) -> Option<&Variable<'a>> {
        match self {
            PrefixExpression::Variable(variable) => Some(variable),
            _ => None,
        }
    }

    pub fn as_function_call(&self) -> Option<&FunctionCall<'a>> {
        match self {
            PrefixExpression::FunctionCall(call) => Some(call),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Variable<'a> {
    Name(Name<'a>),
    /// `prefix[index]`
    Index(IndexVariable<'a>),
    /// `prefix.name`
    Member(MemberVariable<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexVariable<'a> {
    pub prefix: &'a PrefixExpression<'a>,
    pub index: &'a Expression<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberVariable<'a> {
    pub prefix: &'a PrefixExpression<'a>,
    pub name: Name<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionCall<'a> {
    /// `prefix(args)`
    Normal(NormalCall<'a>),
    /// `prefix:method(args)`
    Method(MethodCall<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalCall<'a> {
    pub prefix: &'a PrefixExpression<'a>,
    pub arguments: Arguments<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall<'a> {
    pub prefix: &'a PrefixExpression<'a>,
    pub method: Name<'a>,
    pub arguments: Arguments<'a>,
}

impl<'a> FunctionCall<'a> {
    /// The expression being called (the receiver, for method calls).
    pub fn prefix(&self) -> &'a PrefixExpression<'a> {
        match self {
            FunctionCall::Normal(call) => call.prefix,
            FunctionCall::Method(call) => call.prefix,
        }
    }

    pub fn arguments(&self) -> &Arguments<'a> {
        match self {
            FunctionCall::Normal(call) => &call.arguments,
            FunctionCall::Method(call) => &call.arguments,
        }
    }

    pub fn is_method(&self) -> bool {
        matches!(self, FunctionCall::Method(_))
    }
}

/// Call arguments. Lua accepts a lone string or table literal in place of
/// a parenthesized list.
#[derive(Debug, Clone, PartialEq)]
pub enum Arguments<'a> {
    ExpressionList(ExpressionList<'a>),
    String(StringExpression<'a>),
    Table(TableConstructor<'a>),
}

impl<'a> Arguments<'a> {
    /// Number of argument expressions as written.
    pub fn len(&self) -> usize {
        match self {
            Arguments::ExpressionList(list) => list.len(),
            Arguments::String(_) | Arguments::Table(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Table fields
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Field<'a> {
    /// A positional value: `{ x }`.
    ArrayKey { value: Expression<'a> },
    /// `{ name = value }`
    NameKey { key: Name<'a>, value: Expression<'a> },
    /// `{ [key] = value }`
    ExpressionKey { key: Expression<'a>, value: Expression<'a> },
}

impl<'a> Field<'a> {
    pub fn value(&self) -> &Expression<'a> {
        match self {
            Field::ArrayKey { value } | Field::NameKey { value, .. } | Field::ExpressionKey { value, .. } => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luast_core::SymbolTable;

    fn name<'a>(table: &SymbolTable, text: &'a str) -> Name<'a> {
        Name { text, symbol: table.intern(text) }
    }

    #[test]
    fn test_name_equality_ignores_symbol_table() {
        let a = SymbolTable::new();
        let b = SymbolTable::new();
        b.intern("padding");
        assert_eq!(name(&a, "x"), name(&b, "x"));
        assert_ne!(name(&a, "x"), name(&a, "y"));
    }

    #[test]
    fn test_last_statement() {
        let values = ExpressionList { expressions: &[] };
        assert!(Statement::Return(ReturnStatement { values }).is_last_statement());
        assert!(Statement::Break.is_last_statement());
        let body = Chunk { statements: &[] };
        assert!(!Statement::Do(DoStatement { body }).is_last_statement());
    }

    #[test]
    fn test_chunk_last_statement() {
        let statements = [Statement::Do(DoStatement { body: Chunk { statements: &[] } }), Statement::Break];
        let chunk = Chunk { statements: &statements };
        assert_eq!(chunk.len(), 2);
        assert_eq!(chunk.last_statement(), Some(&Statement::Break));

        let open = Chunk { statements: &statements[..1] };
        assert_eq!(open.last_statement(), None);
    }

    #[test]
    fn test_func_name_segments() {
        let table = SymbolTable::new();
        let indexers = [name(&table, "b"), name(&table, "c")];
        let func_name = FuncName {
            name: name(&table, "a"),
            indexers: &indexers,
            method_name: Some(name(&table, "m")),
        };
        let segments: Vec<&str> = func_name.segments().map(|n| n.text).collect();
        assert_eq!(segments, ["a", "b", "c", "m"]);
        assert!(func_name.is_method());
    }

    #[test]
    fn test_expression_helpers() {
        let table = SymbolTable::new();
        let x = Expression::Prefix(PrefixExpression::Variable(Variable::Name(name(&table, "x"))));
        assert_eq!(x.as_name().map(|n| n.text), Some("x"));
        assert!(!x.is_literal());
        assert!(Expression::Vararg.is_literal());
        assert!(Expression::Vararg.is_multi_valued());

        let one = Expression::Number(NumberExpression { raw: "1", value: 1.0 });
        assert_eq!(one.as_number(), Some(1.0));
        assert!(one.as_prefix().is_none());
    }

    #[test]
    fn test_arguments_len() {
        let string = StringExpression { raw: "'a'", bytes: b"a", value: "a" };
        assert_eq!(Arguments::String(string).len(), 1);
        let empty = Arguments::ExpressionList(ExpressionList { expressions: &[] });
        assert!(empty.is_empty());
    }
}
