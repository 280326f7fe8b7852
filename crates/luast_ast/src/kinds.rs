//! Fieldless discriminants for the statement and expression families.

use crate::node::{Expression, Statement};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Assignment,
    FunctionCall,
    Do,
    While,
    Repeat,
    If,
    For,
    ForIn,
    FunctionDeclaration,
    LocalFunctionDeclaration,
    LocalVariableDeclaration,
    Return,
    Break,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Assignment => "AssignmentStatement",
            StatementKind::FunctionCall => "FunctionCallStatement",
            StatementKind::Do => "DoStatement",
            StatementKind::While => "WhileStatement",
            StatementKind::Repeat => "RepeatStatement",
            StatementKind::If => "IfStatement",
            StatementKind::For => "ForStatement",
            StatementKind::ForIn => "ForInStatement",
            StatementKind::FunctionDeclaration => "FunctionDeclaration",
            StatementKind::LocalFunctionDeclaration => "LocalFunctionDeclaration",
            StatementKind::LocalVariableDeclaration => "LocalVariableDeclaration",
            StatementKind::Return => "ReturnStatement",
            StatementKind::Break => "BreakStatement",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    Nil,
    False,
    True,
    Vararg,
    Number,
    String,
    Function,
    Prefix,
    Table,
    Binary,
    Unary,
}

impl ExpressionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpressionKind::Nil => "NilExpression",
            ExpressionKind::False => "FalseExpression",
            ExpressionKind::True => "TrueExpression",
            ExpressionKind::Vararg => "VarargExpression",
            ExpressionKind::Number => "NumberExpression",
            ExpressionKind::String => "StringExpression",
            ExpressionKind::Function => "FunctionExpression",
            ExpressionKind::Prefix => "PrefixExpression",
            ExpressionKind::Table => "TableConstructorExpression",
            ExpressionKind::Binary => "BinaryOperationExpression",
            ExpressionKind::Unary => "UnaryOperationExpression",
        }
    }
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Statement<'_> {
    pub fn kind(&self) -> StatementKind {
        match self {
            Statement::Assignment(_) => StatementKind::Assignment,
            Statement::FunctionCall(_) => StatementKind::FunctionCall,
            Statement::Do(_) => StatementKind::Do,
            Statement::While(_) => StatementKind::While,
            Statement::Repeat(_) => StatementKind::Repeat,
            Statement::If(_) => StatementKind::If,
            Statement::For(_) => StatementKind::For,
            Statement::ForIn(_) => StatementKind::ForIn,
            Statement::FunctionDeclaration(_) => StatementKind::FunctionDeclaration,
            Statement::LocalFunctionDeclaration(_) => StatementKind::LocalFunctionDeclaration,
            Statement::LocalVariableDeclaration(_) => StatementKind::LocalVariableDeclaration,
            Statement::Return(_) => StatementKind::Return,
            Statement::Break => StatementKind::Break,
        }
    }
}

impl Expression<'_> {
    pub fn kind(&self) -> ExpressionKind {
        match self {
            Expression::Nil => ExpressionKind::Nil,
            Expression::False => ExpressionKind::False,
            Expression::True => ExpressionKind::True,
            Expression::Vararg => ExpressionKind::Vararg,
            Expression::Number(_) => ExpressionKind::Number,
            Expression::String(_) => ExpressionKind::String,
            Expression::Function(_) => ExpressionKind::Function,
            Expression::Prefix(_) => ExpressionKind::Prefix,
            Expression::Table(_) => ExpressionKind::Table,
            Expression::Binary(_) => ExpressionKind::Binary,
            Expression::Unary(_) => ExpressionKind::Unary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::*;

    #[test]
    fn test_statement_kind() {
        assert_eq!(Statement::Break.kind(), StatementKind::Break);
        let body = Chunk { statements: &[] };
        assert_eq!(Statement::Do(DoStatement { body }).kind(), StatementKind::Do);
        assert_eq!(StatementKind::For.to_string(), "ForStatement");
    }

    #[test]
    fn test_expression_kind() {
        assert_eq!(Expression::Nil.kind(), ExpressionKind::Nil);
        let table = Expression::Table(TableConstructor { fields: &[] });
        assert_eq!(table.kind(), ExpressionKind::Table);
        assert_eq!(ExpressionKind::Binary.to_string(), "BinaryOperationExpression");
    }
}
