//! The Lua 5.1 parser.
//!
//! A recursive descent over the grammar with a single token of lookahead.
//! Binary expressions are collected as a flat operand/operator list and
//! assembled by binding power afterwards (see `precedence`). Everything is
//! allocated in the arena passed to [`Parser::new`].

use bumpalo::Bump;
use log::{debug, trace};
use luast_ast::node::*;
use luast_ast::operator::{is_keyword, BinaryOperator, UnaryOperator};
use luast_core::arena::alloc_vec_in;
use luast_core::intern::SymbolTable;
use luast_diagnostics::{messages, DiagnosticMessage, Near, ParseError};
use luast_scanner::{Token, TokenKind, Tokenizer};

use crate::literals::{decode_number, decode_string};
use crate::options::{ParserOptions, YieldMode};
use crate::precedence::fold_operators;
use crate::version::LuaVersion;

type ParseResult<T> = Result<T, ParseError>;

#[inline]
fn near(token: Option<Token<'_>>) -> Near {
    token.map_or(Near::Eof, |t| t.near())
}

/// A name token: an identifier that is not a reserved word.
#[inline]
fn is_name(token: &Token<'_>) -> bool {
    token.kind == TokenKind::Identifier && !is_keyword(token.value())
}

fn unary_operator(token: &Token<'_>) -> Option<UnaryOperator> {
    match token.kind {
        TokenKind::Simple | TokenKind::Identifier => UnaryOperator::from_token(token.value()),
        _ => None,
    }
}

/// Tokens that continue a prefix expression: index, member, method call
/// and the three call argument forms.
fn is_suffix_start(token: &Token<'_>) -> bool {
    token.kind == TokenKind::String
        || (token.kind == TokenKind::Simple && matches!(token.value(), "[" | "." | ":" | "(" | "{"))
}

fn binary_operator(token: &Token<'_>) -> Option<BinaryOperator> {
    match token.kind {
        TokenKind::Simple | TokenKind::Identifier => BinaryOperator::from_token(token.value()),
        _ => None,
    }
}

/// Parses one source text into a [`Chunk`].
pub struct Parser<'a> {
    arena: &'a Bump,
    tokens: Tokenizer<'a>,
    symbols: SymbolTable,
    options: ParserOptions,
    /// Current nesting of blocks and expressions.
    depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, source: &'a str) -> Self {
        Self::with_options(arena, source, ParserOptions::default())
    }

    pub fn with_options(arena: &'a Bump, source: &'a str, options: ParserOptions) -> Self {
        Self {
            arena,
            tokens: Tokenizer::with_options(source, options.tab_size, true),
            symbols: SymbolTable::new(),
            options,
            depth: 0,
        }
    }

    /// Intern names into `symbols` instead of a fresh table.
    pub fn with_symbols(mut self, symbols: SymbolTable) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn source(&self) -> &'a str {
        self.tokens.source()
    }

    pub fn version(&self) -> LuaVersion {
        LuaVersion::PucRio51
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Parse the whole source. Fails if anything but end of input follows
    /// the top-level block.
    pub fn parse(mut self) -> ParseResult<Chunk<'a>> {
        debug!("parsing {} bytes as Lua {}", self.source().len(), self.version());
        let chunk = self.parse_statements(true)?;
        if let Some(token) = self.tokens.lookahead()? {
            return Err(ParseError::new(&messages::UNEXPECTED_TOKEN, &[], token.near()));
        }
        debug!("parsed {} top-level statements", chunk.len());
        Ok(chunk)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// An error pointing at the lookahead token.
    fn error(&mut self, message: &DiagnosticMessage, args: &[&str]) -> ParseError {
        match self.tokens.lookahead() {
            Ok(token) => ParseError::new(message, args, near(token)),
            Err(err) => err,
        }
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.error(&messages::TOO_MANY_SYNTAX_LEVELS, &[]));
        }
        Ok(())
    }

    #[inline]
    fn leave(&mut self) {
        self.depth -= 1;
    }

    #[inline]
    fn alloc_vec<T>(&self, vec: Vec<T>) -> &'a [T] {
        alloc_vec_in(self.arena, vec)
    }

    fn name(&self, token: Token<'a>) -> Name<'a> {
        let text = token.value();
        Name {
            text,
            symbol: self.symbols.intern(text),
        }
    }

    // ========================================================================
    // Blocks and statements
    // ========================================================================

    fn parse_block(&mut self) -> ParseResult<Chunk<'a>> {
        self.parse_statements(false)
    }

    /// Statements up to a block terminator or a `return`/`break`, each
    /// optionally followed by one `;`.
    fn parse_statements(&mut self, top_level: bool) -> ParseResult<Chunk<'a>> {
        self.enter()?;
        let mut statements = Vec::new();
        while let Some(statement) = self.parse_statement()? {
            let is_last = statement.is_last_statement();
            if top_level {
                trace!("statement {}: {}", statements.len() + 1, statement.kind());
                if self.options.yield_mode == YieldMode::Cooperative {
                    std::thread::yield_now();
                }
            }
            statements.push(statement);
            self.tokens.consume(";")?;
            if is_last {
                break;
            }
        }
        self.leave();
        Ok(Chunk {
            statements: self.alloc_vec(statements),
        })
    }

    fn parse_statement(&mut self) -> ParseResult<Option<Statement<'a>>> {
        self.enter()?;
        let statement = self.dispatch_statement()?;
        self.leave();
        Ok(statement)
    }

    fn dispatch_statement(&mut self) -> ParseResult<Option<Statement<'a>>> {
        let Some(token) = self.tokens.lookahead()? else {
            return Ok(None);
        };
        if token.kind != TokenKind::Identifier {
            return self.parse_expression_statement();
        }

        let statement = match token.value() {
            "return" => self.parse_return()?,
            "break" => {
                self.tokens.next_token()?;
                Statement::Break
            }
            "do" => self.parse_do()?,
            "while" => self.parse_while()?,
            "function" => self.parse_function_declaration()?,
            "local" => self.parse_local()?,
            "for" => self.parse_for()?,
            "if" => self.parse_if()?,
            "repeat" => self.parse_repeat()?,
            _ => return self.parse_expression_statement(),
        };
        Ok(Some(statement))
    }

    /// An assignment or a call statement, told apart by the prefix
    /// expression they start with.
    fn parse_expression_statement(&mut self) -> ParseResult<Option<Statement<'a>>> {
        let Some(prefix) = self.parse_prefix_expression()? else {
            return Ok(None);
        };
        match prefix {
            PrefixExpression::Variable(first) => self.parse_assignment(first).map(Some),
            PrefixExpression::FunctionCall(call) => Ok(Some(Statement::FunctionCall(FunctionCallStatement { call }))),
            PrefixExpression::Parenthesized(_) => Err(self.error(&messages::EXPECTED_STATEMENT, &[])),
        }
    }

    fn parse_assignment(&mut self, first: Variable<'a>) -> ParseResult<Statement<'a>> {
        let mut variables = vec![first];
        while self.tokens.consume(",")?.is_some() {
            match self.parse_prefix_expression()? {
                Some(PrefixExpression::Variable(variable)) => variables.push(variable),
                _ => return Err(self.error(&messages::EXPECTED_VARIABLE, &[])),
            }
        }
        self.tokens.expect("=")?;
        let values = self.parse_required_expression_list()?;
        Ok(Statement::Assignment(AssignmentStatement {
            variables: VariableList {
                variables: self.alloc_vec(variables),
            },
            values,
        }))
    }

    fn parse_return(&mut self) -> ParseResult<Statement<'a>> {
        self.tokens.expect("return")?;
        let values = self.parse_expression_list()?;
        Ok(Statement::Return(ReturnStatement { values }))
    }

    fn parse_do(&mut self) -> ParseResult<Statement<'a>> {
        self.tokens.expect("do")?;
        let body = self.parse_block()?;
        self.tokens.expect("end")?;
        Ok(Statement::Do(DoStatement { body }))
    }

    fn parse_while(&mut self) -> ParseResult<Statement<'a>> {
        self.tokens.expect("while")?;
        let condition = self.parse_required_expression()?;
        self.tokens.expect("do")?;
        let body = self.parse_block()?;
        self.tokens.expect("end")?;
        Ok(Statement::While(WhileStatement { condition, body }))
    }

    fn parse_repeat(&mut self) -> ParseResult<Statement<'a>> {
        self.tokens.expect("repeat")?;
        let body = self.parse_block()?;
        self.tokens.expect("until")?;
        let condition = self.parse_required_expression()?;
        Ok(Statement::Repeat(RepeatStatement { body, condition }))
    }

    fn parse_if(&mut self) -> ParseResult<Statement<'a>> {
        self.tokens.expect("if")?;
        let condition = self.parse_required_expression()?;
        self.tokens.expect("then")?;
        let then_block = self.parse_block()?;

        let mut else_ifs = Vec::new();
        while self.tokens.consume("elseif")?.is_some() {
            let condition = self.parse_required_expression()?;
            self.tokens.expect("then")?;
            let body = self.parse_block()?;
            else_ifs.push(ElseIfClause { condition, body });
        }

        let else_block = match self.tokens.consume("else")? {
            Some(_) => Some(self.parse_block()?),
            None => None,
        };
        self.tokens.expect("end")?;

        Ok(Statement::If(IfStatement {
            condition,
            then_block,
            else_ifs: self.alloc_vec(else_ifs),
            else_block,
        }))
    }

    fn parse_for(&mut self) -> ParseResult<Statement<'a>> {
        self.tokens.expect("for")?;
        let Some(names) = self.parse_name_list()? else {
            return Err(self.error(&messages::EXPECTED_NAME, &[]));
        };

        if let [variable] = names.names {
            if self.tokens.consume("=")?.is_some() {
                return self.parse_numeric_for(*variable);
            }
        } else if self.tokens.is_next("=")? {
            return Err(self.error(&messages::NUMERIC_FOR_SINGLE_NAME, &[]));
        }

        self.tokens.expect("in")?;
        let expressions = self.parse_required_expression_list()?;
        self.tokens.expect("do")?;
        let body = self.parse_block()?;
        self.tokens.expect("end")?;
        Ok(Statement::ForIn(ForInStatement {
            names,
            expressions,
            body,
        }))
    }

    /// The rest of `for v = start, end[, step] do ... end` after the `=`.
    fn parse_numeric_for(&mut self, variable: Name<'a>) -> ParseResult<Statement<'a>> {
        let start = self.parse_required_expression()?;
        self.tokens.expect(",")?;
        let end = self.parse_required_expression()?;
        let step = match self.tokens.consume(",")? {
            Some(_) => Some(self.parse_required_expression()?),
            None => None,
        };
        self.tokens.expect("do")?;
        let body = self.parse_block()?;
        self.tokens.expect("end")?;
        Ok(Statement::For(ForStatement {
            variable,
            start,
            end,
            step,
            body,
        }))
    }

    fn parse_function_declaration(&mut self) -> ParseResult<Statement<'a>> {
        self.tokens.expect("function")?;
        let name = self.parse_func_name()?;
        let body = self.parse_func_body()?;
        Ok(Statement::FunctionDeclaration(FunctionDeclaration { name, body }))
    }

    fn parse_func_name(&mut self) -> ParseResult<FuncName<'a>> {
        let name = self.parse_name()?;
        let mut indexers = Vec::new();
        while self.tokens.consume(".")?.is_some() {
            indexers.push(self.parse_name()?);
        }
        let method_name = match self.tokens.consume(":")? {
            Some(_) => Some(self.parse_name()?),
            None => None,
        };
        Ok(FuncName {
            name,
            indexers: self.alloc_vec(indexers),
            method_name,
        })
    }

    fn parse_local(&mut self) -> ParseResult<Statement<'a>> {
        self.tokens.expect("local")?;
        if self.tokens.consume("function")?.is_some() {
            let name = self.parse_name()?;
            let body = self.parse_func_body()?;
            return Ok(Statement::LocalFunctionDeclaration(LocalFunctionDeclaration { name, body }));
        }

        let Some(names) = self.parse_name_list()? else {
            return Err(self.error(&messages::EXPECTED_NAME, &[]));
        };
        let values = match self.tokens.consume("=")? {
            Some(_) => Some(self.parse_required_expression_list()?),
            None => None,
        };
        Ok(Statement::LocalVariableDeclaration(LocalVariableDeclaration { names, values }))
    }

    // ========================================================================
    // Functions and names
    // ========================================================================

    fn parse_func_body(&mut self) -> ParseResult<FuncBody<'a>> {
        self.enter()?;
        self.tokens.expect("(")?;
        let parameters = self.parse_parameter_list()?;
        self.tokens.expect(")")?;
        let body = self.parse_block()?;
        self.tokens.expect("end")?;
        self.leave();
        Ok(FuncBody { parameters, body })
    }

    /// `a, b, ...`: names, with `...` allowed only last.
    fn parse_parameter_list(&mut self) -> ParseResult<ParameterList<'a>> {
        let mut names = Vec::new();
        let mut has_vararg = false;
        if !self.tokens.is_next(")")? {
            loop {
                if self.tokens.consume("...")?.is_some() {
                    has_vararg = true;
                    break;
                }
                names.push(self.parse_name()?);
                if self.tokens.consume(",")?.is_none() {
                    break;
                }
            }
        }
        Ok(ParameterList {
            names: NameList {
                names: self.alloc_vec(names),
            },
            has_vararg,
        })
    }

    fn parse_name(&mut self) -> ParseResult<Name<'a>> {
        match self.tokens.lookahead()? {
            Some(token) if token.kind == TokenKind::Identifier => {
                if is_keyword(token.value()) {
                    return Err(ParseError::new(&messages::UNEXPECTED_KEYWORD, &[token.value()], token.near()));
                }
                self.tokens.next_token()?;
                Ok(self.name(token))
            }
            other => Err(ParseError::new(&messages::EXPECTED_NAME, &[], near(other))),
        }
    }

    /// A comma-separated list of names, or `None` if no name comes next.
    fn parse_name_list(&mut self) -> ParseResult<Option<NameList<'a>>> {
        if !self.tokens.lookahead()?.is_some_and(|t| is_name(&t)) {
            return Ok(None);
        }
        let mut names = vec![self.parse_name()?];
        while self.tokens.consume(",")?.is_some() {
            names.push(self.parse_name()?);
        }
        Ok(Some(NameList {
            names: self.alloc_vec(names),
        }))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// A possibly empty comma-separated list of expressions.
    fn parse_expression_list(&mut self) -> ParseResult<ExpressionList<'a>> {
        let mut expressions = Vec::new();
        if let Some(first) = self.parse_expression()? {
            expressions.push(first);
            while self.tokens.consume(",")?.is_some() {
                expressions.push(self.parse_required_expression()?);
            }
        }
        Ok(ExpressionList {
            expressions: self.alloc_vec(expressions),
        })
    }

    fn parse_required_expression_list(&mut self) -> ParseResult<ExpressionList<'a>> {
        let list = self.parse_expression_list()?;
        if list.is_empty() {
            return Err(self.error(&messages::EXPECTED_EXPRESSION, &[]));
        }
        Ok(list)
    }

    fn parse_required_expression(&mut self) -> ParseResult<Expression<'a>> {
        match self.parse_expression()? {
            Some(expression) => Ok(expression),
            None => Err(self.error(&messages::EXPECTED_EXPRESSION, &[])),
        }
    }

    /// A full expression, or `None` if the lookahead cannot start one.
    fn parse_expression(&mut self) -> ParseResult<Option<Expression<'a>>> {
        self.enter()?;
        let expression = match self.parse_operand()? {
            Some(first) => Some(self.parse_binary_operations(first)?),
            None => None,
        };
        self.leave();
        Ok(expression)
    }

    /// One operand of a binary expression: a simple expression or a unary
    /// operation. Binary operators after it are left to the caller.
    fn parse_operand(&mut self) -> ParseResult<Option<Expression<'a>>> {
        let Some(token) = self.tokens.lookahead()? else {
            return Ok(None);
        };
        match unary_operator(&token) {
            Some(operator) => self.parse_unary_operation(operator).map(Some),
            None => self.parse_simple_expression(token),
        }
    }

    /// The operand of a unary operator is a whole expression, binary
    /// operators included: `-1 + 2` is `-(1 + 2)`.
    fn parse_unary_operation(&mut self, operator: UnaryOperator) -> ParseResult<Expression<'a>> {
        self.tokens.next_token()?;
        self.enter()?;
        let operand = self.parse_required_expression()?;
        self.leave();
        Ok(Expression::Unary(UnaryOperation {
            operator,
            operand: self.arena.alloc(operand),
        }))
    }

    /// Collect `op operand` pairs following `first`, then assemble them by
    /// binding power.
    fn parse_binary_operations(&mut self, first: Expression<'a>) -> ParseResult<Expression<'a>> {
        let mut rest = Vec::new();
        while let Some(operator) = self.tokens.lookahead()?.as_ref().and_then(binary_operator) {
            self.tokens.next_token()?;
            let Some(operand) = self.parse_operand()? else {
                return Err(self.error(&messages::EXPECTED_EXPRESSION, &[]));
            };
            rest.push((operator, operand));
        }
        if rest.is_empty() {
            return Ok(first);
        }

        let arena = self.arena;
        Ok(fold_operators(first, rest, |left, operator, right| {
            Expression::Binary(BinaryOperation {
                left: arena.alloc(left),
                operator,
                right: arena.alloc(right),
            })
        }))
    }

    fn parse_simple_expression(&mut self, token: Token<'a>) -> ParseResult<Option<Expression<'a>>> {
        let expression = match (token.kind, token.value()) {
            (TokenKind::Identifier, "function") => {
                self.tokens.next_token()?;
                Expression::Function(FunctionExpression {
                    body: self.parse_func_body()?,
                })
            }
            (TokenKind::Simple, "{") => Expression::Table(self.parse_table_constructor()?),
            (TokenKind::Identifier, _) | (TokenKind::Simple, "(") => match self.parse_literal(token)? {
                Some(literal) => literal,
                None => return Ok(self.parse_prefix_expression()?.map(Expression::Prefix)),
            },
            _ => return self.parse_literal(token),
        };
        Ok(Some(expression))
    }

    fn parse_literal(&mut self, token: Token<'a>) -> ParseResult<Option<Expression<'a>>> {
        let expression = match (token.kind, token.value()) {
            (TokenKind::Number, _) => self.number(token)?,
            (TokenKind::String, _) => Expression::String(self.string(token)?),
            (TokenKind::Identifier, "nil") => Expression::Nil,
            (TokenKind::Identifier, "false") => Expression::False,
            (TokenKind::Identifier, "true") => Expression::True,
            (TokenKind::Simple, "...") => Expression::Vararg,
            _ => return Ok(None),
        };
        self.tokens.next_token()?;
        Ok(Some(expression))
    }

    fn number(&self, token: Token<'a>) -> ParseResult<Expression<'a>> {
        let raw = token.value();
        let value = decode_number(raw).map_err(|err| err.into_parse_error(token.near()))?;
        Ok(Expression::Number(NumberExpression { raw, value }))
    }

    fn string(&self, token: Token<'a>) -> ParseResult<StringExpression<'a>> {
        let decoded = decode_string(token.value()).map_err(|err| err.into_parse_error(token.near()))?;
        let bytes: &'a [u8] = self.arena.alloc_slice_copy(&decoded);
        let value: &'a str = match std::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => self.arena.alloc_str(&String::from_utf8_lossy(bytes)),
        };
        Ok(StringExpression {
            raw: token.value(),
            bytes,
            value,
        })
    }

    // ========================================================================
    // Prefix expressions
    // ========================================================================

    /// A name or parenthesized expression followed by any number of index,
    /// member and call suffixes.
    fn parse_prefix_expression(&mut self) -> ParseResult<Option<PrefixExpression<'a>>> {
        self.enter()?;
        let Some(mut prefix) = self.parse_primary_expression()? else {
            self.leave();
            return Ok(None);
        };
        while let Some(token) = self.tokens.lookahead()? {
            if !is_suffix_start(&token) {
                break;
            }
            prefix = self.parse_suffix(prefix, token)?;
        }
        self.leave();
        Ok(Some(prefix))
    }

    fn parse_primary_expression(&mut self) -> ParseResult<Option<PrefixExpression<'a>>> {
        let Some(token) = self.tokens.lookahead()? else {
            return Ok(None);
        };
        if token.is("(") {
            self.tokens.next_token()?;
            let inner = self.parse_required_expression()?;
            self.tokens.expect(")")?;
            Ok(Some(PrefixExpression::Parenthesized(self.arena.alloc(inner))))
        } else if is_name(&token) {
            self.tokens.next_token()?;
            Ok(Some(PrefixExpression::Variable(Variable::Name(self.name(token)))))
        } else {
            Ok(None)
        }
    }

    fn parse_suffix(&mut self, prefix: PrefixExpression<'a>, token: Token<'a>) -> ParseResult<PrefixExpression<'a>> {
        let prefix: &'a PrefixExpression<'a> = self.arena.alloc(prefix);
        match token.value() {
            "[" if token.kind == TokenKind::Simple => {
                self.tokens.next_token()?;
                let index = self.parse_required_expression()?;
                self.tokens.expect("]")?;
                Ok(PrefixExpression::Variable(Variable::Index(IndexVariable {
                    prefix,
                    index: self.arena.alloc(index),
                })))
            }
            "." if token.kind == TokenKind::Simple => {
                self.tokens.next_token()?;
                let name = self.parse_name()?;
                Ok(PrefixExpression::Variable(Variable::Member(MemberVariable { prefix, name })))
            }
            ":" if token.kind == TokenKind::Simple => {
                self.tokens.next_token()?;
                let method = self.parse_name()?;
                let arguments = self.parse_arguments()?;
                Ok(PrefixExpression::FunctionCall(FunctionCall::Method(MethodCall {
                    prefix,
                    method,
                    arguments,
                })))
            }
            _ => {
                let arguments = self.parse_arguments()?;
                Ok(PrefixExpression::FunctionCall(FunctionCall::Normal(NormalCall { prefix, arguments })))
            }
        }
    }

    fn parse_arguments(&mut self) -> ParseResult<Arguments<'a>> {
        match self.tokens.lookahead()? {
            Some(token) if token.kind == TokenKind::String => {
                self.tokens.next_token()?;
                Ok(Arguments::String(self.string(token)?))
            }
            Some(token) if token.is("{") => Ok(Arguments::Table(self.parse_table_constructor()?)),
            _ => {
                self.tokens.expect("(")?;
                let list = self.parse_expression_list()?;
                self.tokens.expect(")")?;
                Ok(Arguments::ExpressionList(list))
            }
        }
    }

    // ========================================================================
    // Tables
    // ========================================================================

    fn parse_table_constructor(&mut self) -> ParseResult<TableConstructor<'a>> {
        self.enter()?;
        self.tokens.expect("{")?;
        let mut fields = Vec::new();
        while self.tokens.consume("}")?.is_none() {
            let Some(field) = self.parse_field()? else {
                return Err(self.error(&messages::EXPECTED_TOKEN, &["}"]));
            };
            fields.push(field);
            if self.tokens.consume(",")?.is_none() && self.tokens.consume(";")?.is_none() {
                self.tokens.expect("}")?;
                break;
            }
        }
        self.leave();
        Ok(TableConstructor {
            fields: self.alloc_vec(fields),
        })
    }

    fn parse_field(&mut self) -> ParseResult<Option<Field<'a>>> {
        if self.tokens.consume("[")?.is_some() {
            let key = self.parse_required_expression()?;
            self.tokens.expect("]")?;
            self.tokens.expect("=")?;
            let value = self.parse_required_expression()?;
            return Ok(Some(Field::ExpressionKey { key, value }));
        }

        let Some(value) = self.parse_expression()? else {
            return Ok(None);
        };
        if let Some(&key) = value.as_name() {
            if self.tokens.consume("=")?.is_some() {
                let value = self.parse_required_expression()?;
                return Ok(Some(Field::NameKey { key, value }));
            }
        }
        Ok(Some(Field::ArrayKey { value }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_err(source: &str) -> ParseError {
        let arena = Bump::new();
        Parser::new(&arena, source).parse().unwrap_err()
    }

    #[test]
    fn test_properties() {
        let arena = Bump::new();
        let parser = Parser::new(&arena, "return 1");
        assert_eq!(parser.source(), "return 1");
        assert_eq!(parser.version(), LuaVersion::PucRio51);
        assert_eq!(parser.options().tab_size, 4);
    }

    #[test]
    fn test_names_are_interned() {
        let arena = Bump::new();
        let symbols = SymbolTable::new();
        let chunk = Parser::new(&arena, "x = x")
            .with_symbols(symbols.clone())
            .parse()
            .unwrap();
        let Statement::Assignment(assignment) = &chunk.statements[0] else {
            panic!("expected an assignment");
        };
        let Variable::Name(target) = &assignment.variables.variables[0] else {
            panic!("expected a name");
        };
        let source = assignment.values.expressions[0].as_name().unwrap();
        assert_eq!(target.symbol, source.symbol);
        assert_eq!(symbols.resolve(target.symbol), "x");
    }

    #[test]
    fn test_depth_limit() {
        let arena = Bump::new();
        let source = format!("return {}1{}", "(".repeat(30), ")".repeat(30));
        let options = ParserOptions::default().with_max_depth(20);
        let err = Parser::with_options(&arena, &source, options).parse().unwrap_err();
        assert_eq!(err.message, "chunk has too many syntax levels");

        // each parenthesis costs an expression level and a prefix level
        assert!(Parser::new(&arena, &source).parse().is_ok());
    }

    #[test]
    fn test_error_points_at_lookahead() {
        let err = parse_err("if then end");
        assert_eq!(err.message, "expected expression");
        assert_eq!(err.near_text(), Some("then"));
        assert_eq!(err.column(), Some(4));
    }

    #[test]
    fn test_literal_error_points_at_literal() {
        let err = parse_err("x = 0b101 + 1");
        assert_eq!(err.message, "malformed number");
        assert_eq!(err.near_text(), Some("0b101"));
        assert!(err.is_lexical());
    }

    #[test]
    fn test_cooperative_mode_parses_the_same() {
        let arena = Bump::new();
        let source = "local a = 1\nlocal b = a + 1\nprint(b)";
        let options = ParserOptions::default().with_yield_mode(YieldMode::Cooperative);
        let cooperative = Parser::with_options(&arena, source, options).parse().unwrap();
        let synchronous = Parser::new(&arena, source).parse().unwrap();
        assert_eq!(cooperative, synchronous);
    }
}
