//! Tree traversal.

use crate::node::*;

/// A visitor over a parsed chunk. Every method defaults to walking the
/// node's children in source order, so an implementation only overrides the
/// nodes it cares about (and calls back into the walk if it still wants to
/// descend).
pub trait Visitor<'a> {
    fn visit_chunk(&mut self, chunk: &Chunk<'a>) {
        for statement in chunk.statements {
            self.visit_statement(statement);
        }
    }

    fn visit_statement(&mut self, statement: &Statement<'a>) {
        match statement {
            Statement::Assignment(n) => {
                for variable in n.variables.iter() {
                    self.visit_variable(variable);
                }
                self.visit_expression_list(&n.values);
            }
            Statement::FunctionCall(n) => self.visit_function_call(&n.call),
            Statement::Do(n) => self.visit_chunk(&n.body),
            Statement::While(n) => {
                self.visit_expression(&n.condition);
                self.visit_chunk(&n.body);
            }
            Statement::Repeat(n) => {
                self.visit_chunk(&n.body);
                self.visit_expression(&n.condition);
            }
            Statement::If(n) => {
                self.visit_expression(&n.condition);
                self.visit_chunk(&n.then_block);
                for clause in n.else_ifs {
                    self.visit_expression(&clause.condition);
                    self.visit_chunk(&clause.body);
                }
                if let Some(else_block) = &n.else_block {
                    self.visit_chunk(else_block);
                }
            }
            Statement::For(n) => {
                self.visit_name(&n.variable);
                self.visit_expression(&n.start);
                self.visit_expression(&n.end);
                if let Some(step) = &n.step {
                    self.visit_expression(step);
                }
                self.visit_chunk(&n.body);
            }
            Statement::ForIn(n) => {
                for name in n.names.iter() {
                    self.visit_name(name);
                }
                self.visit_expression_list(&n.expressions);
                self.visit_chunk(&n.body);
            }
            Statement::FunctionDeclaration(n) => {
                for name in n.name.segments() {
                    self.visit_name(name);
                }
                self.visit_func_body(&n.body);
            }
            Statement::LocalFunctionDeclaration(n) => {
                self.visit_name(&n.name);
                self.visit_func_body(&n.body);
            }
            Statement::LocalVariableDeclaration(n) => {
                for name in n.names.iter() {
                    self.visit_name(name);
                }
                if let Some(values) = &n.values {
                    self.visit_expression_list(values);
                }
            }
            Statement::Return(n) => self.visit_expression_list(&n.values),
            Statement::Break => {}
        }
    }

    fn visit_expression_list(&mut self, list: &ExpressionList<'a>) {
        for expression in list.iter() {
            self.visit_expression(expression);
        }
    }

    fn visit_expression(&mut self, expression: &Expression<'a>) {
        match expression {
            Expression::Nil
            | Expression::False
            | Expression::True
            | Expression::Vararg
            | Expression::Number(_)
            | Expression::String(_) => {}
            Expression::Function(n) => self.visit_func_body(&n.body),
            Expression::Prefix(n) => self.visit_prefix_expression(n),
            Expression::Table(n) => self.visit_table(n),
            Expression::Binary(n) => {
                self.visit_expression(n.left);
                self.visit_expression(n.right);
            }
            Expression::Unary(n) => self.visit_expression(n.operand),
        }
    }

    fn visit_prefix_expression(&mut self, prefix: &PrefixExpression<'a>) {
        match prefix {
            PrefixExpression::Variable(n) => self.visit_variable(n),
            PrefixExpression::FunctionCall(n) => self.visit_function_call(n),
            PrefixExpression::Parenthesized(n) => self.visit_expression(n),
        }
    }

    fn visit_variable(&mut self, variable: &Variable<'a>) {
        match variable {
            Variable::Name(name) => self.visit_name(name),
            Variable::Index(n) => {
                self.visit_prefix_expression(n.prefix);
                self.visit_expression(n.index);
            }
            Variable::Member(n) => {
                self.visit_prefix_expression(n.prefix);
                self.visit_name(&n.name);
            }
        }
    }

    fn visit_function_call(&mut self, call: &FunctionCall<'a>) {
        match call {
            FunctionCall::Normal(n) => {
                self.visit_prefix_expression(n.prefix);
                self.visit_arguments(&n.arguments);
            }
            FunctionCall::Method(n) => {
                self.visit_prefix_expression(n.prefix);
                self.visit_name(&n.method);
                self.visit_arguments(&n.arguments);
            }
        }
    }

    fn visit_arguments(&mut self, arguments: &Arguments<'a>) {
        match arguments {
            Arguments::ExpressionList(list) => self.visit_expression_list(list),
            Arguments::String(_) => {}
            Arguments::Table(table) => self.visit_table(table),
        }
    }

    fn visit_table(&mut self, table: &TableConstructor<'a>) {
        for field in table.fields {
            self.visit_field(field);
        }
    }

    fn visit_field(&mut self, field: &Field<'a>) {
        match field {
            Field::ArrayKey { value } => self.visit_expression(value),
            Field::NameKey { key, value } => {
                self.visit_name(key);
                self.visit_expression(value);
            }
            Field::ExpressionKey { key, value } => {
                self.visit_expression(key);
                self.visit_expression(value);
            }
        }
    }

    fn visit_func_body(&mut self, body: &FuncBody<'a>) {
        for name in body.parameters.names.iter() {
            self.visit_name(name);
        }
        self.visit_chunk(&body.body);
    }

    fn visit_name(&mut self, _name: &Name<'a>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::BinaryOperator;
    use luast_core::SymbolTable;

    #[derive(Default)]
    struct NameCollector {
        names: Vec<String>,
    }

    impl<'a> Visitor<'a> for NameCollector {
        fn visit_name(&mut self, name: &Name<'a>) {
            self.names.push(name.text.to_string());
        }
    }

    #[test]
    fn test_walk_reaches_nested_names() {
        // local a = b + c.d
        let table = SymbolTable::new();
        let name = |text: &'static str| Name { text, symbol: table.intern(text) };

        let b = Expression::Prefix(PrefixExpression::Variable(Variable::Name(name("b"))));
        let c = PrefixExpression::Variable(Variable::Name(name("c")));
        let c_d = Expression::Prefix(PrefixExpression::Variable(Variable::Member(MemberVariable {
            prefix: &c,
            name: name("d"),
        })));
        let sum = Expression::Binary(BinaryOperation {
            left: &b,
            operator: BinaryOperator::Add,
            right: &c_d,
        });
        let values = [sum];
        let names = [name("a")];
        let statements = [Statement::LocalVariableDeclaration(LocalVariableDeclaration {
            names: NameList { names: &names },
            values: Some(ExpressionList { expressions: &values }),
        })];

        let mut collector = NameCollector::default();
        collector.visit_chunk(&Chunk { statements: &statements });
        assert_eq!(collector.names, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_walk_table_fields_in_order() {
        let table = SymbolTable::new();
        let key = Name { text: "n", symbol: table.intern("n") };
        let fields = [
            Field::NameKey { key, value: Expression::True },
            Field::ArrayKey { value: Expression::Nil },
        ];

        let mut collector = NameCollector::default();
        collector.visit_table(&TableConstructor { fields: &fields });
        assert_eq!(collector.names, ["n"]);
    }
}
