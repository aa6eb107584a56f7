//! Recursive-descent parser over the streaming lexer.
use std::{
    collections::HashMap,
    error::Error,
    fmt::Display,
    io::BufRead,
    rc::Rc,
};

use crate::{
    ast::{
        Assignment, BinaryOp, BinaryVerb, ClassDefinition, CompareVerb, Comparison, Compound,
        FieldAssignment, IfElse, MethodCall, NewInstance, Print, Return, Statement, UnaryOp,
        UnaryVerb, VariableValue,
    },
    lexer::{LexError, Lexer, Token},
    runtime::{Class, Method},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Tokenization failure or token-expectation mismatch, forwarded from
    /// the lexer.
    Lex(LexError),
    /// Grammar-level failure.
    Syntax(String),
}

impl ParseError {
    fn syntax(line: usize, message: impl Display) -> Self {
        ParseError::Syntax(format!("line {line}: {message}"))
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Lex(error) => error.fmt(f),
            ParseError::Syntax(message) => f.write_str(message),
        }
    }
}

impl Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        ParseError::Lex(error)
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses one program in a single pass. Classes are resolved at parse time
/// through a class table, so a class (and its parent) must be defined before
/// it is used.
pub struct Parser<R> {
    lexer: Lexer<R>,
    classes: HashMap<String, Rc<Class>>,
}

impl<R> Parser<R>
where
    R: BufRead,
{
    pub fn new(lexer: Lexer<R>) -> Self {
        Self {
            lexer,
            classes: HashMap::new(),
        }
    }

    /// Consume tokens up to EOF and yield the root compound statement.
    pub fn parse_program(mut self) -> ParseResult<Statement> {
        let mut program = Compound::default();

        while self.lexer.current() != &Token::Eof {
            if self.lexer.current() == &Token::Newline {
                self.lexer.advance()?;
                continue;
            }
            program.push(self.parse_statement()?);
        }

        Ok(Statement::Compound(program))
    }

    fn error(&self, message: impl Display) -> ParseError {
        ParseError::syntax(self.lexer.line(), message)
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.lexer.current() {
            Token::Class => self.parse_class_definition(),
            Token::If => self.parse_if_else(),
            Token::Print => self.parse_print(),
            Token::Return => {
                self.lexer.advance()?;
                let value = Box::new(self.parse_expression()?);
                self.end_of_statement()?;
                Ok(Statement::Return(Return { value }))
            }
            _ => self.parse_assignment_or_expression(),
        }
    }

    fn end_of_statement(&mut self) -> ParseResult<()> {
        self.lexer.expect(&Token::Newline)?;
        self.lexer.advance()?;

        Ok(())
    }

    fn parse_print(&mut self) -> ParseResult<Statement> {
        self.lexer.advance()?;
        let mut args = vec![];

        if self.lexer.current() != &Token::Newline {
            args.push(self.parse_expression()?);
            while self.lexer.current() == &Token::Char(',') {
                self.lexer.advance()?;
                args.push(self.parse_expression()?);
            }
        }

        self.end_of_statement()?;
        Ok(Statement::Print(Print { args }))
    }

    fn parse_assignment_or_expression(&mut self) -> ParseResult<Statement> {
        let expression = self.parse_expression()?;

        if self.lexer.current() == &Token::Char('=') {
            self.lexer.advance()?;
            let value = Box::new(self.parse_expression()?);
            let statement = self.into_assignment(expression, value)?;
            self.end_of_statement()?;
            return Ok(statement);
        }

        self.end_of_statement()?;
        Ok(expression)
    }

    /// A dotted target with one id binds a name, a longer one mutates a
    /// field on the instance the prefix resolves to.
    fn into_assignment(&self, target: Statement, value: Box<Statement>) -> ParseResult<Statement> {
        let Statement::VariableValue(variable) = target else {
            return Err(self.error("left side of '=' must be a name or a field"));
        };

        let mut dotted_ids = variable.dotted_ids;
        match dotted_ids.pop() {
            Some(field_name) if !dotted_ids.is_empty() => {
                Ok(Statement::FieldAssignment(FieldAssignment {
                    object: VariableValue { dotted_ids },
                    field_name,
                    value,
                }))
            }
            Some(var) => Ok(Statement::Assignment(Assignment { var, value })),
            None => Err(self.error("left side of '=' must be a name or a field")),
        }
    }

    fn parse_class_definition(&mut self) -> ParseResult<Statement> {
        let name = self.lexer.expect_next_id()?;
        self.lexer.advance()?;

        let parent = if self.lexer.current() == &Token::Char('(') {
            let parent_name = self.lexer.expect_next_id()?;
            let parent = self
                .classes
                .get(&parent_name)
                .cloned()
                .ok_or_else(|| self.error(format!("unknown parent class '{parent_name}'")))?;
            self.lexer.expect_next(&Token::Char(')'))?;
            self.lexer.advance()?;
            Some(parent)
        } else {
            None
        };

        self.lexer.expect(&Token::Char(':'))?;
        self.lexer.expect_next(&Token::Newline)?;
        if self.lexer.advance()? != &Token::Indent {
            return Err(self.error(format!("expected an indented body for class '{name}'")));
        }
        self.lexer.advance()?;

        let mut methods = vec![];
        while self.lexer.current() == &Token::Def {
            methods.push(self.parse_method()?);
        }
        self.lexer.expect(&Token::Dedent)?;
        self.lexer.advance()?;

        let class = Rc::new(Class::new(name.clone(), methods, parent));
        self.classes.insert(name.clone(), class.clone());

        Ok(Statement::Assignment(Assignment {
            var: name,
            value: Box::new(Statement::ClassDefinition(ClassDefinition { class })),
        }))
    }

    fn parse_method(&mut self) -> ParseResult<Method> {
        let name = self.lexer.expect_next_id()?;
        self.lexer.expect_next(&Token::Char('('))?;
        self.lexer.advance()?;

        let mut formal_params = vec![];
        if self.lexer.current() != &Token::Char(')') {
            formal_params.push(self.lexer.expect_id()?);
            self.lexer.advance()?;
            while self.lexer.current() == &Token::Char(',') {
                formal_params.push(self.lexer.expect_next_id()?);
                self.lexer.advance()?;
            }
        }
        self.lexer.expect(&Token::Char(')'))?;
        self.lexer.expect_next(&Token::Char(':'))?;
        self.lexer.advance()?;

        let body = self.parse_suite()?;

        Ok(Method {
            name,
            formal_params,
            body: Rc::new(body),
        })
    }

    /// An indented block, entered with the `:` already consumed.
    fn parse_suite(&mut self) -> ParseResult<Statement> {
        self.lexer.expect(&Token::Newline)?;
        if self.lexer.advance()? != &Token::Indent {
            return Err(self.error("expected an indented block"));
        }
        self.lexer.advance()?;

        let mut suite = Compound::default();
        while self.lexer.current() != &Token::Dedent {
            if self.lexer.current() == &Token::Eof {
                return Err(self.error("unexpected end of input inside a block"));
            }
            suite.push(self.parse_statement()?);
        }
        self.lexer.advance()?;

        Ok(Statement::Compound(suite))
    }

    fn parse_if_else(&mut self) -> ParseResult<Statement> {
        self.lexer.advance()?;
        let condition = Box::new(self.parse_expression()?);
        self.lexer.expect(&Token::Char(':'))?;
        self.lexer.advance()?;
        let if_body = Box::new(self.parse_suite()?);

        let else_body = if self.lexer.current() == &Token::Else {
            self.lexer.expect_next(&Token::Char(':'))?;
            self.lexer.advance()?;
            Some(Box::new(self.parse_suite()?))
        } else {
            None
        };

        Ok(Statement::IfElse(IfElse {
            condition,
            if_body,
            else_body,
        }))
    }

    fn parse_expression(&mut self) -> ParseResult<Statement> {
        self.parse_or_term()
    }

    fn parse_or_term(&mut self) -> ParseResult<Statement> {
        let mut lhs = self.parse_and_term()?;

        while self.lexer.current() == &Token::Or {
            self.lexer.advance()?;
            let rhs = self.parse_and_term()?;
            lhs = binary(BinaryVerb::Or, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_and_term(&mut self) -> ParseResult<Statement> {
        let mut lhs = self.parse_not_term()?;

        while self.lexer.current() == &Token::And {
            self.lexer.advance()?;
            let rhs = self.parse_not_term()?;
            lhs = binary(BinaryVerb::And, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_not_term(&mut self) -> ParseResult<Statement> {
        if self.lexer.current() == &Token::Not {
            self.lexer.advance()?;
            let operand = Box::new(self.parse_not_term()?);
            return Ok(Statement::UnaryOp(UnaryOp {
                verb: UnaryVerb::Not,
                operand,
            }));
        }

        self.parse_comparison()
    }

    /// Comparison is non-associative: at most one comparator per level.
    fn parse_comparison(&mut self) -> ParseResult<Statement> {
        let lhs = self.parse_additive()?;

        let verb = match self.lexer.current() {
            Token::Eq => CompareVerb::Equal,
            Token::NotEq => CompareVerb::NotEqual,
            Token::Char('<') => CompareVerb::Less,
            Token::Char('>') => CompareVerb::Greater,
            Token::LessOrEq => CompareVerb::LessOrEqual,
            Token::GreaterOrEq => CompareVerb::GreaterOrEqual,
            _ => return Ok(lhs),
        };

        self.lexer.advance()?;
        let rhs = self.parse_additive()?;

        Ok(Statement::Comparison(Comparison {
            verb,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }))
    }

    fn parse_additive(&mut self) -> ParseResult<Statement> {
        let mut lhs = self.parse_multiplicative()?;

        loop {
            let verb = match self.lexer.current() {
                Token::Char('+') => BinaryVerb::Add,
                Token::Char('-') => BinaryVerb::Sub,
                _ => return Ok(lhs),
            };

            self.lexer.advance()?;
            let rhs = self.parse_multiplicative()?;
            lhs = binary(verb, lhs, rhs);
        }
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Statement> {
        let mut lhs = self.parse_unary()?;

        loop {
            let verb = match self.lexer.current() {
                Token::Char('*') => BinaryVerb::Mult,
                Token::Char('/') => BinaryVerb::Div,
                _ => return Ok(lhs),
            };

            self.lexer.advance()?;
            let rhs = self.parse_unary()?;
            lhs = binary(verb, lhs, rhs);
        }
    }

    /// A leading `-` folds into a number literal when one follows directly;
    /// anything else subtracts from zero.
    fn parse_unary(&mut self) -> ParseResult<Statement> {
        if self.lexer.current() == &Token::Char('-') {
            self.lexer.advance()?;

            if let Token::Number(value) = self.lexer.current() {
                let negated = -*value;
                self.lexer.advance()?;
                return Ok(Statement::NumericConst(negated));
            }

            let operand = self.parse_unary()?;
            return Ok(binary(
                BinaryVerb::Sub,
                Statement::NumericConst(0),
                operand,
            ));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> ParseResult<Statement> {
        match self.lexer.current().clone() {
            Token::Number(value) => {
                self.lexer.advance()?;
                Ok(Statement::NumericConst(value))
            }
            Token::String(value) => {
                self.lexer.advance()?;
                Ok(Statement::StringConst(value))
            }
            Token::True => {
                self.lexer.advance()?;
                Ok(Statement::BoolConst(true))
            }
            Token::False => {
                self.lexer.advance()?;
                Ok(Statement::BoolConst(false))
            }
            Token::None => {
                self.lexer.advance()?;
                Ok(Statement::NoneConst)
            }
            Token::Char('(') => {
                self.lexer.advance()?;
                let inner = self.parse_expression()?;
                self.lexer.expect(&Token::Char(')'))?;
                self.lexer.advance()?;
                Ok(inner)
            }
            Token::Id(id) => {
                self.lexer.advance()?;
                self.parse_reference(id)
            }
            token => Err(self.error(format!("unexpected token {token} in expression"))),
        }
    }

    /// A dotted id chain, optionally called: `str(x)`, a class
    /// instantiation, a method call, or a plain variable read.
    fn parse_reference(&mut self, first: String) -> ParseResult<Statement> {
        let mut dotted_ids = vec![first];
        while self.lexer.current() == &Token::Char('.') {
            dotted_ids.push(self.lexer.expect_next_id()?);
            self.lexer.advance()?;
        }

        if self.lexer.current() != &Token::Char('(') {
            return Ok(Statement::VariableValue(VariableValue { dotted_ids }));
        }

        let mut args = self.parse_call_args()?;

        let Some(last) = dotted_ids.pop() else {
            return Err(self.error("empty call target"));
        };

        if !dotted_ids.is_empty() {
            return Ok(Statement::MethodCall(MethodCall {
                object: Box::new(Statement::VariableValue(VariableValue { dotted_ids })),
                method: last,
                args,
            }));
        }

        if last == "str" {
            return match (args.pop(), args.is_empty()) {
                (Some(operand), true) => Ok(Statement::UnaryOp(UnaryOp {
                    verb: UnaryVerb::Stringify,
                    operand: Box::new(operand),
                })),
                _ => Err(self.error("str() takes exactly one argument")),
            };
        }

        match self.classes.get(&last) {
            Some(class) => Ok(Statement::NewInstance(NewInstance {
                class: class.clone(),
                args,
            })),
            None => Err(self.error(format!("'{last}' is not a class"))),
        }
    }

    fn parse_call_args(&mut self) -> ParseResult<Vec<Statement>> {
        self.lexer.advance()?;
        let mut args = vec![];

        if self.lexer.current() != &Token::Char(')') {
            args.push(self.parse_expression()?);
            while self.lexer.current() == &Token::Char(',') {
                self.lexer.advance()?;
                args.push(self.parse_expression()?);
            }
        }
        self.lexer.expect(&Token::Char(')'))?;
        self.lexer.advance()?;

        Ok(args)
    }
}

fn binary(verb: BinaryVerb, lhs: Statement, rhs: Statement) -> Statement {
    Statement::BinaryOp(BinaryOp {
        verb,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    })
}
