//! Evaluates nested function-call expressions such as `ADD(1,MULTIPLY(2,3))`.
//!
//! Text goes through three stages: [`lexer::lex`] splits it on brackets and
//! commas, [`parser::Parser`] builds an [`Expression`] tree with two explicit
//! stacks, and [`evaluator::evaluate`] reduces the tree against a
//! [`FunctionRegistry`].

pub mod ast;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod parser;
pub mod registry;

pub use ast::Expression;
pub use evaluator::{evaluate, Arguments, EvalError, EvalResult};
pub use lexer::{lex, Token};
pub use parser::{build, Parser, ParserError};
pub use registry::{Function, FunctionRegistry, RegistryError};

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum InterpretError {
    #[error(transparent)]
    Parse(#[from] ParserError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("expression did not reduce to an integer: {0}")]
    NotAnInteger(String),
}

/// One interpreter session: a function registry plus parser settings.
///
/// Holds no state between expressions, so a session can be reused (or
/// shared by reference) for any number of `interpret` calls.
#[derive(Debug, Clone)]
pub struct Interpreter {
    registry: FunctionRegistry,
    parser: Parser,
}

impl std::default::Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_parser(Parser::default())
    }

    pub fn with_parser(parser: Parser) -> Self {
        Self {
            registry: FunctionRegistry::new(),
            parser,
        }
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.registry
    }

    pub fn register<F>(&mut self, name: &str, function: F) -> Result<(), RegistryError>
    where
        F: Fn(&Arguments) -> EvalResult + Send + Sync + 'static,
    {
        self.registry.register(name, function)
    }

    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        lex(source)
    }

    pub fn build(&self, tokens: &[Token]) -> Result<Expression, ParserError> {
        self.parser.build(tokens)
    }

    pub fn evaluate(&self, expr: &Expression) -> EvalResult {
        evaluate(expr, &self.registry)
    }

    /// evaluate an already built tree down to its integer value
    pub fn interpret_tree(&self, expr: &Expression) -> Result<i32, InterpretError> {
        let reduced = self.evaluate(expr)?;
        reduced
            .as_integer()
            .ok_or_else(|| InterpretError::NotAnInteger(reduced.to_string()))
    }

    pub fn interpret(&self, source: &str) -> Result<i32, InterpretError> {
        let tree = self.build(&self.tokenize(source))?;
        self.interpret_tree(&tree)
    }
}

/// interpret `source` with a fresh session holding only the built-ins
pub fn interpret(source: &str) -> Result<i32, InterpretError> {
    Interpreter::new().interpret(source)
}
