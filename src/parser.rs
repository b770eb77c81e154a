use log::{debug, trace, warn};

use crate::ast::Expression;
use crate::lexer::{lex, Token};

pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum ParserError {
    #[error("'(' at token {0} is not preceded by a function name")]
    MissingFunctionName(usize),
    #[error("')' at token {0} does not close any call")]
    UnbalancedBracket(usize),
    #[error("',' at token {0} is outside of any call")]
    StrayComma(usize),
    #[error("missing argument for {function} at token {index}")]
    MissingArgument { function: String, index: usize },
    #[error("call to {0} is never closed")]
    UnclosedCall(String),
    #[error("invalid integer literal {0:?}")]
    InvalidLiteral(String),
    #[error("calls are nested deeper than {0} levels")]
    DepthExceeded(usize),
    #[error("empty expression")]
    Empty,
    #[error("expected a single expression, found {0}")]
    TrailingExpressions(usize),
}

pub type ParseResult = Result<Expression, ParserError>;

/// a call whose closing bracket hasn't been seen yet
#[derive(Debug)]
struct PendingCall {
    name: String,
    args: Vec<Expression>,
    // height of the argument stack when the call was opened
    base: usize,
}

#[derive(Debug, Clone)]
pub struct Parser {
    pub max_depth: usize,
}

impl std::default::Default for Parser {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Parser {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn parse_str(&self, input: &str) -> ParseResult {
        self.build(&lex(input))
    }

    fn parse_literal(text: &str) -> ParseResult {
        text.trim()
            .parse()
            .map(Expression::Integer)
            .map_err(|_| ParserError::InvalidLiteral(text.to_string()))
    }

    fn pop_argument(
        operands: &mut Vec<Expression>,
        call: &PendingCall,
        index: usize,
    ) -> ParseResult {
        if operands.len() <= call.base {
            return Err(ParserError::MissingArgument {
                function: call.name.clone(),
                index,
            });
        }
        // length checked above
        Ok(operands.pop().unwrap())
    }

    /// Builds a single expression tree out of `tokens` in one pass.
    ///
    /// Open calls live on one stack and finished subtrees on another; a
    /// comma or closing bracket moves the newest subtree into the innermost
    /// open call. No recursion, so nesting only costs heap.
    pub fn build(&self, tokens: &[Token]) -> ParseResult {
        let mut calls: Vec<PendingCall> = Vec::new();
        let mut operands: Vec<Expression> = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            trace!(
                "token {} {}: {} open calls, {} operands",
                index,
                token,
                calls.len(),
                operands.len()
            );
            match token {
                Token::LeftBracket => {
                    let name = match index.checked_sub(1).map(|prev| &tokens[prev]) {
                        Some(Token::Value(text)) => text.trim().to_string(),
                        _ => return Err(ParserError::MissingFunctionName(index)),
                    };
                    if calls.len() >= self.max_depth {
                        return Err(ParserError::DepthExceeded(self.max_depth));
                    }
                    calls.push(PendingCall {
                        name,
                        args: Vec::new(),
                        base: operands.len(),
                    });
                }
                Token::RightBracket => {
                    let mut call = calls
                        .pop()
                        .ok_or(ParserError::UnbalancedBracket(index))?;
                    let arg = Self::pop_argument(&mut operands, &call, index)?;
                    call.args.push(arg);
                    operands.push(Expression::Call(call.name, call.args));
                }
                Token::Comma => {
                    let call = calls.last_mut().ok_or(ParserError::StrayComma(index))?;
                    let arg = Self::pop_argument(&mut operands, call, index)?;
                    call.args.push(arg);
                }
                Token::Value(text) => {
                    if text.trim_start().starts_with(|c: char| c.is_ascii_digit()) {
                        operands.push(Self::parse_literal(text)?);
                    } else if tokens.get(index + 1) != Some(&Token::LeftBracket) {
                        warn!("ignoring stray token {:?} at {}", text, index);
                    }
                }
            }
        }

        if let Some(call) = calls.pop() {
            return Err(ParserError::UnclosedCall(call.name));
        }
        match operands.len() {
            0 => Err(ParserError::Empty),
            1 => {
                let root = operands.pop().unwrap();
                debug!("built {}", root);
                Ok(root)
            }
            n => Err(ParserError::TrailingExpressions(n)),
        }
    }
}

/// build with the default nesting limit
pub fn build(tokens: &[Token]) -> ParseResult {
    Parser::default().build(tokens)
}
